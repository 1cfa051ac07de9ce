//! OpenAI-compatible chat-completions translator.
//!
//! The single translator implementation; which model answers is
//! configuration, not a second code path.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use geoquery_core::error::{GeoqueryError, Result};

use crate::ports::{ChatTurn, QueryTranslator, Translation, TranslationRequest};

const SYSTEM_PROMPT: &str = "\
You are a geospatial operation parser. Convert natural language requests into structured spatial operations to be executed on PostGIS.
- Input coordinates are in the EPSG:4326 projection, so use the methods accordingly.
- To make a point, use ST_MakePoint with the latitude in the first position and the longitude in the second position.
- To make a polygon, use ST_MakePolygon.
- Use the world_points table as the table for queries.
- Convert KM to meters when a distance or radius is mentioned.
- Use spherical measures wherever available (cast to geography, e.g. ST_Distance(a::geography, b::geography)) for correct results in EPSG:4326.
- When asked to create a buffer, first use ST_Transform to convert the point(s) to the appropriate UTM zone CRS, compute the buffer there, then transform the result back to EPSG:4326 and return it in GeoJSON format.
- The SQL query shall not return all the columns of the table but only the geometry column, rendered as GeoJSON text with ST_AsGeoJSON.

Return the response as JSON (without code block syntax) with the operation name as one property and the SQL query as plain text in another, e.g. {\"operation\": \"...\", \"query\": \"...\"}.";

/// Translator configuration.
#[derive(Debug, Clone)]
pub struct TranslatorConfig {
    /// Base URL of an OpenAI-compatible API (e.g. "https://api.openai.com/v1")
    pub base_url: String,
    /// Model name to use for translation
    pub model: String,
    /// API key; when absent, translation fails per request instead of at startup
    pub api_key: Option<String>,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.openai.com/v1".to_string(),
            model: "gpt-4o-mini".to_string(),
            api_key: None,
        }
    }
}

impl TranslatorConfig {
    /// Load configuration from environment variables, falling back to the
    /// defaults for anything unset.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            base_url: std::env::var("GEOQUERY_LLM_BASE_URL").unwrap_or(defaults.base_url),
            model: std::env::var("GEOQUERY_LLM_MODEL").unwrap_or(defaults.model),
            api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.trim().is_empty()),
        }
    }
}

/// Chat-completions translator implementation.
pub struct OpenAiTranslator {
    config: TranslatorConfig,
    client: reqwest::Client,
}

impl OpenAiTranslator {
    pub fn new(config: TranslatorConfig) -> Self {
        Self { config, client: reqwest::Client::new() }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    pub fn is_configured(&self) -> bool {
        self.config.api_key.is_some()
    }
}

#[async_trait]
impl QueryTranslator for OpenAiTranslator {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation> {
        let api_key = self.config.api_key.as_ref().ok_or_else(|| GeoqueryError::Translation {
            reason: "no API key configured; set OPENAI_API_KEY to enable translation".to_string(),
        })?;

        let user_turn = ChatTurn::user(user_message(request));

        let mut messages = Vec::with_capacity(request.context.len() + 2);
        messages.push(ChatTurn::system(SYSTEM_PROMPT));
        messages.extend(request.context.iter().cloned());
        messages.push(user_turn.clone());

        let body = ChatCompletionRequest { model: self.config.model.clone(), messages };

        tracing::debug!(model = %self.config.model, "Requesting query translation");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.base_url))
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| GeoqueryError::Translation {
                reason: format!("failed to reach the language model API: {}", e),
            })?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response.text().await.unwrap_or_default();
            return Err(GeoqueryError::Translation {
                reason: format!("language model API error ({}): {}", status, error_text),
            });
        }

        let completion: ChatCompletionResponse =
            response.json().await.map_err(|e| GeoqueryError::Translation {
                reason: format!("failed to parse the language model response: {}", e),
            })?;

        let content = completion
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GeoqueryError::Translation {
                reason: "language model returned no choices".to_string(),
            })?;

        let payload = parse_translation(&content)?;

        // The returned context is everything after the system prompt, so the
        // caller can feed it straight back into the next request.
        let mut context = request.context.clone();
        context.push(user_turn);
        context.push(ChatTurn::assistant(content));

        Ok(Translation { operation: payload.operation, query: payload.query, context })
    }
}

fn user_message(request: &TranslationRequest) -> String {
    match &request.selected_point {
        Some(point) => format!(
            "{} for latitude: {} and longitude: {}",
            request.text, point.latitude, point.longitude
        ),
        None => request.text.clone(),
    }
}

/// The payload the model must return.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TranslationPayload {
    pub operation: String,
    pub query: String,
}

/// Parse the model's raw output. Anything that is not a JSON object with
/// `operation` and `query` fields is a translation failure; no SQL has run.
pub fn parse_translation(content: &str) -> Result<TranslationPayload> {
    serde_json::from_str(content.trim()).map_err(|e| GeoqueryError::Translation {
        reason: format!("language model payload was not a usable JSON object: {}", e),
    })
}

/// Request body for the chat-completions API
#[derive(Debug, Serialize)]
struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatTurn>,
}

/// Response from the chat-completions API
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatTurn,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::SelectedPoint;

    #[test]
    fn test_parse_translation_valid() {
        let payload = parse_translation(
            r#"{"operation": "buffer", "query": "SELECT ST_AsGeoJSON(geom) FROM world_points"}"#,
        )
        .unwrap();
        assert_eq!(payload.operation, "buffer");
        assert!(payload.query.starts_with("SELECT"));
    }

    #[test]
    fn test_parse_translation_rejects_non_json() {
        let err = parse_translation("here is your query: SELECT 1").unwrap_err();
        assert!(matches!(err, GeoqueryError::Translation { .. }));
    }

    #[test]
    fn test_parse_translation_rejects_missing_query() {
        let err = parse_translation(r#"{"operation": "area"}"#).unwrap_err();
        assert!(matches!(err, GeoqueryError::Translation { .. }));
    }

    #[test]
    fn test_user_message_includes_selected_point() {
        let request = TranslationRequest {
            text: "show points within 2 km".to_string(),
            selected_point: Some(SelectedPoint { latitude: 28.377525, longitude: 77.003912 }),
            context: Vec::new(),
        };
        let message = user_message(&request);
        assert!(message.contains("latitude: 28.377525"));
        assert!(message.contains("longitude: 77.003912"));

        let bare = TranslationRequest {
            text: "show all points".to_string(),
            selected_point: None,
            context: Vec::new(),
        };
        assert_eq!(user_message(&bare), "show all points");
    }

    #[test]
    fn test_unconfigured_translator() {
        let translator = OpenAiTranslator::new(TranslatorConfig::default());
        assert!(!translator.is_configured());
        assert_eq!(translator.model(), "gpt-4o-mini");
    }
}
