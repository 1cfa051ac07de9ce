//! Translator port definitions

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use geoquery_core::error::Result;

/// One conversation turn. Carried through requests and responses opaquely so
/// the caller can maintain the dialogue across stateless calls.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: String,
    pub content: String,
}

impl ChatTurn {
    pub fn system(content: impl Into<String>) -> Self {
        Self { role: "system".to_string(), content: content.into() }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self { role: "user".to_string(), content: content.into() }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self { role: "assistant".to_string(), content: content.into() }
    }
}

/// A point the caller has selected on the map, folded into the prompt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SelectedPoint {
    pub latitude: f64,
    pub longitude: f64,
}

/// Input to a translation call.
#[derive(Debug, Clone)]
pub struct TranslationRequest {
    pub text: String,
    pub selected_point: Option<SelectedPoint>,
    pub context: Vec<ChatTurn>,
}

/// A translated operation: its name, the executable SQL, and the updated
/// turn list (prior context plus this exchange, without the system prompt).
#[derive(Debug, Clone)]
pub struct Translation {
    pub operation: String,
    pub query: String,
    pub context: Vec<ChatTurn>,
}

/// Port for turning free text into a spatial operation and SQL query.
#[async_trait]
pub trait QueryTranslator: Send + Sync {
    async fn translate(&self, request: &TranslationRequest) -> Result<Translation>;
}
