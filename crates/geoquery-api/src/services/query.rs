use geoquery_engine::guard;
use geoquery_geo::normalize_rows;
use geoquery_llm::TranslationRequest;

use crate::dto::{NlQueryRequest, NlQueryResponse};
use crate::error::ApiError;
use crate::state::AppState;

/// Service for the natural-language query path: translate, guard, execute,
/// normalize.
pub struct QueryService;

impl QueryService {
    pub async fn execute(
        state: &AppState,
        request: NlQueryRequest,
    ) -> Result<NlQueryResponse, ApiError> {
        let translation = state
            .translator
            .translate(&TranslationRequest {
                text: request.query,
                selected_point: request.selected_point,
                context: request.context,
            })
            .await
            .map_err(|e| {
                tracing::error!(error = %e, "Query translation failed");
                ApiError::from(e)
            })?;

        tracing::debug!(
            operation = %translation.operation,
            query = %translation.query,
            "Translated query"
        );

        // The translated SQL is model output, not ours; it only runs if it
        // passes the read-only allowlist check.
        guard::check_translated_sql(&translation.query, guard::PERMITTED_TABLE)?;

        let rows = state.engine.execute_geometry_rows(&translation.query).await.map_err(|e| {
            tracing::error!(error = %e, "Translated query execution failed");
            ApiError::from(e)
        })?;

        let geometry = normalize_rows(&rows).map_err(|e| {
            ApiError::internal("Failed to normalize result rows").with_details(e.to_string())
        })?;

        Ok(NlQueryResponse {
            operation: translation.operation,
            geometry,
            current_ctx: translation.context,
        })
    }
}
