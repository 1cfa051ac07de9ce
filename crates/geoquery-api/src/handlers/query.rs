use std::sync::Arc;

use axum::{extract::State, Json};

use crate::dto::{NlQueryRequest, NlQueryResponse};
use crate::error::ApiError;
use crate::services::QueryService;
use crate::state::AppState;

pub async fn handle_query(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NlQueryRequest>,
) -> Result<Json<NlQueryResponse>, ApiError> {
    tracing::info!(
        query = %request.query,
        has_selected_point = request.selected_point.is_some(),
        context_turns = request.context.len(),
        "Processing natural-language query"
    );

    let response = QueryService::execute(&state, request).await?;

    Ok(Json(response))
}
