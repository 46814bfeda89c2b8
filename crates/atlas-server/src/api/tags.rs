use atlas_core::{summarize_tags, TagSummary};
use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct SummaryData {
    pub summary: TagSummary,
}

/// Tag tree for the site navigation. A store failure degrades to an empty
/// tree so the shell still renders.
pub(super) async fn layout(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Json<ApiResponse<SummaryData>> {
    let summary = match state.store.fetch_tags().await {
        Ok(tags) => summarize_tags(&tags),
        Err(e) => {
            tracing::warn!(request_id = %req_id.0, error = %e, "failed to load tags for layout");
            TagSummary::default()
        }
    };

    Json(ApiResponse::new(SummaryData { summary }, req_id.0))
}

pub(super) async fn explore(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<SummaryData>>, ApiError> {
    let tags = state
        .store
        .fetch_tags()
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        SummaryData {
            summary: summarize_tags(&tags),
        },
        req_id.0,
    )))
}
