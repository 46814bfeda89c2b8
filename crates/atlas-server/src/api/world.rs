use atlas_core::Asset;
use axum::{extract::State, Extension, Json};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

#[derive(Debug, Serialize)]
pub(super) struct WorldData {
    pub assets: Vec<Asset>,
}

/// Every asset with coordinates, for the map view.
pub(super) async fn world(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<WorldData>>, ApiError> {
    let assets = state
        .store
        .fetch_located_assets()
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(WorldData { assets }, req_id.0)))
}
