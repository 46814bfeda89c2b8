use atlas_core::Asset;
use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::{Deserialize, Serialize};

use crate::middleware::RequestId;

use super::{map_store_error, ApiError, ApiResponse, AppState};

const MISSING_TAG: &str = "Tag parameter is missing";

#[derive(Debug, Deserialize)]
pub(super) struct AssetsQuery {
    pub t: Option<String>,
    pub page: Option<String>,
}

impl AssetsQuery {
    fn tag(&self) -> Option<&str> {
        self.t.as_deref().filter(|t| !t.is_empty())
    }
}

/// Error body for the bare `/assets` endpoint, which predates the
/// `/api/v1` envelope and keeps its `{"error": "..."}` shape.
#[derive(Debug, Serialize)]
struct PlainError {
    error: String,
}

fn plain_error(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(PlainError {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Parses the 1-indexed `page` parameter. Absent or blank means page 1.
pub(super) fn parse_page(raw: Option<&str>) -> Option<u32> {
    match raw.map(str::trim) {
        None | Some("") => Some(1),
        Some(value) => value.parse::<u32>().ok().filter(|page| *page >= 1),
    }
}

/// `GET /assets?t=<tag>&page=<n>`: one page of assets as a bare JSON array.
pub(super) async fn list_assets(
    State(state): State<AppState>,
    Query(params): Query<AssetsQuery>,
) -> Response {
    let Some(tag) = params.tag() else {
        return plain_error(StatusCode::BAD_REQUEST, MISSING_TAG);
    };
    let Some(page) = parse_page(params.page.as_deref()) else {
        return plain_error(
            StatusCode::BAD_REQUEST,
            "Page parameter must be a positive integer",
        );
    };

    match state.store.fetch_assets(tag, page, state.page_size).await {
        Ok(assets) => Json(assets).into_response(),
        Err(e) => {
            tracing::error!(tag, page, error = %e, "failed to load assets");
            plain_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load media from Sanity",
            )
        }
    }
}

#[derive(Debug, Serialize)]
pub(super) struct TagPageData {
    pub assets: Vec<Asset>,
    pub tag: String,
}

/// First page of assets for the tag browser.
pub(super) async fn tag_page(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(params): Query<AssetsQuery>,
) -> Result<Json<ApiResponse<TagPageData>>, ApiError> {
    let Some(tag) = params.tag() else {
        return Err(ApiError::new(req_id.0, "bad_request", MISSING_TAG));
    };

    let assets = state
        .store
        .fetch_assets(tag, 1, state.page_size)
        .await
        .map_err(|e| map_store_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse::new(
        TagPageData {
            assets,
            tag: tag.to_owned(),
        },
        req_id.0,
    )))
}
