//! Directory listing endpoint handler

use crate::http::errors::HttpResult;
use crate::http::handlers::AppState;
use crate::http::models::{ApiResponse, EntryResponse, PathQuery};
use axum::extract::{Query, State};

/// GET /api/browse?path= - List the immediate children of a directory
///
/// An empty path browses the confinement base in single-root mode.
pub async fn browse(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> HttpResult<axum::Json<ApiResponse<Vec<EntryResponse>>>> {
    let raw = query.path.unwrap_or_default();

    let entries = state.service.browse(&raw).await?;
    let items: Vec<EntryResponse> = entries.into_iter().map(EntryResponse::from).collect();

    Ok(axum::Json(ApiResponse::success(items)))
}
