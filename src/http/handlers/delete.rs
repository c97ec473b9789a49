//! Delete endpoint handler

use crate::http::errors::{HttpError, HttpResult};
use crate::http::handlers::AppState;
use crate::http::models::{ApiResponse, DeleteRequest, DeleteResponse};
use axum::extract::State;
use axum::Json;

/// DELETE /api/delete - Remove a file, or a directory recursively
pub async fn delete(
    State(state): State<AppState>,
    Json(request): Json<DeleteRequest>,
) -> HttpResult<axum::Json<ApiResponse<DeleteResponse>>> {
    let raw = request
        .path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| HttpError::BadRequest("missing path parameter".to_string()))?;

    let was_dir = state.service.delete(&raw).await?;

    Ok(axum::Json(ApiResponse::success(DeleteResponse {
        deleted: raw,
        was_dir,
    })))
}
