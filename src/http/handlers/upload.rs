//! Upload endpoint handler

use crate::http::errors::{HttpError, HttpResult};
use crate::http::handlers::AppState;
use crate::http::models::{ApiResponse, PathQuery, UploadRejection, UploadResponse};
use axum::extract::{Multipart, Query, State};
use tracing::warn;

/// POST /api/upload?path= - Store uploaded files in an existing directory
///
/// Each item's caller-chosen filename is resolved against the target
/// directory before anything is written; a traversal attempt rejects that
/// item only. Items are independent: one failure neither aborts nor rolls
/// back the others.
pub async fn upload(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
    mut multipart: Multipart,
) -> HttpResult<axum::Json<ApiResponse<UploadResponse>>> {
    let raw_dir = query
        .path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| HttpError::BadRequest("missing path parameter".to_string()))?;

    let target_dir = state.service.resolve_upload_dir(&raw_dir).await?;

    let mut saved = Vec::new();
    let mut rejected = Vec::new();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| HttpError::BadRequest(format!("malformed multipart body: {}", e)))?
    {
        let Some(filename) = field.file_name().map(str::to_owned) else {
            continue;
        };
        if filename.is_empty() {
            continue;
        }

        let data = field
            .bytes()
            .await
            .map_err(|e| HttpError::BadRequest(format!("failed to read upload body: {}", e)))?;

        match state.service.save_upload(&target_dir, &filename, &data).await {
            Ok(_) => saved.push(filename),
            Err(err) => {
                warn!(file = %filename, error = %err, "rejected upload item");
                rejected.push(UploadRejection {
                    name: filename,
                    reason: err.to_string(),
                });
            }
        }
    }

    Ok(axum::Json(ApiResponse::success(UploadResponse {
        saved,
        rejected,
    })))
}
