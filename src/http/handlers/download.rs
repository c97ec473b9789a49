//! Download endpoint handler

use crate::http::errors::{HttpError, HttpResult};
use crate::http::handlers::AppState;
use crate::http::models::PathQuery;
use axum::{
    body::Body,
    extract::{Query, State},
    http::header,
    response::Response,
};
use tokio_util::io::ReaderStream;

/// GET /api/download?path= - Stream a file back as an attachment
pub async fn download(
    State(state): State<AppState>,
    Query(query): Query<PathQuery>,
) -> HttpResult<Response> {
    let raw = query
        .path
        .filter(|p| !p.is_empty())
        .ok_or_else(|| HttpError::BadRequest("missing path parameter".to_string()))?;

    let (path, len) = state.service.download_path(&raw).await?;

    let file = tokio::fs::File::open(&path)
        .await
        .map_err(|e| HttpError::InternalServerError(format!("failed to open file: {}", e)))?;
    let body = Body::from_stream(ReaderStream::new(file));

    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "download".to_string());
    // quotes in a filename would break the header value
    let disposition = format!("attachment; filename=\"{}\"", filename.replace('"', "_"));

    Response::builder()
        .header(header::CONTENT_TYPE, "application/octet-stream")
        .header(header::CONTENT_LENGTH, len)
        .header(header::CONTENT_DISPOSITION, disposition)
        .body(body)
        .map_err(|e| HttpError::InternalServerError(format!("failed to build response: {}", e)))
}
