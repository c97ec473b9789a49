//! Drive-list endpoint handler

use crate::http::errors::HttpResult;
use crate::http::handlers::AppState;
use crate::http::models::ApiResponse;
use axum::extract::State;

/// GET /api/drives - Selectable roots for the front-end
///
/// Multi-root mode enumerates the mounted volumes fresh on every request;
/// single-root mode answers with the confinement base alone.
pub async fn list_drives(
    State(state): State<AppState>,
) -> HttpResult<axum::Json<ApiResponse<Vec<String>>>> {
    let roots: Vec<String> = state
        .service
        .list_roots()
        .iter()
        .map(|root| root.to_string_lossy().into_owned())
        .collect();

    Ok(axum::Json(ApiResponse::success(roots)))
}
