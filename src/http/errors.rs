//! HTTP error handling and conversion

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// HTTP error types
#[derive(Debug, Clone)]
pub enum HttpError {
    /// Path escaped its confinement boundary
    Forbidden(String),

    /// Missing or malformed request parameters
    BadRequest(String),

    /// Target does not exist
    NotFound(String),

    /// Server errors
    InternalServerError(String),
}

impl HttpError {
    /// Convert to HTTP status code
    pub fn status_code(&self) -> StatusCode {
        match self {
            HttpError::Forbidden(_) => StatusCode::FORBIDDEN,
            HttpError::BadRequest(_) => StatusCode::BAD_REQUEST,
            HttpError::NotFound(_) => StatusCode::NOT_FOUND,
            HttpError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get error code string
    pub fn error_code(&self) -> &'static str {
        match self {
            HttpError::Forbidden(_) => "FORBIDDEN",
            HttpError::BadRequest(_) => "BAD_REQUEST",
            HttpError::NotFound(_) => "NOT_FOUND",
            HttpError::InternalServerError(_) => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            HttpError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            HttpError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            HttpError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        let message = match self {
            HttpError::Forbidden(msg)
            | HttpError::BadRequest(msg)
            | HttpError::NotFound(msg)
            | HttpError::InternalServerError(msg) => msg,
        };

        let body = Json(json!({
            "success": false,
            "error": {
                "code": error_code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

/// Convert service errors to HTTP errors
impl From<crate::core::service::ServiceError> for HttpError {
    fn from(err: crate::core::service::ServiceError) -> Self {
        match err {
            crate::core::service::ServiceError::Guard(e) => HttpError::Forbidden(e.to_string()),
            crate::core::service::ServiceError::NotFound(msg) => HttpError::NotFound(msg),
            crate::core::service::ServiceError::InvalidArgument(msg) => HttpError::BadRequest(msg),
            crate::core::service::ServiceError::Io(err) => {
                HttpError::InternalServerError(err.to_string())
            }
            crate::core::service::ServiceError::Config(msg) => HttpError::InternalServerError(msg),
        }
    }
}

/// Result type alias for HTTP operations
pub type HttpResult<T> = Result<T, HttpError>;
