//! Request and response models for the HTTP API

use serde::{Deserialize, Serialize};

/// Generic API response wrapper
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<ErrorResponse>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    pub fn error(error: ErrorResponse) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error),
        }
    }
}

/// Error response
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
}

/// Query carrying the request path (`?path=...`)
#[derive(Debug, Deserialize, Clone)]
pub struct PathQuery {
    pub path: Option<String>,
}

/// One directory entry in a browse response
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct EntryResponse {
    pub name: String,
    pub path: String,
    pub is_dir: bool,
    /// null for directories
    pub size: Option<u64>,
    /// modification time, fractional epoch seconds
    pub mtime: f64,
}

impl From<crate::core::service::FileEntry> for EntryResponse {
    fn from(entry: crate::core::service::FileEntry) -> Self {
        Self {
            name: entry.name,
            path: entry.path.to_string_lossy().into_owned(),
            is_dir: entry.is_dir,
            size: entry.size,
            mtime: entry.modified.timestamp_millis() as f64 / 1000.0,
        }
    }
}

/// Upload outcome, per item; one failure does not abort the rest
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub saved: Vec<String>,
    pub rejected: Vec<UploadRejection>,
}

/// A single rejected upload item
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct UploadRejection {
    pub name: String,
    pub reason: String,
}

/// Delete request body
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeleteRequest {
    pub path: Option<String>,
}

/// Delete response
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub deleted: String,
    pub was_dir: bool,
}

/// Status response
#[derive(Debug, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct StatusResponse {
    pub status: String,
    pub version: String,
    pub mode: String,
    pub roots: Vec<String>,
    pub uptime_seconds: u64,
}
