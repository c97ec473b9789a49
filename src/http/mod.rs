//! HTTP server implementation for filedeck
//!
//! This module provides the REST API and embedded front-end using Axum.
//! Every filesystem-facing endpoint resolves its request path through the
//! security guard before acting.

pub mod errors;
pub mod handlers;
pub mod models;
pub mod server;

pub use models::{ApiResponse, ErrorResponse};
/// Re-export commonly used types
pub use server::FileDeckServer;
