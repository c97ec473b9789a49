//! Core service layer modules

pub mod config;
pub mod service;

// Re-export main types for convenience
pub use config::{ConfigFile, ConfigFileError, ServerSection};
pub use service::{FileDeckService, FileEntry, HttpServerConfig, ServiceConfig, ServiceError};
