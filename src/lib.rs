//! # filedeck
//!
//! A browser-accessible file manager. The crate serves a directory tree
//! over HTTP (browse, upload, download, delete) with an embedded web
//! front-end; its core is the path resolution and confinement guard in
//! [`security`], which every filesystem-facing operation goes through.
//!
//! Two root models are supported: a single confinement base (POSIX) and
//! drive-letter volume roots (Windows), selected at startup and injected
//! into the resolver explicitly so both can be tested anywhere.
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use filedeck::{FileDeckService, ServiceConfig};
//! use std::path::PathBuf;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ServiceConfig {
//!         root_dir: PathBuf::from("./files"),
//!         ..Default::default()
//!     };
//!
//!     let service = Arc::new(FileDeckService::new(config)?);
//!     filedeck::http::server::serve(service, "localhost", 8080).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod http;
pub mod security;

pub use crate::core::config::{ConfigFile, ConfigFileError, ServerSection};
pub use crate::core::service::{
    FileDeckService, FileEntry, HttpServerConfig, ServiceConfig, ServiceError,
};
pub use security::{
    FixedRoots, PathGuardError, PathResolver, ResolutionMode, RootLister, SystemRoots,
};

/// Version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging (safe for testing)
pub fn init_logging() {
    // Only initialize logging once
    static INIT: std::sync::Once = std::sync::Once::new();
    INIT.call_once(|| {
        use tracing_subscriber::EnvFilter;

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "filedeck=info".into());

        let subscriber = tracing_subscriber::fmt().with_env_filter(filter).finish();

        // This will fail silently if already initialized
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}
