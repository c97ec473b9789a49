//! Serve command implementation

use crate::cli::error::{CliError, CliResult};
use clap::Args;
use filedeck::{ConfigFile, FileDeckService, HttpServerConfig, ResolutionMode, ServiceConfig};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;

/// Serve the file manager via HTTP
#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Host to bind the server to
    #[arg(long, env = "FILEDECK_HOST", help = "Host to bind the server to")]
    host: Option<String>,

    /// Port to bind the server to
    #[arg(long, env = "FILEDECK_PORT", help = "Port to bind the server to")]
    port: Option<u16>,

    /// Directory to serve in single-root mode
    #[arg(long, env = "FILEDECK_ROOT", help = "Directory to serve in single-root mode")]
    root: Option<PathBuf>,
}

pub async fn execute_serve(args: ServeArgs) -> CliResult<()> {
    // filedeck.toml can pre-set host, port and root; flags and env win
    let current_dir = std::env::current_dir()?;
    let file_config = ConfigFile::discover(&current_dir)
        .map_err(|e| CliError::Config(e.to_string()))?
        .unwrap_or_default();
    let server_section = file_config.server.unwrap_or_default();

    let host = args
        .host
        .or(server_section.host)
        .unwrap_or_else(|| "localhost".to_string());
    let port = args.port.or(server_section.port).unwrap_or(8080);
    let root = args
        .root
        .or(server_section.root)
        .unwrap_or_else(|| PathBuf::from("."));

    let mode = ResolutionMode::for_host();
    let http_server = (!server_section.allowed_origins.is_empty()).then(|| HttpServerConfig {
        allowed_origins: server_section.allowed_origins,
    });

    let config = ServiceConfig {
        root_dir: root,
        mode,
        http_server,
    };
    let service = Arc::new(FileDeckService::new(config)?);

    info!("Starting filedeck HTTP server on {}:{}", host, port);

    println!("filedeck HTTP server starting...");
    println!("  Listening on: http://{}:{}", host, port);
    println!("  Mode: {}", service.mode());
    if let Some(base) = service.confinement_base() {
        println!("  Serving: {}", base.display());
    }

    let server = filedeck::http::server::FileDeckServer::new(service, &host, port);

    // Start the server (this will block until shutdown)
    server
        .serve()
        .await
        .map_err(|e| CliError::Validation(format!("Server error: {}", e)))?;

    Ok(())
}
