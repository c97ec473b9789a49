//! Axum HTTP server implementation

use crate::core::service::{FileDeckService, ServiceConfig};
use crate::http::handlers::{browse, delete, download, drives, status, upload, AppState};
use axum::{
    body::Body,
    extract::{DefaultBodyLimit, Request},
    http::{header, HeaderValue, Method, StatusCode},
    response::Response,
    routing::{delete as delete_route, get, post},
    Router,
};
use include_dir::{include_dir, Dir};
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::{compression::CompressionLayer, trace::TraceLayer};
use tracing::{info, warn};

/// Static assets embedded at compile time
static EMBEDDED_STATIC: Dir<'_> = include_dir!("$CARGO_MANIFEST_DIR/src/http/static");

/// Uploads are buffered in memory per item; cap the request body well above
/// typical file sizes but below anything that would exhaust the host.
const MAX_UPLOAD_BYTES: usize = 1024 * 1024 * 1024;

/// Serves embedded static files for the file-manager UI.
async fn serve_embedded_static(req: Request) -> Result<Response, StatusCode> {
    let path = req.uri().path().trim_start_matches('/');
    let name = match path {
        "" | "index.html" => "index.html",
        "app.js" => "app.js",
        "styles.css" => "styles.css",
        _ => return Err(StatusCode::NOT_FOUND),
    };
    let file = EMBEDDED_STATIC.get_file(name).ok_or(StatusCode::NOT_FOUND)?;
    let body = file.contents();
    let content_type: HeaderValue = match name {
        "index.html" => HeaderValue::from_static("text/html; charset=utf-8"),
        "app.js" => HeaderValue::from_static("application/javascript; charset=utf-8"),
        "styles.css" => HeaderValue::from_static("text/css; charset=utf-8"),
        _ => HeaderValue::from_static("application/octet-stream"),
    };
    Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, content_type)
        .body(Body::from(body))
        .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)
}

/// Build the CORS layer from configuration. No configured origins means
/// cross-origin requests are denied; the embedded UI is same-origin anyway.
pub fn build_cors_layer(config: &ServiceConfig) -> CorsLayer {
    let methods = [Method::GET, Method::POST, Method::DELETE];
    let headers = [header::CONTENT_TYPE];

    match &config.http_server {
        Some(http) if !http.allowed_origins.is_empty() => {
            let origins: Vec<HeaderValue> = http
                .allowed_origins
                .iter()
                .filter_map(|origin| match origin.parse::<HeaderValue>() {
                    Ok(value) => Some(value),
                    Err(_) => {
                        warn!(origin = %origin, "ignoring unparsable CORS origin");
                        None
                    }
                })
                .collect();
            CorsLayer::new()
                .allow_methods(methods)
                .allow_headers(headers)
                .allow_origin(origins)
        }
        _ => CorsLayer::new().allow_methods(methods).allow_headers(headers),
    }
}

/// filedeck HTTP server
pub struct FileDeckServer {
    service: Arc<FileDeckService>,
    addr: SocketAddr,
}

impl FileDeckServer {
    /// Create a new server instance
    pub fn new(service: Arc<FileDeckService>, host: &str, port: u16) -> Self {
        let addr = match Self::parse_address(host, port) {
            Ok(addr) => addr,
            Err(e) => {
                eprintln!("Invalid address: {}:{} - {}", host, port, e);
                std::process::exit(1);
            }
        };

        Self { service, addr }
    }

    /// Parse and normalize host:port into a SocketAddr
    fn parse_address(host: &str, port: u16) -> Result<SocketAddr, String> {
        // Normalize common hostnames for SocketAddr compatibility
        let normalized_host = Self::normalize_host(host);

        // Format the address string - IPv6 addresses need brackets
        let addr_str = if normalized_host.contains(':') {
            format!("[{}]:{}", normalized_host, port)
        } else {
            format!("{}:{}", normalized_host, port)
        };

        addr_str.parse().map_err(|_| {
            format!(
                "Unable to parse address '{}'. Use IP addresses like '127.0.0.1', '0.0.0.0', '::1', or hostnames that resolve to IP addresses",
                addr_str
            )
        })
    }

    /// Normalize hostnames for SocketAddr compatibility
    fn normalize_host(host: &str) -> String {
        match host {
            // Convert localhost to 127.0.0.1 for dev machine compatibility
            "localhost" => "127.0.0.1".to_string(),
            // IPv6 localhost variants
            "::1" | "[::1]" => "::1".to_string(),
            // All IPv6 interfaces
            "::" | "[::]" => "::".to_string(),
            // Keep other values as-is (IP addresses, other hostnames)
            _ => host.to_string(),
        }
    }

    /// Create the Axum router with all routes
    pub fn create_router(&self) -> Router {
        let state = AppState::new(self.service.clone());
        let cors = build_cors_layer(self.service.config());

        Router::new()
            // File-manager API endpoints
            .route("/api/drives", get(drives::list_drives))
            .route("/api/browse", get(browse::browse))
            .route("/api/upload", post(upload::upload))
            .route("/api/download", get(download::download))
            .route("/api/delete", delete_route(delete::delete))
            // Status endpoint
            .route("/api/status", get(status::status))
            // Embedded front-end
            .route("/", get(serve_embedded_static))
            .route("/index.html", get(serve_embedded_static))
            .route("/app.js", get(serve_embedded_static))
            .route("/styles.css", get(serve_embedded_static))
            .layer(
                ServiceBuilder::new()
                    .layer(TraceLayer::new_for_http())
                    .layer(CompressionLayer::new())
                    .layer(cors),
            )
            .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
            .with_state(state)
    }

    /// Start the server
    pub async fn serve(self) -> Result<(), Box<dyn std::error::Error>> {
        let app = self.create_router();

        info!(
            mode = %self.service.mode(),
            "Starting filedeck HTTP server on {}",
            self.addr
        );
        if let Some(base) = self.service.confinement_base() {
            info!("Serving directory {}", base.display());
        }

        let listener = tokio::net::TcpListener::bind(self.addr).await?;
        let actual_addr = listener.local_addr()?;
        info!("Server bound to {}", actual_addr);

        axum::serve(listener, app).await?;

        Ok(())
    }

    /// Get server address
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }
}

/// Convenience function to create and start a server
pub async fn serve(
    service: Arc<FileDeckService>,
    host: &str,
    port: u16,
) -> Result<(), Box<dyn std::error::Error>> {
    let server = FileDeckServer::new(service, host, port);
    server.serve().await
}
