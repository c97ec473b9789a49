//! Main filedeck service implementation
//!
//! Thin filesystem layer sitting between the HTTP handlers and the path
//! guard. Every operation resolves its request path through
//! [`PathResolver`] before touching the disk; the handlers never see an
//! unresolved path.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::SystemTime;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tokio::fs;
use tracing::{debug, info};

use crate::security::{PathGuardError, PathResolver, ResolutionMode, RootLister, SystemRoots};

/// HTTP server CORS configuration
#[derive(Debug, Clone, Default)]
pub struct HttpServerConfig {
    /// List of origins allowed for CORS (empty list denies all origins)
    pub allowed_origins: Vec<String>,
}

/// Main service configuration
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Directory served in single-root mode; ignored in multi-root mode
    pub root_dir: PathBuf,

    /// Confinement model for resolved paths
    pub mode: ResolutionMode,

    /// HTTP server configuration
    pub http_server: Option<HttpServerConfig>,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            root_dir: PathBuf::from("."),
            mode: ResolutionMode::for_host(),
            http_server: None,
        }
    }
}

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Guard(#[from] PathGuardError),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(String),
}

/// One immediate child of a browsed directory.
#[derive(Debug, Clone)]
pub struct FileEntry {
    pub name: String,
    pub path: PathBuf,
    pub is_dir: bool,
    /// None for directories
    pub size: Option<u64>,
    pub modified: DateTime<Utc>,
}

/// File-manager service: browse, upload, download, delete.
pub struct FileDeckService {
    config: ServiceConfig,
    resolver: PathResolver,
    /// Canonical confinement base; present in single-root mode only.
    base: Option<PathBuf>,
}

impl FileDeckService {
    /// Create a new service with real volume probing.
    pub fn new(config: ServiceConfig) -> Result<Self, ServiceError> {
        Self::with_root_lister(config, Arc::new(SystemRoots))
    }

    /// Create a service with an injected root lister.
    pub fn with_root_lister(
        config: ServiceConfig,
        roots: Arc<dyn RootLister>,
    ) -> Result<Self, ServiceError> {
        let base = match config.mode {
            ResolutionMode::SingleRoot => {
                let canonical = config.root_dir.canonicalize().map_err(|e| {
                    ServiceError::Config(format!(
                        "root directory {} is not usable: {}",
                        config.root_dir.display(),
                        e
                    ))
                })?;
                if !canonical.is_dir() {
                    return Err(ServiceError::Config(format!(
                        "root path {} is not a directory",
                        canonical.display()
                    )));
                }
                Some(canonical)
            }
            ResolutionMode::MultiRoot => None,
        };

        let resolver = PathResolver::new(config.mode, roots);
        Ok(Self {
            config,
            resolver,
            base,
        })
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn resolver(&self) -> &PathResolver {
        &self.resolver
    }

    pub fn mode(&self) -> ResolutionMode {
        self.resolver.mode()
    }

    /// Canonical confinement base (single-root mode only).
    pub fn confinement_base(&self) -> Option<&Path> {
        self.base.as_deref()
    }

    /// Selectable roots for the front-end: the live volume set in
    /// multi-root mode, the confinement base alone in single-root mode.
    pub fn list_roots(&self) -> Vec<PathBuf> {
        match self.mode() {
            ResolutionMode::MultiRoot => self.resolver.roots().list_roots(),
            ResolutionMode::SingleRoot => self.base.iter().cloned().collect(),
        }
    }

    /// Run one raw request path through the guard.
    fn resolve_request(&self, raw: &str) -> Result<PathBuf, ServiceError> {
        let segments: &[&str] = if raw.is_empty() { &[] } else { &[raw] };
        Ok(self.resolver.resolve(self.base.as_deref(), segments)?)
    }

    /// List the immediate children of a directory, directories first,
    /// case-insensitive by name within each group.
    pub async fn browse(&self, raw: &str) -> Result<Vec<FileEntry>, ServiceError> {
        let target = self.resolve_request(raw)?;

        let meta = fs::metadata(&target).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ServiceError::NotFound(format!("path does not exist: {}", target.display()))
            } else {
                ServiceError::Io(e)
            }
        })?;
        if !meta.is_dir() {
            return Err(ServiceError::InvalidArgument(format!(
                "not a directory: {}",
                target.display()
            )));
        }

        let mut entries = Vec::new();
        let mut reader = fs::read_dir(&target).await?;
        while let Some(entry) = reader.next_entry().await? {
            // follow symlinks so linked directories browse like directories;
            // entries that cannot be stat'ed are skipped rather than
            // failing the whole listing
            let meta = match fs::metadata(entry.path()).await {
                Ok(meta) => meta,
                Err(_) => continue,
            };
            let modified = meta.modified().unwrap_or(SystemTime::UNIX_EPOCH);
            entries.push(FileEntry {
                name: entry.file_name().to_string_lossy().into_owned(),
                path: entry.path(),
                is_dir: meta.is_dir(),
                size: meta.is_file().then(|| meta.len()),
                modified: DateTime::<Utc>::from(modified),
            });
        }

        entries.sort_by(|a, b| {
            (!a.is_dir, a.name.to_lowercase()).cmp(&(!b.is_dir, b.name.to_lowercase()))
        });

        debug!(path = %target.display(), entries = entries.len(), "browsed directory");
        Ok(entries)
    }

    /// Resolve an upload target directory; it must already exist.
    pub async fn resolve_upload_dir(&self, raw: &str) -> Result<PathBuf, ServiceError> {
        let dir = self.resolve_request(raw)?;
        match fs::metadata(&dir).await {
            Ok(meta) if meta.is_dir() => Ok(dir),
            Ok(_) => Err(ServiceError::InvalidArgument(format!(
                "upload target is not a directory: {}",
                dir.display()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(
                ServiceError::InvalidArgument(format!("directory does not exist: {}", dir.display())),
            ),
            Err(e) => Err(ServiceError::Io(e)),
        }
    }

    /// Save one uploaded file under `dir`, guarding the caller-chosen
    /// filename against traversal before anything is written. `dir` must be
    /// a path previously returned by [`Self::resolve_upload_dir`].
    pub async fn save_upload(
        &self,
        dir: &Path,
        filename: &str,
        data: &[u8],
    ) -> Result<PathBuf, ServiceError> {
        let dest = self.resolver.resolve(Some(dir), &[filename])?;
        fs::write(&dest, data).await?;
        debug!(file = %dest.display(), bytes = data.len(), "stored upload");
        Ok(dest)
    }

    /// Resolve a download request; the target must be an existing regular
    /// file. Returns the path and its length for response headers.
    pub async fn download_path(&self, raw: &str) -> Result<(PathBuf, u64), ServiceError> {
        let path = self.resolve_request(raw)?;
        match fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok((path, meta.len())),
            Ok(_) => Err(ServiceError::NotFound(format!(
                "file does not exist: {}",
                path.display()
            ))),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(ServiceError::NotFound(
                format!("file does not exist: {}", path.display()),
            )),
            Err(e) => Err(ServiceError::Io(e)),
        }
    }

    /// Delete a file, or a directory with everything in it.
    /// Returns whether the removed target was a directory.
    pub async fn delete(&self, raw: &str) -> Result<bool, ServiceError> {
        let path = self.resolve_request(raw)?;
        let meta = fs::metadata(&path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ServiceError::NotFound(format!("target does not exist: {}", path.display()))
            } else {
                ServiceError::Io(e)
            }
        })?;

        if meta.is_file() {
            fs::remove_file(&path).await?;
            info!(path = %path.display(), "deleted file");
            Ok(false)
        } else {
            fs::remove_dir_all(&path).await?;
            info!(path = %path.display(), "deleted directory recursively");
            Ok(true)
        }
    }
}
