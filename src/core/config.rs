//! Optional on-disk configuration (`filedeck.toml`)
//!
//! CLI flags and environment variables take precedence; the file only
//! pre-sets what the operator did not pass on the command line.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigFileError {
    #[error("failed to read configuration: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Parse(#[from] toml::de::Error),
}

/// `[server]` table of `filedeck.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ServerSection {
    pub host: Option<String>,
    pub port: Option<u16>,
    /// Directory served in single-root mode
    pub root: Option<PathBuf>,
    /// Origins allowed for CORS; empty denies cross-origin requests
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

/// Parsed `filedeck.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    pub server: Option<ServerSection>,
}

impl ConfigFile {
    pub const FILE_NAME: &'static str = "filedeck.toml";

    /// Load `filedeck.toml` from `dir`, if present.
    pub fn discover(dir: &Path) -> Result<Option<Self>, ConfigFileError> {
        let path = dir.join(Self::FILE_NAME);
        if !path.exists() {
            return Ok(None);
        }
        let content = std::fs::read_to_string(&path)?;
        let parsed = toml::from_str(&content)?;
        Ok(Some(parsed))
    }
}
