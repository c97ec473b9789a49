//! Drive-root enumeration

use std::path::PathBuf;

/// Enumerates the top-level volume roots a resolved path may live under.
///
/// Volumes can be mounted and unmounted while the server runs, so callers
/// query a lister on every confinement check and implementations must not
/// cache results between calls.
pub trait RootLister: Send + Sync {
    fn list_roots(&self) -> Vec<PathBuf>;
}

/// Probes the host for currently mounted volume roots.
///
/// On Windows this walks the drive letters `A:\` through `Z:\` and keeps
/// the ones that answer; elsewhere the filesystem has the single root `/`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRoots;

impl RootLister for SystemRoots {
    fn list_roots(&self) -> Vec<PathBuf> {
        if cfg!(windows) {
            ('A'..='Z')
                .map(|letter| PathBuf::from(format!("{}:\\", letter)))
                .filter(|root| root.exists())
                .collect()
        } else {
            vec![PathBuf::from("/")]
        }
    }
}

/// A fixed set of roots, for tests and configuration overrides.
#[derive(Debug, Clone, Default)]
pub struct FixedRoots {
    roots: Vec<PathBuf>,
}

impl FixedRoots {
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }
}

impl RootLister for FixedRoots {
    fn list_roots(&self) -> Vec<PathBuf> {
        self.roots.clone()
    }
}
