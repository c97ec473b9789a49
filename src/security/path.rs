//! Path resolution and confinement guard
//!
//! Converts an untrusted, possibly percent-encoded request path into a
//! canonical absolute path, then checks it against the configured root
//! model. Decoding, separator normalization and canonicalization all happen
//! here, after joining; a caller-supplied "already resolved" path is never
//! trusted as safe.

use std::path::{Component, Path, PathBuf, MAIN_SEPARATOR};
use std::sync::Arc;

use percent_encoding::percent_decode_str;
use thiserror::Error;

use crate::security::roots::RootLister;

#[derive(Debug, Error)]
pub enum PathGuardError {
    #[error("illegal path: {0} escapes the confinement base")]
    EscapesBase(String),

    #[error("illegal path: {0} is not under any mounted root")]
    OutsideRoots(String),

    #[error("illegal path: {0} is not absolute")]
    NotAbsolute(String),

    #[error("path resolution failed: {0}")]
    Resolution(String),
}

/// How resolved paths are confined.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionMode {
    /// Every path must stay under a single configured base directory.
    SingleRoot,
    /// Paths may live anywhere under a currently mounted drive root.
    MultiRoot,
}

impl ResolutionMode {
    /// Mode for the host operating system. Drive-letter roots only exist
    /// on Windows; everywhere else the tree hangs off a single base.
    pub fn for_host() -> Self {
        if cfg!(windows) {
            ResolutionMode::MultiRoot
        } else {
            ResolutionMode::SingleRoot
        }
    }
}

impl std::fmt::Display for ResolutionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ResolutionMode::SingleRoot => write!(f, "single-root"),
            ResolutionMode::MultiRoot => write!(f, "multi-root"),
        }
    }
}

/// Resolves untrusted request paths and enforces confinement.
///
/// The mode and root lister are injected at construction so both root
/// models can be exercised deterministically; no ambient process state is
/// consulted. Resolution is a pure function of its inputs plus the current
/// volume set, so a single resolver is safe to share across in-flight
/// requests.
#[derive(Clone)]
pub struct PathResolver {
    mode: ResolutionMode,
    roots: Arc<dyn RootLister>,
}

impl PathResolver {
    pub fn new(mode: ResolutionMode, roots: Arc<dyn RootLister>) -> Self {
        Self { mode, roots }
    }

    /// Resolver for the host OS with real volume probing.
    pub fn for_host() -> Self {
        Self::new(ResolutionMode::for_host(), Arc::new(super::SystemRoots))
    }

    pub fn mode(&self) -> ResolutionMode {
        self.mode
    }

    pub fn roots(&self) -> &Arc<dyn RootLister> {
        &self.roots
    }

    /// Resolve `segments` joined onto `base` into a canonical absolute path
    /// that passes the mode's confinement rules.
    ///
    /// In single-root mode the result must equal `base` or descend from it;
    /// `base` is required and must already be canonical. In multi-root mode
    /// the result must be anchored under one of the roots enumerated *now*:
    /// the lister is queried on every call, so an unmounted volume
    /// invalidates paths immediately.
    ///
    /// An absolute segment replaces everything joined so far (the usual
    /// join semantics), which is what lets callers hand in full paths; the
    /// confinement check is what keeps them honest.
    pub fn resolve<S: AsRef<str>>(
        &self,
        base: Option<&Path>,
        segments: &[S],
    ) -> Result<PathBuf, PathGuardError> {
        let mut candidate = match base {
            Some(base) => base.to_path_buf(),
            None => PathBuf::new(),
        };
        for raw in segments {
            candidate.push(decode_segment(raw.as_ref()));
        }

        if !candidate.is_absolute() {
            return Err(PathGuardError::NotAbsolute(candidate.display().to_string()));
        }

        let normalized = normalize_lexical(&candidate);
        let resolved = canonicalize_soft(&normalized)
            .map_err(|e| PathGuardError::Resolution(format!("{}: {}", normalized.display(), e)))?;

        self.check_confinement(base, &resolved)?;
        Ok(resolved)
    }

    fn check_confinement(
        &self,
        base: Option<&Path>,
        resolved: &Path,
    ) -> Result<(), PathGuardError> {
        match self.mode {
            ResolutionMode::SingleRoot => {
                let base = base.ok_or_else(|| {
                    PathGuardError::Resolution(
                        "single-root mode requires a confinement base".to_string(),
                    )
                })?;
                // starts_with compares whole components, so /base2 is not
                // treated as living under /base
                if resolved.starts_with(base) {
                    Ok(())
                } else {
                    Err(PathGuardError::EscapesBase(resolved.display().to_string()))
                }
            }
            ResolutionMode::MultiRoot => {
                // fresh enumeration on every check; volumes come and go
                let anchored = self.roots.list_roots().iter().any(|root| {
                    root.canonicalize()
                        .map(|canonical| resolved.starts_with(&canonical))
                        .unwrap_or(false)
                });
                if anchored {
                    Ok(())
                } else {
                    Err(PathGuardError::OutsideRoots(resolved.display().to_string()))
                }
            }
        }
    }
}

/// Percent-decode one raw segment and normalize its separators.
///
/// A backslash that survives one round of decoding as a literal `%5C` is
/// folded to a separator as well, so an encoded separator cannot be
/// smuggled past the decoding step and spliced into the path afterwards.
/// Malformed percent sequences pass through unchanged.
fn decode_segment(raw: &str) -> String {
    let decoded = percent_decode_str(raw).decode_utf8_lossy().into_owned();
    let decoded = decoded.replace("%5C", "\\").replace("%5c", "\\");
    decoded
        .chars()
        .map(|c| {
            if c == '/' || c == '\\' {
                MAIN_SEPARATOR
            } else {
                c
            }
        })
        .collect()
}

/// Fold `.` and `..` components without touching the filesystem.
///
/// `..` at the filesystem root stays at the root, the same way the OS
/// resolves it; the confinement check afterwards rejects anything that
/// climbed out of bounds, so over-popping is never silently forgiven.
fn normalize_lexical(path: &Path) -> PathBuf {
    let mut result = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => result.push(component),
            Component::CurDir => {}
            Component::ParentDir => {
                result.pop();
            }
            Component::Normal(s) => result.push(s),
        }
    }
    result
}

/// Canonicalize a lexically-normalized absolute path, tolerating a
/// non-existent tail: the deepest existing ancestor is resolved through the
/// filesystem (following symlinks) and the remaining components are
/// appended to it.
fn canonicalize_soft(path: &Path) -> std::io::Result<PathBuf> {
    match path.canonicalize() {
        Ok(resolved) => Ok(resolved),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            let (parent, name) = match (path.parent(), path.file_name()) {
                (Some(parent), Some(name)) => (parent, name),
                _ => return Err(err),
            };
            Ok(canonicalize_soft(parent)?.join(name))
        }
        Err(err) => Err(err),
    }
}
