//! Canonical path keys used for default-path membership and deduplication.
//!
//! Keys are only ever compared; the paths handed back to callers keep the
//! spelling they were given in.

use std::path::{Path, PathBuf};

/// Returns the canonical form of `path` used for equality testing.
///
/// Existing paths are resolved through the filesystem so symlinks and `..`
/// components collapse onto their target. Paths that cannot be resolved (most
/// commonly because they do not exist) fall back to their lexically absolute
/// form, and to the input itself if even that is unavailable.
///
/// On Windows [`dunce`](https://docs.rs/dunce) keeps UNC prefixes out of the
/// returned key.
///
/// # Examples
///
/// ```rust
/// use std::path::Path;
/// use runrestic_config::canonical_key;
///
/// let key = canonical_key(Path::new("/definitely/not/here.toml"));
/// assert!(key.is_absolute());
/// ```
#[must_use]
pub fn canonical_key(path: &Path) -> PathBuf {
    resolve(path)
        .or_else(|_| std::path::absolute(path))
        .unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(windows)]
fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    dunce::canonicalize(path)
}

#[cfg(not(windows))]
fn resolve(path: &Path) -> std::io::Result<PathBuf> {
    std::fs::canonicalize(path)
}
