//! Error types produced while resolving configuration paths.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;

/// Filesystem failures met while expanding configuration directories.
///
/// Missing paths are never reported here: absent defaults are skipped and
/// absent explicit paths are handed to the loader unchanged.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigPathError {
    /// A configuration directory could not be opened for listing.
    #[error("failed to list configuration directory '{}': {source}", path.display())]
    ReadDir {
        /// Directory that could not be listed.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// An entry of a configuration directory could not be read.
    #[error("failed to read an entry of configuration directory '{}': {source}", path.display())]
    DirEntry {
        /// Directory being listed when the failure occurred.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// A discovered configuration file could not be inspected.
    #[error("failed to read metadata for configuration file '{}': {source}", path.display())]
    Metadata {
        /// File whose metadata could not be read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },
}

impl ConfigPathError {
    /// Path the failure relates to.
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            Self::ReadDir { path, .. } | Self::DirEntry { path, .. } | Self::Metadata { path, .. } => {
                path
            }
        }
    }

    pub(crate) fn read_dir(path: &Path, source: io::Error) -> Arc<Self> {
        Arc::new(Self::ReadDir {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn dir_entry(path: &Path, source: io::Error) -> Arc<Self> {
        Arc::new(Self::DirEntry {
            path: path.to_path_buf(),
            source,
        })
    }

    pub(crate) fn metadata(path: &Path, source: io::Error) -> Arc<Self> {
        Arc::new(Self::Metadata {
            path: path.to_path_buf(),
            source,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::read_dir(ConfigPathError::read_dir(Path::new("/etc/runrestic"), io::ErrorKind::PermissionDenied.into()), "list configuration directory '/etc/runrestic'")]
    #[case::metadata(ConfigPathError::metadata(Path::new("/etc/runrestic/a.toml"), io::ErrorKind::NotFound.into()), "metadata for configuration file '/etc/runrestic/a.toml'")]
    fn messages_name_the_path(#[case] err: Arc<ConfigPathError>, #[case] expected: &str) {
        let message = err.to_string();
        assert!(
            message.contains(expected),
            "expected {expected:?} in {message:?}"
        );
    }

    #[test]
    fn path_accessor_returns_the_failing_path() {
        let err = ConfigPathError::dir_entry(Path::new("/etc/runrestic"), io::ErrorKind::Other.into());
        assert_eq!(err.path(), Path::new("/etc/runrestic"));
    }
}
