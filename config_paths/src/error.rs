//! Error types for `runrestic-config-paths`.

use std::io;
use std::sync::Arc;

use runrestic_config::ConfigPathError;
use thiserror::Error;

/// Errors surfaced while listing configuration files.
#[derive(Debug, Error)]
pub enum ConfigPathsError {
    /// Discovery hit a filesystem failure under the abort policy.
    #[error("failed to resolve configuration paths: {0}")]
    Resolve(#[from] Arc<ConfigPathError>),

    /// Writing the listing failed.
    #[error("failed to write output: {0}")]
    Output(#[from] io::Error),
}

/// Result alias for the CLI.
pub type Result<T> = std::result::Result<T, ConfigPathsError>;
