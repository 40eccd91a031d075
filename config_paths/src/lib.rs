//! Library half of `runrestic-config-paths`.
//!
//! The binary parses [`cli::Args`], installs logging, and calls [`run`],
//! which prints one resolved configuration file per line.

pub mod cli;
pub mod error;

use std::io::Write;

use runrestic_config::{APP_NAME, ConfigPathResolver};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::Args;
use crate::error::Result;

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "RUNRESTIC_LOG";

/// Installs a stderr `fmt` subscriber filtered by `RUNRESTIC_LOG`, falling
/// back to `default_filter`.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .init();
}

/// Builds the resolver described by `args`.
#[must_use]
pub fn resolver(args: &Args) -> ConfigPathResolver {
    ConfigPathResolver::builder(APP_NAME)
        .system_root(args.system_root.as_std_path())
        .failure_policy(args.failure_policy())
        .explicit_paths(args.paths.iter().cloned())
        .build()
}

/// Resolves configuration files and writes them to `out`.
///
/// # Errors
///
/// Returns [`error::ConfigPathsError::Resolve`] on a filesystem failure
/// under the abort policy and [`error::ConfigPathsError::Output`] when
/// writing fails.
pub fn run<W: Write>(args: &Args, out: &mut W) -> Result<()> {
    let resolution = resolver(args).resolve_all()?;
    tracing::debug!(
        files = resolution.paths.len(),
        rejected = resolution.rejected.len(),
        "resolved configuration files"
    );
    for path in &resolution.paths {
        writeln!(out, "{}", path.display())?;
    }
    if args.should_show_rejected {
        for rejected in &resolution.rejected {
            writeln!(out, "rejected: {rejected}")?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests;
