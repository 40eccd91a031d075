//! Command-line interface definitions for `runrestic-config-paths`.

use std::path::PathBuf;

use camino::Utf8PathBuf;
use clap::Parser;
use runrestic_config::{FailurePolicy, SYSTEM_CONFIG_ROOT};

/// Parsed CLI arguments for `runrestic-config-paths`.
#[derive(Debug, Parser)]
#[command(name = "runrestic-config-paths")]
#[command(about = "List the configuration files runrestic would load")]
#[command(version)]
pub struct Args {
    /// Configuration files or directories; the defaults are used when none are given.
    ///
    /// Taken as raw OS paths so names that are not UTF-8 still reach the loader.
    #[arg(value_name = "path")]
    pub paths: Vec<PathBuf>,
    /// Directory holding the system-wide configuration.
    #[arg(long, env = "RUNRESTIC_SYSTEM_ROOT", default_value = SYSTEM_CONFIG_ROOT, value_name = "path")]
    pub system_root: Utf8PathBuf,
    /// Log and skip paths that cannot be read instead of failing.
    #[arg(long = "skip-unreadable")]
    pub should_skip_unreadable: bool,
    /// Also print the files refused for having open permissions.
    #[arg(long = "show-rejected")]
    pub should_show_rejected: bool,
    /// Log filter applied when `RUNRESTIC_LOG` is unset.
    #[arg(long, default_value = "warn", value_name = "filter")]
    pub log_level: String,
}

impl Args {
    /// Failure policy selected by the flags.
    #[must_use]
    pub const fn failure_policy(&self) -> FailurePolicy {
        if self.should_skip_unreadable {
            FailurePolicy::Skip
        } else {
            FailurePolicy::Abort
        }
    }
}
