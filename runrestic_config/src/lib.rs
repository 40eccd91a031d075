//! Configuration file discovery for the `runrestic` backup wrapper.
//!
//! The crate turns either an explicit list of paths or the platform defaults
//! into the concrete configuration files a loader should open. It is made of
//! two pieces:
//!
//! - [`defaults`] derives the default locations from `XDG_CONFIG_HOME` and
//!   `HOME` without touching the filesystem.
//! - [`resolver`] inspects each candidate, expands directories into their
//!   `.toml` files, and rejects files readable by group or other users.
//!
//! Parsing the discovered files is left to the caller.
//!
//! # Examples
//!
//! ```rust,no_run
//! use runrestic_config::ConfigPathResolver;
//!
//! # fn run() -> runrestic_config::ConfigPathResult<()> {
//! let resolution = ConfigPathResolver::builder("runrestic").build().resolve_all()?;
//! for path in &resolution.paths {
//!     // hand `path` to the TOML loader
//!     let _ = path;
//! }
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;
use std::sync::Arc;

pub mod canonical;
pub mod defaults;
mod error;
pub mod permissions;
pub mod resolver;

pub use canonical::canonical_key;
pub use defaults::{DefaultPaths, default_config_paths, user_config_dir};
pub use error::ConfigPathError;
pub use permissions::{PermissionCheck, RejectedFile, check_permissions};
pub use resolver::{
    Candidate, ConfigPathResolver, ConfigPathResolverBuilder, FailurePolicy, Provenance,
    Resolution, ResolveOptions, ResolvedPaths, resolve_config_paths,
};

/// Name of the tool whose configuration is being discovered.
pub const APP_NAME: &str = "runrestic";

/// Extension, without the leading dot, of files picked up from directories.
pub const CONFIG_EXTENSION: &str = "toml";

/// Directory holding the system-wide configuration on Unix-like systems.
pub const SYSTEM_CONFIG_ROOT: &str = "/etc";

/// Result alias used throughout the crate.
///
/// Errors are shared through [`Arc`] so a failure can be both logged and
/// returned without cloning the underlying [`std::io::Error`].
pub type ConfigPathResult<T> = Result<T, Arc<ConfigPathError>>;

/// Resolves the configuration files `runrestic` should load.
///
/// When `explicit` is empty the platform defaults are used and any that are
/// missing are skipped. Explicit paths are returned even when they do not
/// exist so the loader can report them.
///
/// # Errors
///
/// Returns the first filesystem failure met while listing a directory or
/// reading the permissions of a file inside it.
///
/// # Examples
///
/// ```rust,no_run
/// # fn run() -> runrestic_config::ConfigPathResult<()> {
/// let paths = runrestic_config::collect_config_paths(&["/tmp/missing.toml"])?;
/// assert_eq!(paths, vec![std::path::PathBuf::from("/tmp/missing.toml")]);
/// # Ok(())
/// # }
/// ```
pub fn collect_config_paths<P>(explicit: &[P]) -> ConfigPathResult<Vec<PathBuf>>
where
    P: AsRef<std::path::Path>,
{
    ConfigPathResolver::builder(APP_NAME)
        .explicit_paths(explicit.iter().map(|path| path.as_ref().to_path_buf()))
        .build()
        .resolve()
        .collect()
}
