//! Default configuration locations derived from the process environment.
//!
//! Three locations are considered, always in this order:
//!
//! 1. `<system root>/<app>.toml`, a single system-wide file;
//! 2. `<system root>/<app>/`, a system-wide directory;
//! 3. `<user config dir>/<app>/`, a per-user directory.
//!
//! The user configuration directory follows the XDG base directory rules:
//! `XDG_CONFIG_HOME` when set to a non-empty value, `$HOME/.config`
//! otherwise. Nothing here touches the filesystem.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::{APP_NAME, CONFIG_EXTENSION, SYSTEM_CONFIG_ROOT, canonical_key};

/// The default configuration locations for one application.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPaths {
    /// Single system-wide configuration file.
    pub system_file: PathBuf,
    /// System-wide configuration directory.
    pub system_dir: PathBuf,
    /// Per-user configuration directory.
    pub user_dir: PathBuf,
}

impl DefaultPaths {
    /// Builds the defaults for `app_name`, rooting the system-wide entries
    /// at `system_root` and reading the user directory from the environment.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use std::path::Path;
    /// use runrestic_config::DefaultPaths;
    ///
    /// let defaults = DefaultPaths::for_app("runrestic", Path::new("/etc"));
    /// assert_eq!(defaults.system_file, Path::new("/etc/runrestic.toml"));
    /// assert_eq!(defaults.system_dir, Path::new("/etc/runrestic"));
    /// ```
    #[must_use]
    pub fn for_app(app_name: &str, system_root: &Path) -> Self {
        Self::with_user_config_dir(app_name, system_root, &user_config_dir())
    }

    /// Builds the defaults for `app_name` against an explicit user
    /// configuration directory.
    #[must_use]
    pub fn with_user_config_dir(app_name: &str, system_root: &Path, user_config: &Path) -> Self {
        Self {
            system_file: system_root.join(format!("{app_name}.{CONFIG_EXTENSION}")),
            system_dir: system_root.join(app_name),
            user_dir: user_config.join(app_name),
        }
    }

    /// Iterates over the defaults in discovery order.
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        [
            self.system_file.as_path(),
            self.system_dir.as_path(),
            self.user_dir.as_path(),
        ]
        .into_iter()
    }

    /// Returns the defaults in discovery order.
    #[must_use]
    pub fn into_vec(self) -> Vec<PathBuf> {
        vec![self.system_file, self.system_dir, self.user_dir]
    }

    /// Returns the canonical keys of the defaults.
    ///
    /// Two defaults that resolve to the same location (for example when
    /// `XDG_CONFIG_HOME` points at `/etc`) collapse into a single key.
    #[must_use]
    pub fn canonical_set(&self) -> BTreeSet<PathBuf> {
        self.iter().map(canonical_key).collect()
    }
}

/// Returns the directory holding per-user configuration.
///
/// `XDG_CONFIG_HOME` wins when it is set and non-empty. Otherwise the value
/// of `HOME` is joined with `.config`; an unset `HOME` expands to the empty
/// string, yielding `/.config`, rather than failing.
///
/// # Examples
///
/// ```rust,no_run
/// let dir = runrestic_config::user_config_dir();
/// assert!(dir.ends_with(".config") || std::env::var_os("XDG_CONFIG_HOME").is_some());
/// ```
#[must_use]
pub fn user_config_dir() -> PathBuf {
    if let Some(xdg) = std::env::var_os("XDG_CONFIG_HOME").filter(|value| !value.is_empty()) {
        return PathBuf::from(xdg);
    }
    let mut home = std::env::var_os("HOME").unwrap_or_default();
    home.push("/.config");
    PathBuf::from(home)
}

/// Returns the default configuration locations for `runrestic`.
///
/// # Examples
///
/// ```rust
/// let paths = runrestic_config::default_config_paths();
/// assert_eq!(paths.len(), 3);
/// assert_eq!(paths[0], std::path::Path::new("/etc/runrestic.toml"));
/// ```
#[must_use]
pub fn default_config_paths() -> Vec<PathBuf> {
    DefaultPaths::for_app(APP_NAME, Path::new(SYSTEM_CONFIG_ROOT)).into_vec()
}
