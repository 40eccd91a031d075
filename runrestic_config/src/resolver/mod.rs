//! Expansion of configuration candidates into the files to load.
//!
//! Each candidate is handled on its own, in input order:
//!
//! - a missing default is skipped, so nobody has to create configuration
//!   they do not need;
//! - anything that is not an existing directory (a file, or a missing
//!   explicit path) is passed through untouched so the loader can report it;
//! - an existing directory is listed, non-recursively, and every regular
//!   entry ending in `.toml` is returned if only its owner can access it.
//!   Files that are readable by others are refused with a warning.
//!
//! Candidates are deduplicated by [`canonical_key`](crate::canonical_key)
//! before any filesystem inspection, and a candidate counts as a default when
//! its key belongs to the default set handed to the resolver.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use crate::{CONFIG_EXTENSION, ConfigPathResult, DefaultPaths, RejectedFile};

mod builder;
mod candidates;
mod iter;

pub use builder::ConfigPathResolverBuilder;
pub use candidates::{Candidate, Provenance};
pub use iter::ResolvedPaths;

/// What to do when the filesystem refuses an operation during expansion.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FailurePolicy {
    /// Yield the failure as an `Err` item; eager collection stops there.
    #[default]
    Abort,
    /// Log the failure at warn level and carry on with the next entry.
    Skip,
}

/// Tunables for a resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Extension, without the leading dot, of files picked up from directories.
    pub extension: String,
    /// Behaviour on filesystem failures.
    pub failure_policy: FailurePolicy,
}

impl Default for ResolveOptions {
    fn default() -> Self {
        Self {
            extension: String::from(CONFIG_EXTENSION),
            failure_policy: FailurePolicy::Abort,
        }
    }
}

/// Eagerly materialised result of a resolution pass.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[must_use]
pub struct Resolution {
    /// Files to hand to the loader, in discovery order.
    pub paths: Vec<PathBuf>,
    /// Files refused because their permissions were too open.
    pub rejected: Vec<RejectedFile>,
}

/// Resolves configuration candidates for one application.
///
/// # Examples
///
/// ```rust
/// use runrestic_config::ConfigPathResolver;
///
/// let resolver = ConfigPathResolver::builder("runrestic")
///     .add_explicit_path("/tmp/missing.toml")
///     .build();
/// let paths: Vec<_> = resolver.resolve().collect::<Result<_, _>>().unwrap_or_default();
/// assert_eq!(paths, vec![std::path::PathBuf::from("/tmp/missing.toml")]);
/// ```
#[derive(Debug, Clone)]
pub struct ConfigPathResolver {
    app_name: String,
    system_root: PathBuf,
    explicit_paths: Vec<PathBuf>,
    options: ResolveOptions,
}

impl ConfigPathResolver {
    /// Creates a builder initialised for `app_name`.
    #[must_use]
    pub fn builder(app_name: impl Into<String>) -> ConfigPathResolverBuilder {
        ConfigPathResolverBuilder::new(app_name)
    }

    /// Default locations for this application, read from the environment now.
    #[must_use]
    pub fn default_paths(&self) -> DefaultPaths {
        DefaultPaths::for_app(&self.app_name, &self.system_root)
    }

    /// Canonical keys of the default locations.
    #[must_use]
    pub fn default_set(&self) -> BTreeSet<PathBuf> {
        self.default_paths().canonical_set()
    }

    /// Options applied to every resolution pass.
    #[must_use]
    pub const fn options(&self) -> &ResolveOptions {
        &self.options
    }

    /// Returns the deduplicated candidates tagged with their provenance.
    ///
    /// Explicit paths replace the defaults entirely when any were given.
    #[must_use]
    pub fn candidates(&self) -> Vec<Candidate> {
        let (paths, default_set) = self.snapshot();
        candidates::tag_candidates(paths, &default_set)
    }

    /// Starts a lazy resolution pass.
    pub fn resolve(&self) -> ResolvedPaths {
        let (paths, default_set) = self.snapshot();
        ResolvedPaths::with_options(paths, &default_set, &self.options)
    }

    /// Runs a full resolution pass and collects its output.
    ///
    /// # Errors
    ///
    /// With [`FailurePolicy::Abort`], returns the first filesystem failure.
    /// With [`FailurePolicy::Skip`] this never fails.
    pub fn resolve_all(&self) -> ConfigPathResult<Resolution> {
        let mut pass = self.resolve();
        let paths = pass.by_ref().collect::<ConfigPathResult<Vec<_>>>()?;
        Ok(Resolution {
            paths,
            rejected: pass.into_rejected(),
        })
    }

    fn snapshot(&self) -> (Vec<PathBuf>, BTreeSet<PathBuf>) {
        let defaults = self.default_paths();
        let default_set = defaults.canonical_set();
        let paths = if self.explicit_paths.is_empty() {
            defaults.into_vec()
        } else {
            self.explicit_paths.clone()
        };
        (paths, default_set)
    }
}

/// Lazily resolves `candidates` against the canonical `default_set`.
///
/// Uses the default [`ResolveOptions`]: `.toml` files and
/// [`FailurePolicy::Abort`].
///
/// # Examples
///
/// ```rust
/// use std::collections::BTreeSet;
/// use std::path::Path;
/// use runrestic_config::{canonical_key, resolve_config_paths};
///
/// let defaults = BTreeSet::from([canonical_key(Path::new("/nonexistent/runrestic.toml"))]);
/// let out: Vec<_> = resolve_config_paths(["/nonexistent/runrestic.toml"], &defaults)
///     .collect::<Result<_, _>>()
///     .unwrap_or_default();
/// assert!(out.is_empty());
/// ```
pub fn resolve_config_paths<I, P>(candidates: I, default_set: &BTreeSet<PathBuf>) -> ResolvedPaths
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    ResolvedPaths::with_options(
        candidates.into_iter().map(|path| path.as_ref().to_path_buf()),
        default_set,
        &ResolveOptions::default(),
    )
}

#[cfg(test)]
mod tests;
