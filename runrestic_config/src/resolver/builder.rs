//! Builder for configuration path resolvers.
//!
//! The builder lets callers override the system configuration root, the
//! recognised extension, the failure policy, and the explicit paths before
//! producing a [`ConfigPathResolver`].

use std::path::PathBuf;

use super::{ConfigPathResolver, FailurePolicy, ResolveOptions};
use crate::SYSTEM_CONFIG_ROOT;

/// Builder for [`ConfigPathResolver`].
///
/// # Examples
///
/// ```rust,no_run
/// use runrestic_config::{ConfigPathResolver, FailurePolicy};
///
/// # fn run() -> runrestic_config::ConfigPathResult<()> {
/// let resolution = ConfigPathResolver::builder("runrestic")
///     .failure_policy(FailurePolicy::Skip)
///     .build()
///     .resolve_all()?;
/// for rejected in &resolution.rejected {
///     eprintln!("{rejected}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct ConfigPathResolverBuilder {
    app_name: String,
    system_root: PathBuf,
    extension: String,
    failure_policy: FailurePolicy,
    explicit_paths: Vec<PathBuf>,
}

impl ConfigPathResolverBuilder {
    /// Creates a builder initialised for `app_name`.
    ///
    /// The `app_name` names the system file `/etc/<app_name>.toml` and the
    /// directories `/etc/<app_name>/` and `$XDG_CONFIG_HOME/<app_name>/`.
    #[must_use]
    pub fn new(app_name: impl Into<String>) -> Self {
        let defaults = ResolveOptions::default();
        Self {
            app_name: app_name.into(),
            system_root: PathBuf::from(SYSTEM_CONFIG_ROOT),
            extension: defaults.extension,
            failure_policy: defaults.failure_policy,
            explicit_paths: Vec::new(),
        }
    }

    /// Overrides the directory holding system-wide configuration.
    #[must_use]
    pub fn system_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.system_root = root.into();
        self
    }

    /// Overrides the extension of files picked up from directories.
    ///
    /// A leading dot is accepted and ignored.
    #[must_use]
    pub fn extension(mut self, extension: impl Into<String>) -> Self {
        let raw: String = extension.into();
        self.extension = raw.trim_start_matches('.').to_owned();
        self
    }

    /// Chooses how filesystem failures are handled.
    #[must_use]
    pub const fn failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    /// Adds a user-supplied path. Any explicit path disables the defaults.
    #[must_use]
    pub fn add_explicit_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.explicit_paths.push(path.into());
        self
    }

    /// Replaces the user-supplied paths.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use runrestic_config::{ConfigPathResolver, Provenance};
    ///
    /// let resolver = ConfigPathResolver::builder("runrestic")
    ///     .explicit_paths(["/srv/backup.toml", "/srv/backup.toml"])
    ///     .build();
    /// let candidates = resolver.candidates();
    /// assert_eq!(candidates.len(), 1);
    /// assert_eq!(candidates[0].provenance, Provenance::Explicit);
    /// ```
    #[must_use]
    pub fn explicit_paths<I, P>(mut self, paths: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.explicit_paths = paths.into_iter().map(Into::into).collect();
        self
    }

    /// Finalises the builder and returns a [`ConfigPathResolver`].
    #[must_use]
    pub fn build(self) -> ConfigPathResolver {
        ConfigPathResolver {
            app_name: self.app_name,
            system_root: self.system_root,
            explicit_paths: self.explicit_paths,
            options: ResolveOptions {
                extension: self.extension,
                failure_policy: self.failure_policy,
            },
        }
    }
}
