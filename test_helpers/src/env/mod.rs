//! Helpers for mutating environment variables in tests.
//!
//! Default configuration paths are derived from `XDG_CONFIG_HOME` and `HOME`,
//! which are process-wide. Every mutation here takes a global re-entrant
//! mutex and returns an RAII guard that puts the previous value back (or
//! removes the variable again) when dropped.
//!
//! Guards for the same key restore in LIFO order. Tests that touch several
//! variables should hold an [`EnvScope`] for their whole body so no other test
//! observes a half-configured environment.
//!
//! # Examples
//!
//! ```
//! use test_helpers::env;
//!
//! let _scope = env::config_home_scope(Some("/home/u/.cfg"), Some("/home/u"));
//! assert_eq!(std::env::var("XDG_CONFIG_HOME").ok().as_deref(), Some("/home/u/.cfg"));
//! ```

use parking_lot::{ReentrantMutex, ReentrantMutexGuard};
use std::env;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::sync::LazyLock;

static ENV_MUTEX: LazyLock<ReentrantMutex<()>> = LazyLock::new(ReentrantMutex::default);

/// Variables consulted when deriving the per-user configuration directory.
pub const CONFIG_HOME_VARS: [&str; 2] = ["XDG_CONFIG_HOME", "HOME"];

/// Wrapper around `std::env::set_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_set_var(key: &str, value: &OsStr) {
    unsafe { env::set_var(key, value) };
}

/// Wrapper around `std::env::remove_var`.
///
/// # Safety
///
/// Callers must hold `ENV_MUTEX`.
unsafe fn env_remove_var(key: &str) {
    unsafe { env::remove_var(key) };
}

fn mutate_locked<F>(key: String, mutator: F, _guard: &ReentrantMutexGuard<'static, ()>) -> EnvVarGuard
where
    F: FnOnce(&str),
{
    let original = env::var_os(&key);
    mutator(&key);
    EnvVarGuard { key, original }
}

/// RAII guard restoring an environment variable to its prior value on drop.
#[must_use = "dropping restores the prior value"]
pub struct EnvVarGuard {
    key: String,
    original: Option<OsString>,
}

impl fmt::Debug for EnvVarGuard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EnvVarGuard")
            .field("key", &self.key)
            .field("had_original", &self.original.is_some())
            .finish_non_exhaustive()
    }
}

impl Drop for EnvVarGuard {
    fn drop(&mut self) {
        let _guard = ENV_MUTEX.lock();
        if let Some(val) = self.original.take() {
            // SAFETY: `ENV_MUTEX` is held for the restoration.
            unsafe { env_set_var(&self.key, &val) };
        } else {
            // SAFETY: `ENV_MUTEX` is held for the restoration.
            unsafe { env_remove_var(&self.key) };
        }
    }
}

/// Holds the global environment lock for its lifetime.
#[must_use = "dropping releases the environment lock"]
pub struct EnvVarLock {
    guard: ReentrantMutexGuard<'static, ()>,
}

impl EnvVarLock {
    /// Sets an environment variable while holding the lock.
    pub fn set_var<K, V>(&self, key: K, value: V) -> EnvVarGuard
    where
        K: Into<String>,
        V: AsRef<OsStr>,
    {
        // SAFETY: `self.guard` holds `ENV_MUTEX`.
        mutate_locked(key.into(), |k| unsafe { env_set_var(k, value.as_ref()) }, &self.guard)
    }

    /// Removes an environment variable while holding the lock.
    pub fn remove_var<K>(&self, key: K) -> EnvVarGuard
    where
        K: Into<String>,
    {
        // SAFETY: `self.guard` holds `ENV_MUTEX`.
        mutate_locked(key.into(), |k| unsafe { env_remove_var(k) }, &self.guard)
    }
}

/// Keeps the environment lock and a set of guards alive together.
///
/// Guards are restored before the lock is released.
#[must_use = "dropping releases the environment lock and restores guards"]
pub struct EnvScope {
    _lock: EnvVarLock,
    guards: Vec<EnvVarGuard>,
}

impl EnvScope {
    /// Runs `builder` under the lock and keeps the guards it returns.
    ///
    /// Builders should mutate through the provided [`EnvVarLock`].
    ///
    /// # Examples
    /// ```
    /// use test_helpers::env;
    ///
    /// let _scope = env::EnvScope::new_with(|lock| {
    ///     vec![lock.remove_var("XDG_CONFIG_HOME"), lock.set_var("HOME", "/home/u")]
    /// });
    /// ```
    pub fn new_with<F>(builder: F) -> Self
    where
        F: FnOnce(&EnvVarLock) -> Vec<EnvVarGuard>,
    {
        let held = lock();
        let guards = builder(&held);
        Self {
            _lock: held,
            guards,
        }
    }
}

impl Drop for EnvScope {
    fn drop(&mut self) {
        let guards = std::mem::take(&mut self.guards);
        drop(guards);
    }
}

/// Sets an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use test_helpers::env;
///
/// let _g = env::set_var("RUNRESTIC_DOC_SET", "bar");
/// assert_eq!(std::env::var("RUNRESTIC_DOC_SET").ok().as_deref(), Some("bar"));
/// ```
pub fn set_var<K, V>(key: K, value: V) -> EnvVarGuard
where
    K: Into<String>,
    V: AsRef<OsStr>,
{
    lock().set_var(key, value)
}

/// Removes an environment variable and returns a guard restoring its prior value.
///
/// # Examples
/// ```
/// use test_helpers::env;
///
/// let _g = env::remove_var("RUNRESTIC_DOC_REMOVED");
/// assert!(std::env::var("RUNRESTIC_DOC_REMOVED").is_err());
/// ```
pub fn remove_var<K>(key: K) -> EnvVarGuard
where
    K: Into<String>,
{
    lock().remove_var(key)
}

/// Acquires the global environment lock.
pub fn lock() -> EnvVarLock {
    EnvVarLock {
        guard: ENV_MUTEX.lock(),
    }
}

/// Pins `XDG_CONFIG_HOME` and `HOME` for the lifetime of the returned scope.
///
/// `None` removes the variable; `Some` sets it, including to the empty
/// string.
pub fn config_home_scope(xdg_config_home: Option<&str>, home: Option<&str>) -> EnvScope {
    EnvScope::new_with(|held| {
        CONFIG_HOME_VARS
            .into_iter()
            .zip([xdg_config_home, home])
            .map(|(key, value)| match value {
                Some(text) => held.set_var(key, text),
                None => held.remove_var(key),
            })
            .collect()
    })
}
