//! Process working directory pinned for tests of relative candidates.
//!
//! Relative configuration paths are resolved against the working directory,
//! which every test in the binary shares. [`enter`] takes a process-wide lock
//! and moves into a directory; the returned [`WorkingDir`] moves back out
//! when dropped.
//!
//! # Examples
//!
//! ```no_run
//! use test_helpers::cwd;
//!
//! # fn run() -> anyhow::Result<()> {
//! let here = cwd::enter("/tmp")?;
//! assert!(std::path::Path::new("runrestic.toml").is_relative());
//! here.leave()?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};
use std::sync::LazyLock;

use anyhow::{Context, Result};
use parking_lot::{Mutex, MutexGuard};

static WORKING_DIR: LazyLock<Mutex<()>> = LazyLock::new(Mutex::default);

/// Holds the working directory until dropped or [`leave`](Self::leave)d.
#[must_use = "the previous working directory comes back as soon as this drops"]
pub struct WorkingDir {
    previous: PathBuf,
    _held: MutexGuard<'static, ()>,
}

impl WorkingDir {
    /// Moves back to the previous directory, reporting failure.
    ///
    /// # Errors
    ///
    /// Returns an error if the previous directory can no longer be entered.
    pub fn leave(self) -> Result<()> {
        std::env::set_current_dir(&self.previous)
            .with_context(|| format!("return to {}", self.previous.display()))
    }
}

impl Drop for WorkingDir {
    fn drop(&mut self) {
        let _ignored = std::env::set_current_dir(&self.previous);
    }
}

/// Makes `dir` the working directory of the process.
///
/// # Errors
///
/// Returns an error if the current directory cannot be read or `dir`
/// cannot be entered. The process stays where it was in both cases.
pub fn enter(dir: impl AsRef<Path>) -> Result<WorkingDir> {
    let held = WORKING_DIR.lock();
    let previous = std::env::current_dir().context("read working directory")?;
    let target = dir.as_ref();
    std::env::set_current_dir(target).with_context(|| format!("enter {}", target.display()))?;
    Ok(WorkingDir {
        previous,
        _held: held,
    })
}
