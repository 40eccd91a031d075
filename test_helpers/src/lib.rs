//! Test helpers shared across the `runrestic-config` workspace.
//!
//! - [`env`] serialises mutation of process environment variables such as
//!   `XDG_CONFIG_HOME` and `HOME`.
//! - [`cwd`] serialises changes of the working directory for tests that
//!   resolve relative configuration paths.
//! - [`logs`] captures `tracing` output so warnings can be asserted.

pub mod cwd;
pub mod env;
pub mod logs;
