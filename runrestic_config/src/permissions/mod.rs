//! Permission gate for configuration files discovered inside directories.
//!
//! Configuration usually carries repository passwords and cloud credentials,
//! so a file that grants any access to its group or to other users is
//! refused. On platforms without Unix permission bits the check cannot be
//! made and reports [`PermissionCheck::Unsupported`].

use std::fmt;
use std::fs::Metadata;
use std::path::{Path, PathBuf};

/// Permission bits that must be clear for a file to be accepted.
pub const GROUP_OTHER_MASK: u32 = 0o077;

/// Outcome of inspecting a file's permission bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionCheck {
    /// Only the owner has access.
    Restricted,
    /// Group or other users have some access.
    TooOpen {
        /// Full `st_mode` of the file.
        mode: u32,
    },
    /// The platform has no group/other permission bits to inspect.
    Unsupported,
}

impl PermissionCheck {
    /// Returns `true` when the file may be loaded.
    #[must_use]
    pub const fn is_accepted(self) -> bool {
        !matches!(self, Self::TooOpen { .. })
    }
}

/// Classifies `metadata` according to its group and other permission bits.
///
/// The file is rejected when `mode & 0o077` is non-zero, i.e. when the last
/// two octal digits of its mode are anything but `00`.
#[cfg(unix)]
#[must_use]
pub fn check_permissions(metadata: &Metadata) -> PermissionCheck {
    use std::os::unix::fs::PermissionsExt;

    classify_mode(metadata.permissions().mode())
}

/// Classifies `metadata` according to its group and other permission bits.
///
/// This platform exposes no group/other bits, so every file is reported as
/// [`PermissionCheck::Unsupported`].
#[cfg(not(unix))]
#[must_use]
pub const fn check_permissions(_metadata: &Metadata) -> PermissionCheck {
    PermissionCheck::Unsupported
}

/// Classifies a raw Unix mode.
///
/// # Examples
///
/// ```rust
/// use runrestic_config::permissions::{PermissionCheck, classify_mode};
///
/// assert_eq!(classify_mode(0o100600), PermissionCheck::Restricted);
/// assert_eq!(
///     classify_mode(0o100644),
///     PermissionCheck::TooOpen { mode: 0o100644 }
/// );
/// ```
#[must_use]
pub const fn classify_mode(mode: u32) -> PermissionCheck {
    if mode & GROUP_OTHER_MASK == 0 {
        PermissionCheck::Restricted
    } else {
        PermissionCheck::TooOpen { mode }
    }
}

/// A configuration file refused because its permissions are too open.
///
/// The [`Display`](fmt::Display) form is the warning shown to the user,
/// including the command that fixes the problem.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedFile {
    /// Path of the refused file, as discovered.
    pub path: PathBuf,
    /// Full `st_mode` of the file.
    pub mode: u32,
}

impl RejectedFile {
    pub(crate) fn new(path: &Path, mode: u32) -> Self {
        Self {
            path: path.to_path_buf(),
            mode,
        }
    }

    /// Permission bits rendered as four octal digits, e.g. `0644`.
    #[must_use]
    pub fn octal_mode(&self) -> String {
        format!("{:04o}", self.mode & 0o7777)
    }
}

impl fmt::Display for RejectedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "NOT using {path}: file permissions are too open ({mode}); \
             restrict them with `chmod 0600 {path}`",
            path = self.path.display(),
            mode = self.octal_mode(),
        )
    }
}
