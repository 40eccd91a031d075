//! The lazy, single-pass resolution iterator.

use std::collections::BTreeSet;
use std::fs::{self, ReadDir};
use std::iter::FusedIterator;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::vec;

use tracing::{debug, warn};

use super::candidates::{Candidate, tag_candidates};
use super::{FailurePolicy, ResolveOptions};
use crate::permissions::{PermissionCheck, RejectedFile, check_permissions};
use crate::{ConfigPathError, ConfigPathResult};

/// A directory candidate whose entries are being read.
#[derive(Debug)]
struct DirScan {
    dir: PathBuf,
    entries: ReadDir,
}

/// What a single directory entry turned out to be.
enum EntryOutcome {
    Accept(PathBuf),
    AcceptUnchecked(PathBuf),
    Reject(RejectedFile),
    Ignore,
    Fail(Arc<ConfigPathError>),
}

impl DirScan {
    fn next_outcome(&mut self, suffix: &str) -> Option<EntryOutcome> {
        let entry = match self.entries.next()? {
            Ok(entry) => entry,
            Err(err) => {
                return Some(EntryOutcome::Fail(ConfigPathError::dir_entry(
                    &self.dir, err,
                )));
            }
        };
        let path = entry.path();
        if !entry.file_name().to_string_lossy().ends_with(suffix) {
            debug!(path = %path.display(), "ignoring entry without configuration extension");
            return Some(EntryOutcome::Ignore);
        }
        if path.is_dir() {
            debug!(path = %path.display(), "ignoring nested directory");
            return Some(EntryOutcome::Ignore);
        }
        let metadata = match fs::metadata(&path) {
            Ok(metadata) => metadata,
            Err(err) => return Some(EntryOutcome::Fail(ConfigPathError::metadata(&path, err))),
        };
        Some(match check_permissions(&metadata) {
            PermissionCheck::Restricted => EntryOutcome::Accept(path),
            PermissionCheck::Unsupported => EntryOutcome::AcceptUnchecked(path),
            PermissionCheck::TooOpen { mode } => {
                EntryOutcome::Reject(RejectedFile::new(&path, mode))
            }
        })
    }
}

/// Lazy sequence of configuration files produced by a resolution pass.
///
/// Each candidate is inspected only when the iterator reaches it, and a
/// directory is read one entry per step. The sequence is finite and cannot
/// be restarted; start a new pass to observe filesystem changes.
///
/// Filesystem failures surface as `Err` items under
/// [`FailurePolicy::Abort`] and are logged and skipped under
/// [`FailurePolicy::Skip`].
#[derive(Debug)]
#[must_use = "iterators are lazy and do nothing unless consumed"]
pub struct ResolvedPaths {
    candidates: vec::IntoIter<Candidate>,
    scan: Option<DirScan>,
    suffix: String,
    failure_policy: FailurePolicy,
    rejected: Vec<RejectedFile>,
    unchecked_noticed: bool,
}

impl ResolvedPaths {
    /// Starts a pass over `candidates` with explicit `options`.
    ///
    /// Candidates are deduplicated and tagged against `default_set` here,
    /// before any of them is inspected.
    pub fn with_options<I>(
        candidates: I,
        default_set: &BTreeSet<PathBuf>,
        options: &ResolveOptions,
    ) -> Self
    where
        I: IntoIterator<Item = PathBuf>,
    {
        let extension = options.extension.trim_start_matches('.');
        Self {
            candidates: tag_candidates(candidates, default_set).into_iter(),
            scan: None,
            suffix: format!(".{extension}"),
            failure_policy: options.failure_policy,
            rejected: Vec::new(),
            unchecked_noticed: false,
        }
    }

    /// Files refused so far because their permissions were too open.
    #[must_use]
    pub fn rejected(&self) -> &[RejectedFile] {
        &self.rejected
    }

    /// Consumes the pass and returns every refused file it met.
    #[must_use]
    pub fn into_rejected(self) -> Vec<RejectedFile> {
        self.rejected
    }

    fn fail(&self, err: Arc<ConfigPathError>) -> Option<ConfigPathResult<PathBuf>> {
        match self.failure_policy {
            FailurePolicy::Abort => Some(Err(err)),
            FailurePolicy::Skip => {
                warn!(
                    path = %err.path().display(),
                    error = %err,
                    "skipping unreadable configuration path"
                );
                None
            }
        }
    }

    fn visit_candidate(&mut self, candidate: Candidate) -> Option<ConfigPathResult<PathBuf>> {
        let exists = candidate.path.exists();
        if candidate.is_default() && !exists {
            debug!(
                path = %candidate.path.display(),
                "default configuration path absent; skipping"
            );
            return None;
        }
        if !exists || !candidate.path.is_dir() {
            return Some(Ok(candidate.path));
        }
        match fs::read_dir(&candidate.path) {
            Ok(entries) => {
                self.scan = Some(DirScan {
                    dir: candidate.path,
                    entries,
                });
                None
            }
            Err(err) => self.fail(ConfigPathError::read_dir(&candidate.path, err)),
        }
    }

    /// Reports, once per pass, that files are accepted without an access check.
    pub(super) fn note_unchecked(&mut self, path: &Path) {
        if self.unchecked_noticed {
            debug!(path = %path.display(), "accepting file without permission check");
            return;
        }
        self.unchecked_noticed = true;
        warn!(
            path = %path.display(),
            "no discretionary access control available; configuration files are accepted unchecked"
        );
    }

    fn reject(&mut self, rejected: RejectedFile) {
        warn!(
            path = %rejected.path.display(),
            mode = %rejected.octal_mode(),
            "{rejected}"
        );
        self.rejected.push(rejected);
    }
}

impl Iterator for ResolvedPaths {
    type Item = ConfigPathResult<PathBuf>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(scan) = self.scan.as_mut() {
                match scan.next_outcome(&self.suffix) {
                    Some(EntryOutcome::Accept(path)) => return Some(Ok(path)),
                    Some(EntryOutcome::AcceptUnchecked(path)) => {
                        self.note_unchecked(&path);
                        return Some(Ok(path));
                    }
                    Some(EntryOutcome::Reject(rejected)) => self.reject(rejected),
                    Some(EntryOutcome::Ignore) => {}
                    Some(EntryOutcome::Fail(err)) => {
                        if let Some(item) = self.fail(err) {
                            return Some(item);
                        }
                    }
                    None => self.scan = None,
                }
                continue;
            }
            let candidate = self.candidates.next()?;
            if let Some(item) = self.visit_candidate(candidate) {
                return Some(item);
            }
        }
    }
}

impl FusedIterator for ResolvedPaths {}
