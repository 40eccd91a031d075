//! Candidate tagging and deduplication.

use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};

use crate::canonical_key;

/// Where a candidate path came from; decides how its absence is treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provenance {
    /// One of the default locations; skipped when missing.
    Default,
    /// Supplied by the user; passed through even when missing.
    Explicit,
}

/// A configuration location awaiting inspection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Path exactly as it was supplied.
    pub path: PathBuf,
    /// Whether the path is one of the defaults.
    pub provenance: Provenance,
}

impl Candidate {
    /// Returns `true` for default locations.
    #[must_use]
    pub const fn is_default(&self) -> bool {
        matches!(self.provenance, Provenance::Default)
    }

    /// Borrowed view of the supplied path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn push_unique(
    candidates: &mut Vec<Candidate>,
    seen: &mut HashSet<PathBuf>,
    default_set: &BTreeSet<PathBuf>,
    path: PathBuf,
) {
    let key = canonical_key(&path);
    let provenance = if default_set.contains(&key) {
        Provenance::Default
    } else {
        Provenance::Explicit
    };
    if seen.insert(key) {
        candidates.push(Candidate { path, provenance });
    }
}

/// Tags `paths` with their provenance, dropping later duplicates.
///
/// Two paths are duplicates when they share a canonical key; the first one
/// keeps its original spelling.
pub(super) fn tag_candidates<I>(paths: I, default_set: &BTreeSet<PathBuf>) -> Vec<Candidate>
where
    I: IntoIterator<Item = PathBuf>,
{
    let mut seen = HashSet::new();
    let mut candidates = Vec::new();
    for path in paths {
        push_unique(&mut candidates, &mut seen, default_set, path);
    }
    candidates
}
