//! Shared fixtures for resolver tests.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rstest::fixture;
use tempfile::TempDir;
use test_helpers::cwd::{self, WorkingDir};

use super::super::{ConfigPathResolver, resolve_config_paths};
use crate::canonical_key;

/// A temporary directory tree holding configuration candidates.
pub(super) struct ConfigTree {
    dir: TempDir,
}

impl ConfigTree {
    pub(super) fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `rel` with the given Unix `mode` (ignored elsewhere).
    pub(super) fn file(&self, rel: &str, mode: u32) -> Result<PathBuf> {
        let path = self.path().join(rel);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).with_context(|| format!("create {}", parent.display()))?;
        }
        std::fs::write(&path, "repositories = []\n")
            .with_context(|| format!("write {}", path.display()))?;
        set_mode(&path, mode)?;
        Ok(path)
    }

    pub(super) fn subdir(&self, rel: &str) -> Result<PathBuf> {
        let path = self.path().join(rel);
        std::fs::create_dir_all(&path).with_context(|| format!("create {}", path.display()))?;
        Ok(path)
    }

    /// Resolver whose system root and user config home both live in the tree.
    pub(super) fn resolver(&self) -> ConfigPathResolver {
        ConfigPathResolver::builder("runrestic")
            .system_root(self.path().join("etc"))
            .build()
    }
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode))
        .with_context(|| format!("chmod {mode:o} {}", path.display()))
}

#[cfg(not(unix))]
fn set_mode(_path: &Path, _mode: u32) -> Result<()> {
    Ok(())
}

#[fixture]
pub(super) fn config_tree() -> Result<ConfigTree> {
    let dir = TempDir::new().context("create config tree")?;
    Ok(ConfigTree { dir })
}

/// A [`ConfigTree`] that is also the working directory.
///
/// The working directory is restored before the tree is removed.
pub(super) struct CwdConfigTree {
    cwd: WorkingDir,
    tree: ConfigTree,
}

impl CwdConfigTree {
    pub(super) const fn tree(&self) -> &ConfigTree {
        &self.tree
    }

    /// Leaves the tree, reporting a failure to return.
    pub(super) fn leave(self) -> Result<()> {
        self.cwd.leave()
    }
}

#[fixture]
pub(super) fn cwd_config_tree() -> Result<CwdConfigTree> {
    let tree = config_tree()?;
    let cwd = cwd::enter(tree.path())?;
    Ok(CwdConfigTree { cwd, tree })
}

/// Canonical default set built from raw paths.
pub(super) fn default_set<I, P>(paths: I) -> BTreeSet<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    paths.into_iter().map(|path| canonical_key(path.as_ref())).collect()
}

/// Resolves eagerly, failing on the first filesystem error.
pub(super) fn resolve_vec<I, P>(candidates: I, defaults: &BTreeSet<PathBuf>) -> Result<Vec<PathBuf>>
where
    I: IntoIterator<Item = P>,
    P: AsRef<Path>,
{
    resolve_config_paths(candidates, defaults)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|err| anyhow::anyhow!("resolution failed: {err}"))
}

pub(super) fn sorted(mut paths: Vec<PathBuf>) -> Vec<PathBuf> {
    paths.sort();
    paths
}
