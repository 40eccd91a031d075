//! End-to-end discovery scenarios against temporary directory trees.
//!
//! Each test pins `XDG_CONFIG_HOME` and `HOME`, points the system root at a
//! temporary `etc`, and checks the files a loader would be handed.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, anyhow, ensure};
use rstest::{fixture, rstest};
use runrestic_config::{ConfigPathResolver, collect_config_paths};
use tempfile::TempDir;
use test_helpers::env;

#[fixture]
fn root() -> Result<TempDir> {
    TempDir::new().context("create scenario root")
}

fn write_config(path: &Path, mode: u32) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).context("create config parent")?;
    }
    std::fs::write(path, "[[repositories]]\n").context("write config")?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        std::fs::set_permissions(path, std::fs::Permissions::from_mode(mode)).context("chmod")?;
    }
    #[cfg(not(unix))]
    let _ = mode;
    Ok(())
}

fn resolve_under(root: &Path) -> Result<Vec<PathBuf>> {
    ConfigPathResolver::builder("runrestic")
        .system_root(root.join("etc"))
        .build()
        .resolve_all()
        .map(|resolution| resolution.paths)
        .map_err(|err| anyhow!("resolution failed: {err}"))
}

#[rstest]
fn xdg_directory_is_the_only_source(root: Result<TempDir>) -> Result<()> {
    let root = root?;
    let home = root.path().join("home/u");
    let xdg = home.join(".cfg");
    let main = xdg.join("runrestic/main.toml");
    write_config(&main, 0o600)?;
    let _env = env::config_home_scope(xdg.to_str(), home.to_str());

    let paths = resolve_under(root.path())?;
    ensure!(paths == vec![main], "unexpected paths {paths:?}");
    Ok(())
}

#[rstest]
fn home_config_is_used_without_xdg(root: Result<TempDir>) -> Result<()> {
    let root = root?;
    let home = root.path().join("home/u");
    let config = home.join(".config/runrestic/backup.toml");
    write_config(&config, 0o600)?;
    let _env = env::config_home_scope(None, home.to_str());

    let paths = resolve_under(root.path())?;
    ensure!(paths == vec![config], "unexpected paths {paths:?}");
    Ok(())
}

#[rstest]
fn all_defaults_contribute_in_order(root: Result<TempDir>) -> Result<()> {
    let root = root?;
    let xdg = root.path().join("xdg");
    let system_file = root.path().join("etc/runrestic.toml");
    let system_dir_file = root.path().join("etc/runrestic/nas.toml");
    let user_file = xdg.join("runrestic/laptop.toml");
    write_config(&system_file, 0o644)?;
    write_config(&system_dir_file, 0o600)?;
    write_config(&user_file, 0o600)?;
    let _env = env::config_home_scope(xdg.to_str(), None);

    let paths = resolve_under(root.path())?;
    ensure!(
        paths == vec![system_file, system_dir_file, user_file],
        "unexpected paths {paths:?}"
    );
    Ok(())
}

#[rstest]
fn nothing_configured_yields_nothing(root: Result<TempDir>) -> Result<()> {
    let root = root?;
    let _env = env::config_home_scope(root.path().join("xdg").to_str(), None);

    let paths = resolve_under(root.path())?;
    ensure!(paths.is_empty(), "unexpected paths {paths:?}");
    Ok(())
}

#[cfg(unix)]
#[rstest]
fn world_readable_user_file_is_reported(root: Result<TempDir>) -> Result<()> {
    let root = root?;
    let xdg = root.path().join("xdg");
    let secret = xdg.join("runrestic/secret.toml");
    write_config(&secret, 0o604)?;
    let _env = env::config_home_scope(xdg.to_str(), None);

    let resolution = ConfigPathResolver::builder("runrestic")
        .system_root(root.path().join("etc"))
        .build()
        .resolve_all()
        .map_err(|err| anyhow!("{err}"))?;
    ensure!(resolution.paths.is_empty(), "file must not be loaded");
    let rejected = resolution
        .rejected
        .first()
        .ok_or_else(|| anyhow!("expected a rejection"))?;
    ensure!(rejected.path == secret, "unexpected rejection {rejected:?}");
    ensure!(rejected.octal_mode() == "0604", "unexpected mode {rejected}");
    Ok(())
}

#[test]
fn missing_explicit_path_is_returned() -> Result<()> {
    let paths = collect_config_paths(&["/tmp/missing.toml"]).map_err(|err| anyhow!("{err}"))?;
    ensure!(
        paths == vec![PathBuf::from("/tmp/missing.toml")],
        "unexpected paths {paths:?}"
    );
    Ok(())
}
