//! Tests for the listing produced by [`run`].

use super::*;
use anyhow::{Context, Result, anyhow, ensure};
use clap::Parser;
use rstest::rstest;
use tempfile::TempDir;
use test_helpers::env;

fn parse(argv: &[&str]) -> Result<Args> {
    Args::try_parse_from(argv).map_err(|err| anyhow!("parse {argv:?}: {err}"))
}

fn listing(args: &Args) -> Result<String> {
    let mut out = Vec::new();
    run(args, &mut out).map_err(|err| anyhow!("{err}"))?;
    String::from_utf8(out).context("listing is not UTF-8")
}

#[rstest]
fn explicit_missing_path_is_listed() -> Result<()> {
    let dir = TempDir::new().context("create temp dir")?;
    let missing = dir.path().join("missing.toml");
    let missing_text = missing.to_str().context("temp path is not UTF-8")?;
    let etc = dir.path().join("etc");
    let etc_text = etc.to_str().context("temp path is not UTF-8")?;

    let args = parse(&["runrestic-config-paths", "--system-root", etc_text, missing_text])?;
    let output = listing(&args)?;
    ensure!(output == format!("{missing_text}\n"), "unexpected listing {output:?}");
    Ok(())
}

#[rstest]
fn empty_defaults_print_nothing() -> Result<()> {
    let dir = TempDir::new().context("create temp dir")?;
    let etc = dir.path().join("etc");
    let etc_text = etc.to_str().context("temp path is not UTF-8")?;
    let _env = env::config_home_scope(dir.path().join("xdg").to_str(), None);

    let args = parse(&["runrestic-config-paths", "--system-root", etc_text])?;
    let output = listing(&args)?;
    ensure!(output.is_empty(), "unexpected listing {output:?}");
    Ok(())
}

#[cfg(unix)]
#[rstest]
fn rejected_files_are_listed_on_request() -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let dir = TempDir::new().context("create temp dir")?;
    let conf = dir.path().join("conf.d");
    std::fs::create_dir(&conf).context("create conf.d")?;
    let open = conf.join("open.toml");
    std::fs::write(&open, "").context("write open.toml")?;
    std::fs::set_permissions(&open, std::fs::Permissions::from_mode(0o644)).context("chmod")?;
    let conf_text = conf.to_str().context("temp path is not UTF-8")?;

    let args = parse(&["runrestic-config-paths", "--show-rejected", conf_text])?;
    let output = listing(&args)?;
    ensure!(output.starts_with("rejected: NOT using"), "unexpected listing {output:?}");
    ensure!(output.contains("(0644)"), "mode missing from {output:?}");
    Ok(())
}
