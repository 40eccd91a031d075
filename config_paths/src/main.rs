//! CLI entrypoint for `runrestic-config-paths`.

use clap::Parser;
use config_paths::cli::Args;
use config_paths::{init_logging, run};

fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    init_logging(&args.log_level);
    let stdout = std::io::stdout();
    run(&args, &mut stdout.lock()).map_err(color_eyre::eyre::Report::from)
}
