use std::{env, io};

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use gibi_cli::{app::App, cli::Cli, config::AppConfig, logging};

// ─── configuration ───────────────────────────────────────────────────────────

/// Loads `--config` when given, otherwise `gibi.toml` from the working
/// directory if present.
fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    match &cli.config {
        Some(path) => AppConfig::load(path)
            .with_context(|| format!("failed to load config '{}'", path.display())),
        None => {
            let cwd = env::current_dir().context("cannot determine working directory")?;
            AppConfig::discover(&cwd).context("failed to load gibi.toml")
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    let filter = logging::resolve_filter(cli.log_level.as_deref(), &config.logging.level)?;
    logging::init_logging(filter, config.logging.file.as_deref())?;
    debug!(command = ?cli.command, "starting");

    let app = App::new(&config, cli.format)?;
    let mut out = io::stdout().lock();
    app.run(&cli.command, &mut out)
}
