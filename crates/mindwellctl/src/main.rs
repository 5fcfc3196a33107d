//! MindWell Control - terminal client for the MindWell wellness journal

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use mindwell_common::{FileStore, MindWell, MindWellConfig};
use mindwellctl::cli::Cli;
use mindwellctl::{commands, display};
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Log filter override, e.g. `MINDWELL_LOG=mindwell_common=debug`
const LOG_ENV: &str = "MINDWELL_LOG";

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = MindWellConfig::load(cli.config.as_deref()).context("Failed to load config")?;

    let filter = EnvFilter::try_from_env(LOG_ENV)
        .unwrap_or_else(|_| EnvFilter::new(&config.log.level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let data_dir = cli.data_dir.clone().unwrap_or_else(|| config.data_dir());
    debug!("Using data dir {}", data_dir.display());

    let mut mw = MindWell::open(FileStore::new(&data_dir), &config);
    mw.subscribe(display::print_notification);

    commands::run(&mut mw, cli.command, Utc::now())
}
