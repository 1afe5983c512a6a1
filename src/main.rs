mod app;
mod config;
mod logging;
mod models;
mod persistence;
mod pty;
mod tui;
mod workspace;

use anyhow::{Context, Result};
use clap::Parser;

use app::run_tui;
use persistence::{DataDir, LOG_FILE};

#[derive(Parser)]
#[command(name = "tabdeck")]
#[command(version)]
#[command(about = "Terminal workspace manager: projects in a sidebar, shells in tabs")]
struct Cli {}

#[tokio::main]
async fn main() -> Result<()> {
    Cli::parse();

    let data_dir = DataDir::default_location().context("could not prepare the data directory")?;

    logging::init_logging(&data_dir.file(LOG_FILE));
    tracing::info!(event = "app.start", data_dir = %data_dir.root().display());

    run_tui(data_dir).await
}
