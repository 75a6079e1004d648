mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use client_book::Database;
use client_book::config::Config;

use crate::cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load()?;

    // Tables are only created by `init` and `demo`
    let db = Database::new(&config)
        .await
        .context("failed to connect to the database")?;

    let result = cli::handler::run(cli.command, &db).await;

    db.close().await;

    result
}
