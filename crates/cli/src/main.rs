//! `teamsmeeting` command line entry point
//!
//! Loads `.env`, installs the `tracing` subscriber, reads the configuration
//! and runs one Graph operation, printing the result as JSON on stdout.

mod commands;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use teamsmeeting_infra::config;
use tracing_subscriber::EnvFilter;

use crate::commands::Command;

#[derive(Parser)]
#[command(name = "teamsmeeting", version)]
#[command(about = "Schedule Microsoft Teams meetings for course pages")]
struct Cli {
    /// Configuration file (JSON or TOML).
    ///
    /// Without it the `TEAMSMEETING_*` environment variables are read, then
    /// the standard config locations are probed.
    #[arg(short, long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Command,
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter).with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // .env may carry RUST_LOG, so load it before the subscriber
    dotenvy::dotenv().ok();
    init_tracing(cli.json);

    let config = match cli.config {
        Some(path) => config::load_from_file(Some(path)),
        None => config::load(),
    }
    .context("failed to load configuration")?;

    let output = commands::run(cli.command, &config).await?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
