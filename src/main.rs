//! `junkyard` - headless driver for the gallery interaction core
//!
//! Loads a catalog directory, replays a recorded trace of touch and pointer
//! events against an in-memory surface, and prints the resulting gallery state
//! as JSON.

mod replay;

use anyhow::{Context, Result};
use clap::Parser;
use junkyard::{
    config::ConfigManager,
    data::Catalog,
    error::get_user_friendly_error,
    utils,
};
use replay::Trace;
use std::path::PathBuf;
use tracing::{error, info};

#[derive(Debug, Parser)]
#[command(name = "junkyard", version, about = "Replay interaction traces against the link gallery")]
struct Cli {
    /// Directory holding tags.json, cards.json and optionally icons.json
    #[arg(short, long)]
    data: PathBuf,

    /// JSON trace of timed events; without one only the initial render is reported
    #[arg(short, long)]
    trace: Option<PathBuf>,

    /// Configuration file (defaults to $JUNKYARD_HOME/config.json)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Directory for junkyard.log (defaults to $JUNKYARD_HOME)
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Start as if the primary pointer were coarse (touch mode)
    #[arg(long)]
    coarse: bool,

    /// Open activated card links in the default browser
    #[arg(long)]
    open_links: bool,

    /// Write the effective configuration back to the config file
    #[arg(long)]
    save_config: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(ConfigManager::get_config_path);
    let config = ConfigManager::load_from(&config_path)
        .context("Failed to load application configuration")?;

    let log_dir = cli.log_dir.clone().unwrap_or_else(ConfigManager::get_home_dir);
    utils::init_logging(&log_dir, &config.logging)
        .context("Failed to initialize logging system")?;

    if cli.save_config {
        ConfigManager::save_to(&config, &config_path).context("Failed to save configuration")?;
        info!("Configuration written to {}", config_path.display());
    }

    let catalog = load_catalog(&cli)?;
    let trace = match &cli.trace {
        Some(path) => Trace::load(path)?,
        None => Trace::default(),
    };
    info!("Replaying {} steps", trace.steps.len());

    let summary = replay::run(&config, catalog, &trace, cli.coarse, cli.open_links);
    println!(
        "{}",
        serde_json::to_string_pretty(&summary).context("Failed to serialize summary")?
    );

    info!("Junkyard shutting down");
    Ok(())
}

fn load_catalog(cli: &Cli) -> Result<Catalog> {
    match Catalog::load_dir(&cli.data) {
        Ok(catalog) => Ok(catalog),
        Err(e) => {
            error!("Failed to load catalog: {}", e);
            eprintln!("ERROR: {}", get_user_friendly_error(&e));
            Err(anyhow::Error::new(e)).with_context(|| {
                format!("Failed to load catalog from {}", cli.data.display())
            })
        }
    }
}
