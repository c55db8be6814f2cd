//! `LifeRPG` CLI
//!
//! Command-line front end for the gamification engine. Every subcommand
//! acts on one player and prints a plain-text result to stdout; logs go to
//! stderr.

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use liferpg_core::config::{self, DayBoundary};
use liferpg_core::tracing_init::init_tracing;
use liferpg_engine::{GameDatabase, GameService};

mod commands;
mod render;

#[derive(Parser, Debug)]
#[command(name = "liferpg")]
#[command(version, about = "Turn real-life goals into RPG progression", long_about = None)]
struct Cli {
    /// Settings file layered over the global one
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Database path (overrides config and `LIFERPG_DB_PATH`)
    #[arg(long, global = true)]
    db_path: Option<PathBuf>,

    /// Player ID
    #[arg(short, long, global = true, env = "LIFERPG_PLAYER", default_value_t = 1)]
    player: i64,

    /// Calendar used for daily quests: utc or local
    #[arg(long, global = true)]
    day_boundary: Option<DayBoundary>,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: commands::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = config::load_config(cli.config.as_deref())?;
    if let Some(boundary) = cli.day_boundary {
        config.quests.day_boundary = boundary;
    }
    if cli.log_json {
        config.logging.json = true;
    }
    if let Some(path) = cli.db_path {
        config.storage.database_path = Some(path);
    }

    init_tracing(&config.logging.default_filter(), config.logging.json);

    let db_path = config
        .storage
        .database_path
        .clone()
        .or_else(config::default_database_path)
        .context("Cannot determine database path, pass --db-path")?;

    info!(
        version = env!("CARGO_PKG_VERSION"),
        db_path = %db_path.display(),
        player_id = cli.player,
        "Starting liferpg"
    );

    let db = GameDatabase::open(&db_path, &config.storage).await?;
    let service = GameService::new(db, &config.quests);

    commands::run(cli.command, &service, cli.player).await
}
