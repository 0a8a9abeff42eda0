//! `planboard` command-line entry point.
//!
//! # Responsibility
//! - Resolve configuration, start logging and open the planner database.
//! - Print command results; all planner rules live in `planboard_core`.

mod cli;
mod commands;
mod prompt;
mod render;
mod upload;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use log::warn;
use planboard_core::db::open_db;
use planboard_core::{init_logging, CollectionStore, PlannerConfig, SqliteKeyValueStore};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = resolve_config(&cli)?;

    if let Err(err) = init_logging(config.log_level, &config.log_dir.to_string_lossy()) {
        eprintln!("warning: file logging disabled: {err}");
    }

    config
        .ensure_db_dir()
        .with_context(|| format!("failed to create `{}`", config.db_path.display()))?;
    let conn = open_db(&config.db_path)
        .with_context(|| format!("failed to open `{}`", config.db_path.display()))?;
    let store = CollectionStore::new(SqliteKeyValueStore::try_new(&conn)?);

    let output = commands::run(store, cli.command).inspect_err(|err| {
        warn!("event=cli_command module=cli status=error error={err}");
    })?;
    print!("{output}");
    Ok(())
}

fn resolve_config(cli: &Cli) -> Result<PlannerConfig> {
    let mut config = PlannerConfig::from_env().map_err(anyhow::Error::msg)?;
    if let Some(db) = &cli.db {
        let absolute = if db.is_absolute() {
            db.clone()
        } else {
            std::env::current_dir()
                .context("failed to read current directory")?
                .join(db)
        };
        config = config.with_db_path(absolute);
    }
    if let Some(level) = &cli.log_level {
        config = config.with_log_level(level).map_err(anyhow::Error::msg)?;
    }
    Ok(config)
}
