//! rPaylogger library root.
//! Exposes the CLI parser, the high-level run() function and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod sync;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;
use sync::SyncReconciler;
use tracing_subscriber::EnvFilter;

/// Environment variable overriding the configured log filter.
pub const LOG_ENV: &str = "RPAYLOGGER_LOG";

/// Central command dispatcher
pub async fn dispatch(cli: &Cli, cfg: &Config, sync: &SyncReconciler) -> AppResult<()> {
    use crate::cli::commands;

    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::In
        | Commands::Break
        | Commands::Resume
        | Commands::Out { .. }
        | Commands::Status => commands::clock::handle(&cli.command, cfg, sync).await,
        Commands::Add { .. } => commands::add::handle(&cli.command, cfg, sync).await,
        Commands::List { .. } => commands::list::handle(&cli.command, cfg, sync).await,
        Commands::Summary { .. } => commands::summary::handle(&cli.command, cfg, sync).await,
        Commands::Del { .. } => commands::del::handle(&cli.command, cfg, sync).await,
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg, sync).await,
        Commands::Sync { .. } => commands::sync::handle(&cli.command, cfg, sync).await,
        Commands::Watch => commands::watch::handle(cfg, sync).await,
    }
}

/// Diagnostics go to stderr so command output stays parseable.
fn init_tracing(default_level: &str) {
    let filter = EnvFilter::try_from_env(LOG_ENV)
        .or_else(|_| EnvFilter::try_new(default_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// Entry point used by main.rs
pub async fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    init_tracing(&cfg.log_level);

    let sync = SyncReconciler::from_config(&cfg)?;
    let result = dispatch(&cli, &cfg, &sync).await;

    // pending mirror writes get a bounded chance to land, even on error
    sync.flush().await;

    result
}
