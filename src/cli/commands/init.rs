use crate::cli::parser::Cli;
use crate::config::Config;
use crate::db::migrate::{current_version, latest_version};
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};

/// Handle the `init` command
///
/// This initializes:
///  - the config directory (if missing)
///  - the configuration file (skipped in test mode)
///  - the SQLite database and its migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let cfg = Config::init_all(cli.db.clone(), cli.test)?;

    info("Initializing rPaylogger…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }
    println!("🗄️  Database   : {}", &cfg.database);

    let store = LocalStore::open(&cfg.database)?;
    let version = store.with_conn(current_version)?;

    success(format!(
        "Database initialized at {} (schema v{}/{}).",
        &cfg.database,
        version,
        latest_version()
    ));
    Ok(())
}
