use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::export::ExportLogic;
use crate::sync::SyncReconciler;
use crate::utils::path::expand_tilde;
use tracing::debug;

pub async fn handle(cmd: &Commands, cfg: &Config, sync: &SyncReconciler) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = cmd
    {
        let store = LocalStore::open(&cfg.database)?;
        let logs = sync.load_logs(&store).await?;
        let file = expand_tilde(file).to_string_lossy().to_string();
        let n = ExportLogic::export(&logs, format, &file, range.as_deref(), *force)?;
        debug!(entries = n, format = format.as_str(), "export finished");
    }
    Ok(())
}
