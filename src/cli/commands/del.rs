use crate::cli::commands::add::short_id;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::LocalStore;
use crate::errors::{AppError, AppResult};
use crate::sync::SyncReconciler;
use crate::ui::messages::{ask_confirmation, info, success};

/// Handle the `del` command
pub async fn handle(cmd: &Commands, cfg: &Config, sync: &SyncReconciler) -> AppResult<()> {
    if let Commands::Del { id, yes } = cmd {
        let store = LocalStore::open(&cfg.database)?;
        let logs = sync.load_logs(&store).await?;

        let matches: Vec<_> = logs
            .iter()
            .filter(|l| l.id == *id || (id.len() >= 4 && l.id.starts_with(id.as_str())))
            .collect();
        let [target] = matches.as_slice() else {
            return Err(AppError::LogNotFound(id.clone()));
        };

        let prompt = format!(
            "Delete entry {} ({} {} → {}, pay {})? This action is irreversible.",
            short_id(&target.id),
            target.date_str(),
            target.start_time,
            target.end_time,
            target.total_pay
        );

        if !*yes && !ask_confirmation(&prompt) {
            info("Operation cancelled.");
            return Ok(());
        }

        let (removed, remaining) = store.delete_log(&target.id)?;
        sync.mirror_logs(&remaining);

        success(format!(
            "Entry {} for {} has been deleted.",
            short_id(&removed.id),
            removed.date_str()
        ));
    }

    Ok(())
}
