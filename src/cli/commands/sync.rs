use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::LocalStore;
use crate::errors::{AppError, AppResult};
use crate::models::session::SessionState;
use crate::sync::SyncReconciler;
use crate::ui::messages::{info, success};

/// Handle the `sync` command.
///
/// Pulling goes through the regular load path, so the remote wins whenever
/// it answers. `--push` overwrites the remote with the local cache instead.
pub async fn handle(cmd: &Commands, cfg: &Config, sync: &SyncReconciler) -> AppResult<()> {
    let Commands::Sync { push } = cmd else {
        return Ok(());
    };

    let Some(target) = sync.describe() else {
        return Err(AppError::Config(
            "no remote store configured (add a 'remote' section to the config)".into(),
        ));
    };

    let store = LocalStore::open(&cfg.database)?;

    if *push {
        let session = store.load_session()?;
        let logs = store.load_logs()?;
        sync.push_all(session.as_ref(), &logs).await?;
        success(format!(
            "Pushed {} work logs and the session state to {}.",
            logs.len(),
            target
        ));
        return Ok(());
    }

    info(format!("Reading from {}...", target));
    let logs = sync.load_logs(&store).await?;
    let session = sync.load_session(&store).await?;
    success(format!(
        "Synchronized: {} work logs, session {}.",
        logs.len(),
        SessionState::of(session.as_ref())
    ));

    Ok(())
}
