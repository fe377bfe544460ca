pub mod add;
pub mod clock;
pub mod config;
pub mod del;
pub mod export;
pub mod init;
pub mod list;
pub mod summary;
pub mod sync;
pub mod watch;

use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::models::work_log::WorkLog;
use crate::sync::SyncReconciler;

/// Persist the log collection locally, then mirror it in the background.
pub(crate) fn commit_logs(
    store: &LocalStore,
    sync: &SyncReconciler,
    logs: &[WorkLog],
) -> AppResult<()> {
    store.save_logs(logs)?;
    sync.mirror_logs(logs);
    Ok(())
}
