use chrono::Utc;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::models::session::SessionState;
use crate::sync::SyncReconciler;
use crate::sync::poll::{PollEvent, poll_session};
use crate::ui::messages::{info, success, warning};
use crate::utils::time::format_elapsed;

/// Follow the active session until it ends elsewhere or Ctrl-C.
pub async fn handle(cfg: &Config, sync: &SyncReconciler) -> AppResult<()> {
    let store = LocalStore::open(&cfg.database)?;
    let session = sync.load_session(&store).await?;

    let Some(current) = session else {
        info("No active session to watch.");
        return Ok(());
    };

    let cancel = CancellationToken::new();
    let on_signal = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            on_signal.cancel();
        }
    });

    if !sync.is_bound() {
        warning("No remote configured: only changes made on this machine will show up.");
    }
    info(format!(
        "Watching session (every {}s, Ctrl-C to stop)...",
        sync.poll_interval().as_secs()
    ));

    let last = poll_session(
        sync,
        &store,
        Some(current),
        sync.poll_interval(),
        cancel,
        |event, s| {
            let now = Utc::now();
            match (event, s) {
                (PollEvent::Ended, _) | (_, None) => {}
                (PollEvent::Adopted, Some(s)) => println!(
                    "↻ {} (updated elsewhere), worked {}",
                    SessionState::of(Some(s)),
                    format_elapsed(s.work_ms_at(now))
                ),
                (PollEvent::Unchanged, Some(s)) => println!(
                    "  {}, worked {}",
                    SessionState::of(Some(s)),
                    format_elapsed(s.work_ms_at(now))
                ),
            }
        },
    )
    .await?;

    if last.is_none() {
        success("The session was closed on another device.");
    }

    Ok(())
}
