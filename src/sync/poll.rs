//! Periodic re-read of the session while it is active.

use std::time::Duration;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::models::session::ActiveSession;
use crate::sync::reconcile::{RemoteRead, SyncReconciler, should_adopt_remote};

/// What happened on one poll tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollEvent {
    /// Nothing changed.
    Unchanged,
    /// The remote (or local cache, when unbound) replaced the session.
    Adopted,
    /// The session ended elsewhere.
    Ended,
}

/// Poll until the session ends or `cancel` fires, returning the last known
/// session. `on_tick` sees the current session after every tick.
///
/// Without a remote binding the local cache is re-read instead, so a
/// clock-out from another process on the same machine is still noticed.
/// Failed reads are skipped until the next tick.
pub async fn poll_session<F>(
    sync: &SyncReconciler,
    store: &LocalStore,
    mut current: Option<ActiveSession>,
    period: Duration,
    cancel: CancellationToken,
    mut on_tick: F,
) -> AppResult<Option<ActiveSession>>
where
    F: FnMut(PollEvent, Option<&ActiveSession>),
{
    let mut interval = tokio::time::interval(period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    while current.is_some() {
        tokio::select! {
            _ = cancel.cancelled() => {
                debug!("session poll cancelled");
                break;
            }
            _ = interval.tick() => {}
        }

        let observed = match sync.fetch_session().await {
            Some(read) => read,
            None => match store.load_session()? {
                Some(s) => RemoteRead::Present(s),
                None => RemoteRead::Cleared,
            },
        };

        let event = match observed {
            RemoteRead::Present(remote) if should_adopt_remote(current.as_ref(), Some(&remote)) => {
                info!(status = remote.status.as_str(), "adopting polled session state");
                store.save_session(Some(&remote))?;
                current = Some(remote);
                PollEvent::Adopted
            }
            RemoteRead::Cleared => {
                info!("session ended elsewhere");
                store.save_session(None)?;
                current = None;
                PollEvent::Ended
            }
            _ => PollEvent::Unchanged,
        };

        on_tick(event, current.as_ref());
    }

    Ok(current)
}
