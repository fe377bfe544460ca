use crate::cli::commands::commit_logs;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::manual::{BreakInput, ManualEntry};
use crate::db::store::LocalStore;
use crate::errors::{AppError, AppResult};
use crate::sync::SyncReconciler;
use crate::ui::messages::success;
use crate::utils::date::parse_date;
use crate::utils::formatting::format_rate;
use crate::utils::time::format_minutes;

/// Handle the `add` command: a manually typed shift.
pub async fn handle(cmd: &Commands, cfg: &Config, sync: &SyncReconciler) -> AppResult<()> {
    if let Commands::Add {
        date,
        start,
        end,
        break_minutes,
        break_start,
        break_end,
        rate,
        note,
    } = cmd
    {
        let date = parse_date(date).ok_or_else(|| AppError::InvalidDate(date.clone()))?;

        let brk = match (break_minutes, break_start, break_end) {
            (Some(m), _, _) => BreakInput::Minutes(*m),
            (None, Some(s), Some(e)) => BreakInput::Window {
                start: s.clone(),
                end: e.clone(),
            },
            _ => BreakInput::None,
        };

        let log = ManualEntry {
            date,
            start: start.clone(),
            end: end.clone(),
            brk,
            hourly_rate: rate.unwrap_or(cfg.hourly_rate),
            note: note.clone(),
        }
        .into_work_log()?;

        let store = LocalStore::open(&cfg.database)?;
        let mut logs = sync.load_logs(&store).await?;
        logs.push(log.clone());
        commit_logs(&store, sync, &logs)?;

        success(format!(
            "Added {} {} → {} ({} worked, break {} min) @ {} = {} [id {}]",
            log.date_str(),
            log.start_time,
            log.end_time,
            format_minutes(log.total_minutes),
            log.break_minutes,
            format_rate(log.hourly_rate),
            log.total_pay,
            short_id(&log.id)
        ));
    }

    Ok(())
}

pub(crate) fn short_id(id: &str) -> &str {
    id.get(..8).unwrap_or(id)
}
