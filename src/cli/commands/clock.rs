use chrono::{DateTime, Local, Utc};

use crate::cli::commands::commit_logs;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::session::{ClockOutOutcome, SessionMachine};
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::models::session::{ActiveSession, SessionState};
use crate::models::work_log::WorkLog;
use crate::sync::SyncReconciler;
use crate::ui::messages::{ask_confirmation, info, success, warning};
use crate::utils::formatting::format_rate;
use crate::utils::time::{format_elapsed, format_minutes};

fn hhmm(t: DateTime<Utc>) -> String {
    t.with_timezone(&Local).format("%H:%M").to_string()
}

/// Handle `in`, `break`, `resume`, `out` and `status`.
pub async fn handle(cmd: &Commands, cfg: &Config, sync: &SyncReconciler) -> AppResult<()> {
    let store = LocalStore::open(&cfg.database)?;
    let session = sync.load_session(&store).await?;
    let mut machine = SessionMachine::new(session, cfg.billing_unit_minutes);
    let now = Utc::now();

    match cmd {
        Commands::In => {
            machine.clock_in(now)?;
            save_session(&store, sync, &machine)?;
            success(format!("Clocked in at {}.", hhmm(now)));
        }

        Commands::Break => {
            machine.start_break(now)?;
            save_session(&store, sync, &machine)?;
            success(format!("Break started at {}.", hhmm(now)));
        }

        Commands::Resume => {
            let started = machine.session().and_then(|s| s.break_start_time);
            machine.end_break(now)?;
            save_session(&store, sync, &machine)?;
            let took = started.map(|b| (now - b).num_milliseconds()).unwrap_or(0);
            success(format!(
                "Back to work at {} (break {}).",
                hhmm(now),
                format_elapsed(took)
            ));
        }

        Commands::Out { rate, force } => {
            let rate = rate.unwrap_or(cfg.hourly_rate);
            clock_out(&store, sync, &mut machine, now, rate, *force).await?;
        }

        Commands::Status => print_status(machine.session(), now, cfg),

        _ => {}
    }

    Ok(())
}

fn save_session(
    store: &LocalStore,
    sync: &SyncReconciler,
    machine: &SessionMachine,
) -> AppResult<()> {
    store.save_session(machine.session())?;
    sync.mirror_session(machine.session());
    Ok(())
}

async fn clock_out(
    store: &LocalStore,
    sync: &SyncReconciler,
    machine: &mut SessionMachine,
    now: DateTime<Utc>,
    rate: f64,
    force: bool,
) -> AppResult<()> {
    let outcome = match machine.clock_out(now, rate, force)? {
        ClockOutOutcome::NeedsConfirmation { raw_minutes, .. } => {
            warning(format!(
                "Only {} min worked: below the {} min billing unit, this entry pays 0.",
                raw_minutes,
                machine.billing_unit()
            ));
            if !ask_confirmation("Save it anyway?") {
                info("Clock-out cancelled; the session is still active.");
                return Ok(());
            }
            machine.clock_out(now, rate, true)?
        }
        done => done,
    };

    if let ClockOutOutcome::Finalized(log) = outcome {
        let mut logs = sync.load_logs(store).await?;
        logs.push(log.clone());
        commit_logs(store, sync, &logs)?;
        save_session(store, sync, machine)?;
        print_finalized(&log);
    }

    Ok(())
}

fn print_finalized(log: &WorkLog) {
    success(format!(
        "Clocked out: {} {} → {}, break {} min.",
        log.date_str(),
        log.start_time,
        log.end_time,
        log.break_minutes
    ));
    println!(
        "   Billable {} (regular {} / OT1 {} / OT2 {} min) @ {} = {}",
        format_minutes(log.total_minutes),
        log.regular_minutes,
        log.overtime_level1_minutes,
        log.overtime_level2_minutes,
        format_rate(log.hourly_rate),
        log.total_pay
    );
}

fn print_status(session: Option<&ActiveSession>, now: DateTime<Utc>, cfg: &Config) {
    let Some(s) = session else {
        info("No active session.");
        return;
    };

    let state = SessionState::of(Some(s));
    println!("⏱️  Status   : {}", state);
    println!("   Started  : {}", s.start_time.with_timezone(&Local).format("%Y-%m-%d %H:%M"));
    println!("   Worked   : {}", format_elapsed(s.work_ms_at(now)));
    println!("   Breaks   : {}", format_elapsed(s.break_ms_at(now)));
    if let Some(b) = s.break_start_time {
        println!("   On break since {}", hhmm(b));
    }
    println!("   Rate     : {}", format_rate(cfg.hourly_rate));
}
