use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::summary::{daily_summaries, monthly_summaries};
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::export::range::filter_logs;
use crate::sync::SyncReconciler;
use crate::ui::messages::{header, warning};
use crate::utils::date::month_name;
use crate::utils::mins2readable;
use crate::utils::table::{Column, Table};

/// Handle the `summary` command
pub async fn handle(cmd: &Commands, cfg: &Config, sync: &SyncReconciler) -> AppResult<()> {
    if let Commands::Summary { period, monthly } = cmd {
        let store = LocalStore::open(&cfg.database)?;
        let logs = sync.load_logs(&store).await?;
        let selected = filter_logs(&logs, period.as_deref())?;

        if selected.is_empty() {
            warning("No work logs found.");
            return Ok(());
        }

        let first = if *monthly { "MONTH" } else { "DATE" };
        let mut table = Table::new(vec![
            Column::left(first),
            Column::right("ENTRIES"),
            Column::right("WORKED"),
            Column::right("REG"),
            Column::right("OT1"),
            Column::right("OT2"),
            Column::right("BREAK"),
            Column::right("PAY"),
        ]);

        if *monthly {
            header("📊 Monthly summary");
            for m in monthly_summaries(&selected) {
                table.add_row(vec![
                    format!("{} {}", month_name(m.month), m.year),
                    format!("{} ({} days)", m.entries, m.days_worked),
                    mins2readable(m.total_minutes, false, true),
                    m.regular_minutes.to_string(),
                    m.overtime_level1_minutes.to_string(),
                    m.overtime_level2_minutes.to_string(),
                    m.break_minutes.to_string(),
                    m.total_pay.to_string(),
                ]);
            }
        } else {
            header("📊 Daily summary");
            for d in daily_summaries(&selected) {
                table.add_row(vec![
                    d.date.format("%Y-%m-%d").to_string(),
                    d.entries.to_string(),
                    mins2readable(d.total_minutes, false, true),
                    d.regular_minutes.to_string(),
                    d.overtime_level1_minutes.to_string(),
                    d.overtime_level2_minutes.to_string(),
                    d.break_minutes.to_string(),
                    d.total_pay.to_string(),
                ]);
            }
        }

        print!("{}", table.render());
    }

    Ok(())
}
