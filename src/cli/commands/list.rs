use crate::cli::commands::add::short_id;
use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::store::LocalStore;
use crate::errors::AppResult;
use crate::export::range::filter_logs;
use crate::sync::SyncReconciler;
use crate::ui::messages::{header, warning};
use crate::utils::formatting::{bold, format_rate};
use crate::utils::mins2readable;
use crate::utils::table::{Column, Table};

/// Handle the `list` command
pub async fn handle(cmd: &Commands, cfg: &Config, sync: &SyncReconciler) -> AppResult<()> {
    if let Commands::List { period } = cmd {
        let store = LocalStore::open(&cfg.database)?;
        let logs = sync.load_logs(&store).await?;
        let selected = filter_logs(&logs, period.as_deref())?;

        if selected.is_empty() {
            warning("No work logs found.");
            return Ok(());
        }

        match period {
            Some(p) => header(format!("📅 Work logs for {}:", p)),
            None => header("📅 All work logs:"),
        }

        let mut table = Table::new(vec![
            Column::left("ID"),
            Column::left("DATE"),
            Column::left("IN"),
            Column::left("OUT"),
            Column::right("BREAK"),
            Column::right("WORKED"),
            Column::right("REG"),
            Column::right("OT1"),
            Column::right("OT2"),
            Column::right("RATE"),
            Column::right("PAY"),
            Column::left("NOTE"),
        ]);

        for l in &selected {
            table.add_row(vec![
                short_id(&l.id).to_string(),
                l.date_str(),
                l.start_time.clone(),
                l.end_time.clone(),
                l.break_minutes.to_string(),
                mins2readable(l.total_minutes, false, true),
                l.regular_minutes.to_string(),
                l.overtime_level1_minutes.to_string(),
                l.overtime_level2_minutes.to_string(),
                format_rate(l.hourly_rate),
                l.total_pay.to_string(),
                l.note.clone().unwrap_or_default(),
            ]);
        }

        print!("{}", table.render());

        let minutes: i64 = selected.iter().map(|l| l.total_minutes).sum();
        let pay: i64 = selected.iter().map(|l| l.total_pay).sum();
        println!(
            "\n{} {} entries, {} worked, total pay {}",
            bold("Total:"),
            selected.len(),
            mins2readable(minutes, false, false),
            pay
        );
    }

    Ok(())
}
