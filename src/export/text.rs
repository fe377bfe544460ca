// src/export/text.rs

use crate::errors::AppResult;
use crate::export::{WorkLogExport, notify_export_success};
use crate::ui::messages::info;
use crate::utils::formatting::format_rate;
use crate::utils::time::format_minutes;
use std::path::Path;

/// Plain-text report: one line per entry and a totals line.
pub fn render_report(title: &str, rows: &[WorkLogExport]) -> String {
    let mut out = format!("{title}\n{}\n", "=".repeat(title.chars().count()));

    for r in rows {
        out.push_str(&format!(
            "{} {}-{} break {}m | worked {} (reg {} / ot1 {} / ot2 {}) @ {} = {}",
            r.date,
            r.start_time,
            r.end_time,
            r.break_minutes,
            format_minutes(r.total_minutes),
            r.regular_minutes,
            r.overtime_level1_minutes,
            r.overtime_level2_minutes,
            format_rate(r.hourly_rate),
            r.total_pay,
        ));
        if !r.note.is_empty() {
            out.push_str(&format!(" | {}", r.note));
        }
        out.push('\n');
    }

    let minutes: i64 = rows.iter().map(|r| r.total_minutes).sum();
    let pay: i64 = rows.iter().map(|r| r.total_pay).sum();
    out.push_str(&format!(
        "\nTotal: {} entries, {} worked, pay {}\n",
        rows.len(),
        format_minutes(minutes),
        pay
    ));
    out
}

pub(crate) fn export_text(rows: &[WorkLogExport], path: &Path, title: &str) -> AppResult<()> {
    info(format!("Exporting text report: {}", path.display()));
    std::fs::write(path, render_report(title, rows))?;
    notify_export_success("Text", path);
    Ok(())
}
