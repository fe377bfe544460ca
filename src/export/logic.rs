// src/export/logic.rs

use crate::errors::{AppError, AppResult};
use crate::export::ExportFormat;
use crate::export::fs_utils::ensure_writable;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::WorkLogExport;
use crate::export::range::filter_logs;
use crate::export::text::export_text;
use crate::models::work_log::WorkLog;
use crate::ui::messages::warning;
use crate::utils::date::month_name;
use std::path::Path;

/// High level export entry point.
pub struct ExportLogic;

impl ExportLogic {
    /// Export work logs.
    ///
    /// - `file`: absolute path of the output file
    /// - `range`: `None`, `"all"` or a period understood by
    ///   [`parse_range`](crate::export::range::parse_range)
    ///
    /// Returns the number of exported entries.
    pub fn export(
        logs: &[WorkLog],
        format: &ExportFormat,
        file: &str,
        range: Option<&str>,
        force: bool,
    ) -> AppResult<usize> {
        let path = Path::new(file);

        if !path.is_absolute() {
            return Err(AppError::Export(format!(
                "output file path must be absolute: {file}"
            )));
        }

        let selected = filter_logs(logs, range)?;
        if selected.is_empty() {
            warning("No work logs found for the selected range.");
            return Ok(0);
        }

        ensure_writable(path, force)?;

        let rows: Vec<WorkLogExport> = selected.iter().map(WorkLogExport::from).collect();

        match format {
            ExportFormat::Csv => export_csv(&rows, path)?,
            ExportFormat::Json => export_json(&rows, path)?,
            ExportFormat::Txt => export_text(&rows, path, &build_title(range))?,
        }

        Ok(rows.len())
    }
}

/// Report title for the selected period.
fn build_title(period: Option<&str>) -> String {
    let Some(p) = period.filter(|p| !p.eq_ignore_ascii_case("all")) else {
        return "Work logs".to_string();
    };

    match p.len() {
        4 => format!("Work logs for year {p}"),
        7 => {
            let month = p.get(5..7).and_then(|m| m.parse().ok()).unwrap_or(0);
            format!("Work logs for {} {}", month_name(month), p.get(0..4).unwrap_or(p))
        }
        10 => format!("Work logs for {p}"),
        _ => match p.split_once(':') {
            Some((from, to)) => format!("Work logs from {from} to {to}"),
            None => "Work logs".to_string(),
        },
    }
}
