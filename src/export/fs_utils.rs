// src/export/fs_utils.rs

use crate::errors::{AppError, AppResult};
use crate::ui::messages::{ask_confirmation, info};
use std::path::Path;

/// Check whether the output file may be created or overwritten.
///
/// - file missing → Ok
/// - file present and `force` → Ok
/// - file present otherwise → ask the user
pub(crate) fn ensure_writable(path: &Path, force: bool) -> AppResult<()> {
    if !path.exists() || force {
        return Ok(());
    }

    if ask_confirmation(&format!("The file '{}' already exists. Overwrite?", path.display())) {
        info("Existing file will be overwritten.");
        Ok(())
    } else {
        Err(AppError::Export(
            "export cancelled: existing file not overwritten".into(),
        ))
    }
}
