//! Unified application error type.
//! All modules (db, core, sync, cli, utils) return AppError to keep the error
//! handling consistent and easy to manage.

use crate::models::session::SessionState;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Parsing / validation errors
    // ---------------------------
    #[error("Invalid date format: {0}")]
    InvalidDate(String),

    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid hourly rate: {0}")]
    InvalidRate(String),

    // ---------------------------
    // Session / pay logic errors
    // ---------------------------
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: SessionState,
    },

    #[error("No payable time: {0}")]
    ZeroDuration(String),

    #[error("No work log found with id {0}")]
    LogNotFound(String),

    // ---------------------------
    // Remote sync
    // ---------------------------
    #[error("Remote store unavailable: {0}")]
    RemoteUnavailable(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("Export error: {0}")]
    Export(String),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

pub type AppResult<T> = Result<T, AppError>;
