//! Unified application error type.
//! All modules (store, sync, core, cli, utils) return AppError to keep the
//! error handling consistent and easy to manage.

use crate::sync::SyncError;
use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    #[error("Secret '{0}' is missing: set it in the config file or in the environment")]
    MissingSecret(&'static str),

    #[error("Invalid UTC offset: {0}")]
    InvalidOffset(String),

    // ---------------------------
    // Form validation
    // ---------------------------
    #[error("End KM cannot be less than Start KM! (start={start}, end={end})")]
    OdometerRange { start: u64, end: u64 },

    #[error("Please fill in {0}.")]
    MissingField(String),

    #[error("Invalid {field} '{value}'. Allowed values: {allowed}")]
    InvalidChoice {
        field: &'static str,
        value: String,
        allowed: String,
    },

    #[error("Invalid value for {field}: {reason}")]
    InvalidNumber { field: &'static str, reason: String },

    // ---------------------------
    // Photos
    // ---------------------------
    #[error("Photo error: {0}")]
    Photo(String),

    #[error("No photo matches '{0}'")]
    PhotoNotFound(String),

    // ---------------------------
    // Remote sync
    // ---------------------------
    #[error("Remote sync error: {0}")]
    Sync(#[from] SyncError),
}

impl AppError {
    /// True for errors caused by bad form input (recoverable, no state change).
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            AppError::OdometerRange { .. }
                | AppError::MissingField(_)
                | AppError::InvalidChoice { .. }
                | AppError::InvalidNumber { .. }
                | AppError::Photo(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
