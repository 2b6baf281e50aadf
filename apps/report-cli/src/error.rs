//! # Report Errors
//!
//! Everything that can stop `titan-report` before it prints a summary.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         ReportError                                     │
//! │                                                                         │
//! │  Core ──────► bad --start/--end/--today/--preset (titan-core)           │
//! │  Db ────────► connection, migration or query failure (titan-db)         │
//! │  ConfigLoad ► unreadable or malformed report.toml                       │
//! │  InvalidConfig ► values that parse but make no sense                    │
//! │  Output ────► JSON serialisation of the snapshot                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;
use titan_core::CoreError;
use titan_db::DbError;

#[derive(Debug, Error)]
pub enum ReportError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Db(#[from] DbError),

    /// Config file could not be read or parsed.
    #[error("Failed to load report config: {0}")]
    ConfigLoad(String),

    #[error("Invalid report configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to write report: {0}")]
    Output(String),
}

pub type ReportResult<T> = Result<T, ReportError>;

impl From<std::io::Error> for ReportError {
    fn from(err: std::io::Error) -> Self {
        ReportError::ConfigLoad(err.to_string())
    }
}

impl From<toml::de::Error> for ReportError {
    fn from(err: toml::de::Error) -> Self {
        ReportError::ConfigLoad(err.to_string())
    }
}

impl From<serde_json::Error> for ReportError {
    fn from(err: serde_json::Error) -> Self {
        ReportError::Output(err.to_string())
    }
}
