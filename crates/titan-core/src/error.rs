//! # Errors
//!
//! What the engine and its write-side validators can reject.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Errors by layer                                    │
//! │                                                                         │
//! │  titan-core errors (this file)                                         │
//! │  ├── CoreError        - Caller contract violations (bad date range)    │
//! │  └── ValidationError  - Input validation failures on the write path    │
//! │                                                                         │
//! │  titan-db errors (separate crate)                                      │
//! │  └── DbError          - Database operation failures                    │
//! │                                                                         │
//! │  titan-report errors (CLI)                                             │
//! │  └── ReportError      - What the operator sees                         │
//! │                                                                         │
//! │  ValidationError ──► DbError (insert) or CoreError (preset parsing)    │
//! │  CoreError / DbError ──► ReportError ──► stderr                        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## What Is NOT An Error
//! Bad data inside the records never fails a report. Malformed numbers become
//! zero, orphan items are skipped, a zero subtotal allocates no discount. Only
//! the caller handing us an impossible date window is an error.

use chrono::NaiveDate;
use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Contract violations by the caller of the engine.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The date window ends before it starts.
    ///
    /// ## When This Occurs
    /// - Date picker sent `start` after `end`
    /// - Caller swapped the arguments
    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    /// A date string could not be parsed as `YYYY-MM-DD`.
    #[error("Invalid {field} date: '{value}'")]
    InvalidDate { field: String, value: String },

    /// A preset key or other input failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised when records are written to the order store, never while reading
/// them back for a report.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Missing, or blank after trimming.
    #[error("{field} is required")]
    Required { field: String },

    /// Longer than `max` characters (not bytes).
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Zero or negative where only positive values make sense.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Unparseable amount or timestamp.
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// Unknown status, payment method or preset key.
    #[error("{field} must be one of: {allowed:?}")]
    NotAllowed { field: String, allowed: Vec<String> },
}

// =============================================================================
// Result Type Alias
// =============================================================================

pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
