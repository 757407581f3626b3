//! Error types for the Vacancy and Karens Calculation Engine.
//!
//! This module provides strongly-typed errors using the `thiserror` crate
//! for all error conditions that can occur during vacancy calculation.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

/// The main error type for the Vacancy and Karens Calculation Engine.
///
/// All operations in the engine return this error type, making it easy
/// to handle errors consistently throughout the application.
///
/// # Example
///
/// ```
/// use vakans_engine::error::EngineError;
///
/// let error = EngineError::ConfigNotFound {
///     path: "/missing/file.yaml".to_string(),
/// };
/// assert_eq!(error.to_string(), "Configuration file not found: /missing/file.yaml");
/// ```
#[derive(Debug, Error)]
pub enum EngineError {
    /// Configuration file was not found at the specified path.
    #[error("Configuration file not found: {path}")]
    ConfigNotFound {
        /// The path that was not found.
        path: String,
    },

    /// Configuration file could not be parsed.
    #[error("Failed to parse configuration file '{path}': {message}")]
    ConfigParseError {
        /// The path to the file that failed to parse.
        path: String,
        /// A description of the parse error.
        message: String,
    },

    /// A sick-leave interval was invalid or contained inconsistent data.
    ///
    /// Raised for zero or negative durations, intervals that spill past the
    /// end of their calendar date, or reported hours that do not match the
    /// interval's actual duration.
    #[error("Invalid interval for person '{person_ref}' on {date}: {message}")]
    InvalidInterval {
        /// The person the interval belongs to.
        person_ref: String,
        /// The date of the invalid interval.
        date: NaiveDate,
        /// A description of what made the interval invalid.
        message: String,
    },

    /// A person's interval sequence violated the required ordering.
    ///
    /// The karens ledger consumes allowance strictly chronologically, so
    /// unsorted or overlapping intervals for one person are rejected before
    /// any ledger state is mutated.
    #[error("Roster order violation for person '{person_ref}': {message}")]
    RosterOrderViolation {
        /// The person whose interval sequence is invalid.
        person_ref: String,
        /// A description of the ordering violation.
        message: String,
    },

    /// Segment hours failed to reconcile with their source interval.
    ///
    /// This is an internal defect of the segmentation engine, never a
    /// user-facing input error: the segments produced from an interval must
    /// sum to the interval's hours within tolerance.
    #[error(
        "Hours mismatch for person '{person_ref}' on {date}: interval has {expected} h, segments sum to {actual} h"
    )]
    HoursMismatch {
        /// The person being processed when the invariant broke.
        person_ref: String,
        /// The date of the source interval.
        date: NaiveDate,
        /// The source interval's hours.
        expected: Decimal,
        /// The sum of the produced segments' hours.
        actual: Decimal,
    },
}

/// A type alias for Results that return EngineError.
pub type EngineResult<T> = Result<T, EngineError>;
