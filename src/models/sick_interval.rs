//! Sick-leave interval model.
//!
//! This module defines the [`SickInterval`] struct representing one
//! scheduled-but-absent shift block from the sick roster.

use chrono::{Days, NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Calculates the number of hours between two datetimes.
///
/// The result is second-accurate: `seconds / 3600` as a [`Decimal`].
///
/// # Example
///
/// ```
/// use vakans_engine::models::hours_between;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let start = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(9, 0, 0).unwrap();
/// let end = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap().and_hms_opt(17, 30, 0).unwrap();
/// assert_eq!(hours_between(start, end), Decimal::new(85, 1)); // 8.5
/// ```
pub fn hours_between(start: NaiveDateTime, end: NaiveDateTime) -> Decimal {
    let seconds = (end - start).num_seconds();
    Decimal::new(seconds, 0) / Decimal::new(3600, 0)
}

/// Represents one scheduled-but-absent shift block.
///
/// Intervals are half-open `[start, end)` and lie within a single calendar
/// date; a block that runs to midnight has `end` equal to 00:00 of the
/// following day. Shifts spilling past midnight must be pre-split by the
/// caller before reaching the engine.
///
/// # Example
///
/// ```
/// use vakans_engine::models::SickInterval;
/// use chrono::NaiveDate;
/// use rust_decimal::Decimal;
///
/// let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
/// let interval = SickInterval::new(
///     "198001011234",
///     date,
///     date.and_hms_opt(20, 0, 0).unwrap(),
///     date.and_hms_opt(22, 30, 0).unwrap(),
///     false,
/// ).unwrap();
/// assert_eq!(interval.hours, Decimal::new(25, 1)); // 2.5
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SickInterval {
    /// Opaque person identifier, already resolved by the caller.
    pub person_ref: String,
    /// The calendar date of the shift block.
    pub date: NaiveDate,
    /// The start of the block (inclusive).
    pub start: NaiveDateTime,
    /// The end of the block (exclusive).
    pub end: NaiveDateTime,
    /// The duration in hours; always equals `end - start`.
    pub hours: Decimal,
    /// Whether a substitute worker covered the block.
    pub substitute_present: bool,
}

impl SickInterval {
    /// Creates a sick interval, computing `hours` from the time range.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInterval`] if the duration is zero or
    /// negative, if `start` does not fall on `date`, or if `end` reaches past
    /// the midnight that closes `date`.
    pub fn new(
        person_ref: impl Into<String>,
        date: NaiveDate,
        start: NaiveDateTime,
        end: NaiveDateTime,
        substitute_present: bool,
    ) -> EngineResult<Self> {
        let person_ref = person_ref.into();

        if end <= start {
            return Err(EngineError::InvalidInterval {
                person_ref,
                date,
                message: "end time is not after start time".to_string(),
            });
        }
        if start.date() != date {
            return Err(EngineError::InvalidInterval {
                person_ref,
                date,
                message: format!("start time falls on {}, not on the interval date", start.date()),
            });
        }
        let next_midnight = date
            .checked_add_days(Days::new(1))
            .map(|d| d.and_time(NaiveTime::MIN));
        if next_midnight.is_some_and(|m| end > m) {
            return Err(EngineError::InvalidInterval {
                person_ref,
                date,
                message: "interval spills past midnight; pre-split it into same-day blocks"
                    .to_string(),
            });
        }

        let hours = hours_between(start, end);
        Ok(Self {
            person_ref,
            date,
            start,
            end,
            hours,
            substitute_present,
        })
    }

    /// Creates a sick interval from parsed roster data carrying its own
    /// reported hours figure.
    ///
    /// # Errors
    ///
    /// In addition to the checks of [`SickInterval::new`], returns
    /// [`EngineError::InvalidInterval`] if `reported_hours` differs from the
    /// actual duration by more than 1e-6 hours.
    pub fn with_reported_hours(
        person_ref: impl Into<String>,
        date: NaiveDate,
        start: NaiveDateTime,
        end: NaiveDateTime,
        reported_hours: Decimal,
        substitute_present: bool,
    ) -> EngineResult<Self> {
        let interval = Self::new(person_ref, date, start, end, substitute_present)?;
        let diff = (interval.hours - reported_hours).abs();
        if diff > Decimal::new(1, 6) {
            return Err(EngineError::InvalidInterval {
                person_ref: interval.person_ref,
                date,
                message: format!(
                    "reported hours {} do not match duration {}",
                    reported_hours, interval.hours
                ),
            });
        }
        Ok(interval)
    }
}
