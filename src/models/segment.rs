//! Output segment model and its classification enums.
//!
//! This module defines the [`OutputSegment`] struct, the unit of the final
//! vacancy report, together with the [`ObClass`] and [`PaymentStatus`]
//! enumerations attached to every segment.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Shift-premium classification for an instant in time.
///
/// Exactly one class applies to any instant of any date; the classes
/// partition the 24-hour day.
///
/// # Example
///
/// ```
/// use vakans_engine::models::ObClass;
///
/// let class = ObClass::Night;
/// assert_eq!(format!("{}", class), "Night");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObClass {
    /// Weekday daytime hours (06:00-19:00) - no premium.
    Day,
    /// Weekday evening hours (19:00-22:00).
    Evening,
    /// Weekday night hours (22:00-06:00).
    Night,
    /// Weekends, holidays, and the flanking evening/morning hours.
    HolidayOb,
}

impl std::fmt::Display for ObClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ObClass::Day => write!(f, "Day"),
            ObClass::Evening => write!(f, "Evening"),
            ObClass::Night => write!(f, "Night"),
            ObClass::HolidayOb => write!(f, "HolidayOb"),
        }
    }
}

/// Payment status of a segment under the karens rules.
///
/// `KarensAndLongTerm` only occurs once a person's cumulative sick-episode
/// length has crossed the 14-day threshold while karens allowance remains;
/// the two conditions track independently, so a segment can be `Paid` deep
/// into a long episode once the allowance is exhausted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Paid sick leave; no karens allowance consumed.
    Paid,
    /// Unpaid waiting-period time consuming the karens allowance.
    Karens,
    /// Karens consumption within the long-term (>14-day) regime.
    KarensAndLongTerm,
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Paid => write!(f, "Paid"),
            PaymentStatus::Karens => write!(f, "Karens"),
            PaymentStatus::KarensAndLongTerm => write!(f, "KarensAndLongTerm"),
        }
    }
}

/// A fully typed slice of a sick-leave interval.
///
/// The ordered segments produced from one [`SickInterval`](super::SickInterval)
/// are contiguous, non-overlapping, cover exactly the source range, and their
/// `hours` sum to the source interval's hours within 1e-6.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputSegment {
    /// The person this segment belongs to.
    pub person_ref: String,
    /// The calendar date of the parent interval.
    pub date: NaiveDate,
    /// The start of the segment (inclusive).
    pub start: NaiveDateTime,
    /// The end of the segment (exclusive).
    pub end: NaiveDateTime,
    /// The segment duration in hours.
    pub hours: Decimal,
    /// The OB class covering this segment.
    pub ob_class: ObClass,
    /// The payment status of this segment.
    pub payment_status: PaymentStatus,
    /// Whether a substitute covered the parent interval (copied unchanged).
    pub substitute_present: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ob_class_serialization() {
        assert_eq!(serde_json::to_string(&ObClass::Day).unwrap(), "\"day\"");
        assert_eq!(
            serde_json::to_string(&ObClass::HolidayOb).unwrap(),
            "\"holiday_ob\""
        );

        let deserialized: ObClass = serde_json::from_str("\"evening\"").unwrap();
        assert_eq!(deserialized, ObClass::Evening);
    }

    #[test]
    fn test_payment_status_serialization() {
        assert_eq!(
            serde_json::to_string(&PaymentStatus::KarensAndLongTerm).unwrap(),
            "\"karens_and_long_term\""
        );
        let deserialized: PaymentStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(deserialized, PaymentStatus::Paid);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(format!("{}", ObClass::Night), "Night");
        assert_eq!(format!("{}", PaymentStatus::Karens), "Karens");
    }

    #[test]
    fn test_output_segment_serialization_round_trip() {
        let date = NaiveDate::from_ymd_opt(2025, 3, 10).unwrap();
        let segment = OutputSegment {
            person_ref: "198001011234".to_string(),
            date,
            start: date.and_hms_opt(19, 0, 0).unwrap(),
            end: date.and_hms_opt(22, 0, 0).unwrap(),
            hours: Decimal::new(30, 1),
            ob_class: ObClass::Evening,
            payment_status: PaymentStatus::Karens,
            substitute_present: false,
        };

        let json = serde_json::to_string(&segment).unwrap();
        assert!(json.contains("\"ob_class\":\"evening\""));
        assert!(json.contains("\"payment_status\":\"karens\""));

        let deserialized: OutputSegment = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized, segment);
    }
}
