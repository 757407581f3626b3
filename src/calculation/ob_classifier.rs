//! OB premium classification of sick-leave time.
//!
//! Splits a time interval at the fixed OB timetable boundaries and assigns
//! each resulting span its premium class. Classification depends only on the
//! clock time and the calendar flags of the surrounding dates.

use chrono::{Days, NaiveDateTime, NaiveTime};
use rust_decimal::Decimal;

use crate::models::{hours_between, ObClass, SickInterval};

use super::calendar::HolidayCalendar;

/// A maximal run of interval time with a single OB class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObSpan {
    /// Span start, inclusive.
    pub start: NaiveDateTime,
    /// Span end, exclusive.
    pub end: NaiveDateTime,
    /// Span duration in hours.
    pub hours: Decimal,
    /// The premium class of every instant in the span.
    pub ob_class: ObClass,
}

/// Classifies a single instant into its OB premium class.
///
/// Precedence, highest first:
/// 1. Holiday or weekend dates carry holiday OB for the entire day.
/// 2. From 19:00 on the day before a holiday or weekend, holiday OB applies.
/// 3. Before 07:00 on the day after a holiday or weekend, holiday OB applies.
/// 4. Night OB between 22:00 and 06:00.
/// 5. Evening OB between 19:00 and 22:00.
/// 6. Day OB otherwise.
///
/// # Example
///
/// ```
/// use vakans_engine::calculation::{classify_instant, HolidayCalendar};
/// use vakans_engine::models::ObClass;
/// use chrono::NaiveDateTime;
///
/// let calendar = HolidayCalendar::default();
/// // Friday 2025-03-14 at 19:30 precedes a weekend
/// let t = NaiveDateTime::parse_from_str("2025-03-14 19:30", "%Y-%m-%d %H:%M").unwrap();
/// assert_eq!(classify_instant(t, &calendar), ObClass::HolidayOb);
/// ```
pub fn classify_instant(instant: NaiveDateTime, calendar: &HolidayCalendar) -> ObClass {
    let flags = calendar.classify(instant.date());
    let time = instant.time();

    if flags.is_holiday || flags.is_weekend {
        return ObClass::HolidayOb;
    }
    if flags.is_day_before_holiday_or_weekend && time >= evening_start() {
        return ObClass::HolidayOb;
    }
    if flags.is_day_after_holiday_or_weekend && time < day_start() {
        return ObClass::HolidayOb;
    }
    if time >= night_start() || time < night_end() {
        return ObClass::Night;
    }
    if time >= evening_start() {
        return ObClass::Evening;
    }
    ObClass::Day
}

/// Splits an interval at the OB timetable boundaries and classifies each
/// piece, merging adjacent pieces with the same class into maximal spans.
///
/// The span list partitions the interval exactly: spans are contiguous,
/// non-overlapping, and their hours sum to the interval's duration.
pub fn classify_interval(interval: &SickInterval, calendar: &HolidayCalendar) -> Vec<ObSpan> {
    let mut spans: Vec<ObSpan> = Vec::new();
    let mut cursor = interval.start;

    while cursor < interval.end {
        let boundary = next_boundary(cursor).min(interval.end);
        let ob_class = classify_instant(cursor, calendar);

        match spans.last_mut() {
            Some(last) if last.ob_class == ob_class => {
                last.end = boundary;
                last.hours = hours_between(last.start, boundary);
            }
            _ => spans.push(ObSpan {
                start: cursor,
                end: boundary,
                hours: hours_between(cursor, boundary),
                ob_class,
            }),
        }

        cursor = boundary;
    }

    spans
}

fn night_end() -> NaiveTime {
    NaiveTime::from_hms_opt(6, 0, 0).expect("valid timetable boundary")
}

fn day_start() -> NaiveTime {
    NaiveTime::from_hms_opt(7, 0, 0).expect("valid timetable boundary")
}

fn evening_start() -> NaiveTime {
    NaiveTime::from_hms_opt(19, 0, 0).expect("valid timetable boundary")
}

fn night_start() -> NaiveTime {
    NaiveTime::from_hms_opt(22, 0, 0).expect("valid timetable boundary")
}

/// Returns the first timetable boundary strictly after the given instant.
///
/// Boundaries are 06:00, 07:00, 19:00, 22:00 and the next midnight.
fn next_boundary(instant: NaiveDateTime) -> NaiveDateTime {
    let date = instant.date();
    let time = instant.time();

    for boundary in [night_end(), day_start(), evening_start(), night_start()] {
        if time < boundary {
            return date.and_time(boundary);
        }
    }

    date.checked_add_days(Days::new(1))
        .expect("date within supported range")
        .and_time(NaiveTime::MIN)
}
