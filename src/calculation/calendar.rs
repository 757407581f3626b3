//! Holiday calendar and date classification.
//!
//! This module resolves, for any date, whether it is a weekend, a designated
//! holiday, or a day immediately before/after a holiday or weekend. The OB
//! classifier selects its daily timetable from these flags.

use std::collections::HashSet;

use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Calendar classification of a single date.
///
/// The flags are computed independently: a Saturday that precedes a Sunday
/// reports both `is_weekend` and `is_day_before_holiday_or_weekend`. The OB
/// timetable precedence (holiday/weekend first) is applied by the consumer,
/// not here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateClass {
    /// The date is a Saturday or Sunday.
    pub is_weekend: bool,
    /// The date is a designated holiday.
    pub is_holiday: bool,
    /// The following date is a holiday or weekend day.
    pub is_day_before_holiday_or_weekend: bool,
    /// The preceding date was a holiday or weekend day.
    pub is_day_after_holiday_or_weekend: bool,
}

/// Pure lookup table of designated holidays plus weekend logic.
///
/// Safe to share read-only across workers; classification has no state and
/// no side effects.
///
/// # Example
///
/// ```
/// use vakans_engine::calculation::HolidayCalendar;
/// use chrono::NaiveDate;
///
/// let calendar = HolidayCalendar::new([NaiveDate::from_ymd_opt(2025, 5, 1).unwrap()]);
/// // 2025-05-01 is a Thursday
/// let flags = calendar.classify(NaiveDate::from_ymd_opt(2025, 5, 1).unwrap());
/// assert!(flags.is_holiday);
/// assert!(!flags.is_weekend);
/// ```
#[derive(Debug, Clone, Default)]
pub struct HolidayCalendar {
    holidays: HashSet<NaiveDate>,
}

impl HolidayCalendar {
    /// Creates a calendar from an iterator of holiday dates.
    pub fn new(holidays: impl IntoIterator<Item = NaiveDate>) -> Self {
        Self {
            holidays: holidays.into_iter().collect(),
        }
    }

    /// Returns true if the date is a designated holiday.
    pub fn is_holiday(&self, date: NaiveDate) -> bool {
        self.holidays.contains(&date)
    }

    /// Returns true if the date is a Saturday or Sunday.
    pub fn is_weekend(&self, date: NaiveDate) -> bool {
        matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Returns true if the date is a weekend day or a designated holiday.
    fn is_rest_day(&self, date: NaiveDate) -> bool {
        self.is_weekend(date) || self.is_holiday(date)
    }

    /// Classifies a date into its calendar flags.
    ///
    /// Unknown dates report all flags false except the computed weekend
    /// status; there are no error conditions.
    pub fn classify(&self, date: NaiveDate) -> DateClass {
        let next = date.checked_add_days(Days::new(1));
        let prev = date.checked_sub_days(Days::new(1));

        DateClass {
            is_weekend: self.is_weekend(date),
            is_holiday: self.is_holiday(date),
            is_day_before_holiday_or_weekend: next.is_some_and(|d| self.is_rest_day(d)),
            is_day_after_holiday_or_weekend: prev.is_some_and(|d| self.is_rest_day(d)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn swedish_2025() -> HolidayCalendar {
        HolidayCalendar::new([
            make_date("2025-05-01"), // Thursday
            make_date("2025-05-29"), // Thursday (Ascension)
            make_date("2025-06-06"), // Friday (National Day)
            make_date("2025-12-25"),
            make_date("2025-12-26"),
        ])
    }

    #[test]
    fn test_weekday_has_no_flags() {
        // 2025-03-11 is a Tuesday between plain weekdays
        let flags = swedish_2025().classify(make_date("2025-03-11"));
        assert!(!flags.is_weekend);
        assert!(!flags.is_holiday);
        assert!(!flags.is_day_before_holiday_or_weekend);
        assert!(!flags.is_day_after_holiday_or_weekend);
    }

    #[test]
    fn test_saturday_is_weekend() {
        // 2025-03-15 is a Saturday
        let flags = swedish_2025().classify(make_date("2025-03-15"));
        assert!(flags.is_weekend);
        assert!(!flags.is_holiday);
        // Sunday follows
        assert!(flags.is_day_before_holiday_or_weekend);
    }

    #[test]
    fn test_friday_is_day_before_weekend() {
        // 2025-03-14 is a Friday
        let flags = swedish_2025().classify(make_date("2025-03-14"));
        assert!(!flags.is_weekend);
        assert!(flags.is_day_before_holiday_or_weekend);
        assert!(!flags.is_day_after_holiday_or_weekend);
    }

    #[test]
    fn test_monday_is_day_after_weekend() {
        // 2025-03-17 is a Monday
        let flags = swedish_2025().classify(make_date("2025-03-17"));
        assert!(flags.is_day_after_holiday_or_weekend);
        assert!(!flags.is_day_before_holiday_or_weekend);
    }

    #[test]
    fn test_holiday_on_weekday() {
        // 2025-05-01 is a Thursday
        let flags = swedish_2025().classify(make_date("2025-05-01"));
        assert!(flags.is_holiday);
        assert!(!flags.is_weekend);
    }

    #[test]
    fn test_day_before_midweek_holiday() {
        // 2025-04-30 is a Wednesday before Första maj
        let flags = swedish_2025().classify(make_date("2025-04-30"));
        assert!(flags.is_day_before_holiday_or_weekend);
        assert!(!flags.is_holiday);
    }

    #[test]
    fn test_day_after_midweek_holiday() {
        // 2025-05-02 is a Friday after Första maj (and before a weekend)
        let flags = swedish_2025().classify(make_date("2025-05-02"));
        assert!(flags.is_day_after_holiday_or_weekend);
        assert!(flags.is_day_before_holiday_or_weekend);
    }

    #[test]
    fn test_unknown_date_reports_weekend_only() {
        let calendar = HolidayCalendar::default();
        // 2030-07-06 is a Saturday
        let flags = calendar.classify(make_date("2030-07-06"));
        assert!(flags.is_weekend);
        assert!(!flags.is_holiday);
    }

    #[test]
    fn test_classification_is_pure() {
        let calendar = swedish_2025();
        let d = make_date("2025-05-01");
        assert_eq!(calendar.classify(d), calendar.classify(d));
    }
}
