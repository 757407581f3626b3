//! Configuration types for vacancy calculation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::calculation::HolidayCalendar;

/// Holiday calendar configuration from calendar.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct CalendarConfig {
    /// The designated holiday dates.
    pub holidays: Vec<NaiveDate>,
}

/// Engine settings from engine.yaml.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineSettings {
    /// Starting karens allowance in hours applied to a person without a
    /// per-person override.
    pub default_allowance_hours: Decimal,
    /// Tolerance in hours when comparing computed hours against
    /// payslip-registered hours during reconciliation.
    pub reconciliation_tolerance_hours: Decimal,
}

/// The complete engine configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct EngineConfig {
    calendar: CalendarConfig,
    settings: EngineSettings,
}

impl EngineConfig {
    /// Creates a new EngineConfig from its component parts.
    pub fn new(calendar: CalendarConfig, settings: EngineSettings) -> Self {
        Self { calendar, settings }
    }

    /// Returns the configured holiday dates.
    pub fn holidays(&self) -> &[NaiveDate] {
        &self.calendar.holidays
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Builds a holiday calendar from the configured dates plus any
    /// caller-supplied additions.
    pub fn holiday_calendar(&self, extra_holidays: &[NaiveDate]) -> HolidayCalendar {
        HolidayCalendar::new(
            self.calendar
                .holidays
                .iter()
                .copied()
                .chain(extra_holidays.iter().copied()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn make_config() -> EngineConfig {
        EngineConfig::new(
            CalendarConfig {
                holidays: vec![make_date("2025-05-01"), make_date("2025-06-06")],
            },
            EngineSettings {
                default_allowance_hours: Decimal::new(80, 1),
                reconciliation_tolerance_hours: Decimal::new(1, 2),
            },
        )
    }

    #[test]
    fn test_holiday_calendar_includes_configured_dates() {
        let config = make_config();
        let calendar = config.holiday_calendar(&[]);
        assert!(calendar.is_holiday(make_date("2025-05-01")));
        assert!(!calendar.is_holiday(make_date("2025-05-02")));
    }

    #[test]
    fn test_holiday_calendar_includes_extra_dates() {
        let config = make_config();
        let calendar = config.holiday_calendar(&[make_date("2025-12-25")]);
        assert!(calendar.is_holiday(make_date("2025-12-25")));
        assert!(calendar.is_holiday(make_date("2025-06-06")));
    }

    #[test]
    fn test_settings_accessors() {
        let config = make_config();
        assert_eq!(
            config.settings().default_allowance_hours,
            Decimal::new(80, 1)
        );
        assert_eq!(config.holidays().len(), 2);
    }

    #[test]
    fn test_calendar_config_deserializes_from_yaml() {
        let yaml = "holidays:\n  - 2025-05-01\n  - 2025-06-06\n";
        let parsed: CalendarConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.holidays.len(), 2);
        assert_eq!(parsed.holidays[0], make_date("2025-05-01"));
    }

    #[test]
    fn test_settings_deserialize_from_yaml() {
        let yaml = "default_allowance_hours: 8.0\nreconciliation_tolerance_hours: 0.01\n";
        let parsed: EngineSettings = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(parsed.default_allowance_hours, Decimal::new(80, 1));
    }
}
