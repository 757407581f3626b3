//! Calculation orchestration.
//!
//! Groups the roster by person, runs each person through the segmentation
//! pipeline with their own ledger, and assembles the final vacancy report.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;

use crate::config::EngineConfig;
use crate::error::EngineResult;
use crate::models::{OutputSegment, Person, PayslipFacts, SickInterval};

use super::reconciliation::{build_report, VacancyReport};
use super::segment_merger::merge_person;

/// Groups roster rows into per-person inputs.
///
/// Intervals keep their arrival order within each person; ordering is
/// validated per person during segmentation. The starting allowance comes
/// from the person's payslip override when present, otherwise from the
/// configured default.
pub fn partition_roster(
    roster: Vec<SickInterval>,
    facts: &[PayslipFacts],
    default_allowance: Decimal,
) -> Vec<Person> {
    let overrides: BTreeMap<&str, Decimal> = facts
        .iter()
        .filter_map(|f| {
            f.starting_allowance_override
                .map(|a| (f.person_ref.as_str(), a))
        })
        .collect();

    let mut grouped: BTreeMap<String, Vec<SickInterval>> = BTreeMap::new();
    for interval in roster {
        grouped
            .entry(interval.person_ref.clone())
            .or_default()
            .push(interval);
    }

    grouped
        .into_iter()
        .map(|(person_ref, intervals)| {
            let starting_allowance = overrides
                .get(person_ref.as_str())
                .copied()
                .unwrap_or(default_allowance);
            Person {
                person_ref,
                intervals,
                starting_allowance,
            }
        })
        .collect()
}

/// Runs the full calculation over a roster.
///
/// Partitions the roster by person, segments each person's sick time, and
/// builds the vacancy report with payslip reconciliation. Fails on the
/// first person whose input violates ordering or hour conservation.
///
/// # Example
///
/// ```no_run
/// use vakans_engine::calculation::run_calculation;
/// use vakans_engine::config::ConfigLoader;
///
/// let loader = ConfigLoader::load("./config/default").unwrap();
/// let report = run_calculation(loader.config(), &[], vec![], &[]).unwrap();
/// assert!(report.detail.is_empty());
/// ```
pub fn run_calculation(
    config: &EngineConfig,
    extra_holidays: &[NaiveDate],
    roster: Vec<SickInterval>,
    facts: &[PayslipFacts],
) -> EngineResult<VacancyReport> {
    let calendar = config.holiday_calendar(extra_holidays);
    let persons = partition_roster(roster, facts, config.settings().default_allowance_hours);

    info!(
        persons = persons.len(),
        extra_holidays = extra_holidays.len(),
        "starting vacancy calculation"
    );

    let mut segments: Vec<OutputSegment> = Vec::new();
    for person in &persons {
        segments.extend(merge_person(person, &calendar)?);
    }

    let report = build_report(
        segments,
        facts,
        config.settings().reconciliation_tolerance_hours,
    );

    info!(
        detail_rows = report.detail.len(),
        discrepancies = report.discrepancies.len(),
        "vacancy calculation complete"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{CalendarConfig, EngineSettings};
    use crate::models::{ObClass, PaymentStatus};
    use chrono::NaiveDateTime;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(
            &format!("{} {}", date_str, time_str),
            "%Y-%m-%d %H:%M:%S",
        )
        .unwrap()
    }

    fn make_date(date_str: &str) -> NaiveDate {
        NaiveDate::parse_from_str(date_str, "%Y-%m-%d").unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn config() -> EngineConfig {
        EngineConfig::new(
            CalendarConfig {
                holidays: vec![make_date("2025-05-01")],
            },
            EngineSettings {
                default_allowance_hours: dec("8"),
                reconciliation_tolerance_hours: dec("0.01"),
            },
        )
    }

    fn interval(person: &str, date_str: &str, start: &str, end: &str) -> SickInterval {
        SickInterval::new(
            person.to_string(),
            make_date(date_str),
            make_datetime(date_str, start),
            make_datetime(date_str, end),
            false,
        )
        .unwrap()
    }

    #[test]
    fn test_partition_groups_by_person() {
        let persons = partition_roster(
            vec![
                interval("bo", "2025-03-11", "08:00:00", "10:00:00"),
                interval("anna", "2025-03-11", "08:00:00", "10:00:00"),
                interval("anna", "2025-03-12", "08:00:00", "10:00:00"),
            ],
            &[],
            dec("8"),
        );
        assert_eq!(persons.len(), 2);
        assert_eq!(persons[0].person_ref, "anna");
        assert_eq!(persons[0].intervals.len(), 2);
        assert_eq!(persons[1].person_ref, "bo");
    }

    #[test]
    fn test_partition_applies_allowance_override() {
        let facts = vec![PayslipFacts {
            person_ref: "anna".to_string(),
            karens_hours_registered: Decimal::ZERO,
            long_term_hours_registered: Decimal::ZERO,
            starting_allowance_override: Some(dec("2.5")),
        }];
        let persons = partition_roster(
            vec![
                interval("anna", "2025-03-11", "08:00:00", "10:00:00"),
                interval("bo", "2025-03-11", "08:00:00", "10:00:00"),
            ],
            &facts,
            dec("8"),
        );
        assert_eq!(persons[0].starting_allowance, dec("2.5"));
        assert_eq!(persons[1].starting_allowance, dec("8"));
    }

    #[test]
    fn test_run_calculation_empty_roster() {
        let report = run_calculation(&config(), &[], vec![], &[]).unwrap();
        assert!(report.detail.is_empty());
        assert!(report.summary.is_empty());
        assert!(report.discrepancies.is_empty());
    }

    #[test]
    fn test_run_calculation_independent_ledgers() {
        // Each person has their own 8 h allowance; neither is exhausted by
        // the other's hours
        let report = run_calculation(
            &config(),
            &[],
            vec![
                interval("anna", "2025-03-11", "08:00:00", "14:00:00"),
                interval("bo", "2025-03-11", "08:00:00", "14:00:00"),
            ],
            &[],
        )
        .unwrap();
        assert!(report
            .detail
            .iter()
            .all(|s| s.payment_status == PaymentStatus::Karens));
    }

    #[test]
    fn test_run_calculation_extra_holidays() {
        // 2025-03-11 is a plain Tuesday unless declared a holiday
        let report = run_calculation(
            &config(),
            &[make_date("2025-03-11")],
            vec![interval("anna", "2025-03-11", "10:00:00", "12:00:00")],
            &[],
        )
        .unwrap();
        assert_eq!(report.detail[0].ob_class, ObClass::HolidayOb);
    }

    #[test]
    fn test_run_calculation_is_deterministic() {
        // Two runs over the same multi-person roster with fresh ledgers
        // must serialize to identical reports
        let roster = || {
            vec![
                interval("bo", "2025-03-14", "18:00:00", "21:00:00"),
                interval("anna", "2025-03-11", "08:00:00", "14:00:00"),
                interval("anna", "2025-03-12", "08:00:00", "14:00:00"),
                interval("cia", "2025-03-15", "06:00:00", "18:00:00"),
            ]
        };
        let facts = vec![PayslipFacts {
            person_ref: "anna".to_string(),
            karens_hours_registered: dec("8"),
            long_term_hours_registered: Decimal::ZERO,
            starting_allowance_override: None,
        }];

        let first = run_calculation(&config(), &[], roster(), &facts).unwrap();
        let second = run_calculation(&config(), &[], roster(), &facts).unwrap();

        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_run_calculation_rejects_overlap() {
        let result = run_calculation(
            &config(),
            &[],
            vec![
                interval("anna", "2025-03-11", "08:00:00", "12:00:00"),
                interval("anna", "2025-03-11", "10:00:00", "14:00:00"),
            ],
            &[],
        );
        assert!(result.is_err());
    }
}
