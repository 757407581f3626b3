//! Per-person segmentation pipeline.
//!
//! Runs a person's validated intervals through OB classification and the
//! karens ledger, producing the final output segments and verifying that no
//! hours were created or lost along the way.

use rust_decimal::Decimal;
use tracing::warn;

use crate::error::{EngineError, EngineResult};
use crate::models::{OutputSegment, Person, SickInterval};

use super::calendar::HolidayCalendar;
use super::karens_ledger::KarensLedger;
use super::ob_classifier::classify_interval;

/// Largest tolerated difference between an interval's hours and the sum of
/// the hours of its segments.
const CONSERVATION_TOLERANCE: Decimal = Decimal::from_parts(1, 0, 0, false, 6);

/// Segments one person's sick-leave intervals.
///
/// Validates interval ordering, classifies each interval into OB spans,
/// resolves payment status through a fresh ledger seeded with the person's
/// starting allowance, and checks hour conservation per interval.
///
/// # Errors
///
/// Returns [`EngineError::RosterOrderViolation`] if the person's intervals
/// are unsorted or overlap, and [`EngineError::HoursMismatch`] if a
/// segmented interval fails the conservation check.
pub fn merge_person(
    person: &Person,
    calendar: &HolidayCalendar,
) -> EngineResult<Vec<OutputSegment>> {
    person.validate()?;

    let mut ledger = KarensLedger::new(person.starting_allowance);
    let mut segments = Vec::new();

    for interval in &person.intervals {
        let spans = classify_interval(interval, calendar);
        let resolved = ledger.consume(&spans);

        verify_conservation(interval, resolved.iter().map(|s| s.hours).sum())?;

        segments.extend(resolved.into_iter().map(|span| OutputSegment {
            person_ref: person.person_ref.clone(),
            date: interval.date,
            start: span.start,
            end: span.end,
            hours: span.hours,
            ob_class: span.ob_class,
            payment_status: span.payment_status,
            substitute_present: interval.substitute_present,
        }));
    }

    Ok(segments)
}

fn verify_conservation(interval: &SickInterval, segment_total: Decimal) -> EngineResult<()> {
    let delta = (interval.hours - segment_total).abs();
    if delta > CONSERVATION_TOLERANCE {
        warn!(
            person_ref = %interval.person_ref,
            date = %interval.date,
            expected = %interval.hours,
            actual = %segment_total,
            "segment hours diverge from interval hours"
        );
        return Err(EngineError::HoursMismatch {
            person_ref: interval.person_ref.clone(),
            date: interval.date,
            expected: interval.hours,
            actual: segment_total,
        });
    }
    Ok(())
}
