//! Per-person karens allowance tracking.
//!
//! The ledger consumes classified sick-leave spans in chronological order,
//! draining the person's karens allowance and counting distinct sick days.
//! Once the allowance is spent the remainder of the time is paid; once the
//! person has passed fourteen distinct sick days the karens hours switch to
//! the long-term regime.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::models::{hours_between, ObClass, PaymentStatus};

use super::ob_classifier::ObSpan;

/// Number of distinct sick days after which karens hours move to the
/// long-term regime.
const LONG_TERM_THRESHOLD_DAYS: u32 = 14;

/// A classified span with its payment status resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerSpan {
    /// Span start, inclusive.
    pub start: NaiveDateTime,
    /// Span end, exclusive.
    pub end: NaiveDateTime,
    /// Span duration in hours.
    pub hours: Decimal,
    /// The OB premium class carried over from classification.
    pub ob_class: ObClass,
    /// Whether the span draws on the karens allowance or is paid.
    pub payment_status: PaymentStatus,
}

/// Tracks one person's karens allowance and sick-day count.
///
/// The ledger is an explicit value: callers create one per person and feed
/// it that person's spans in chronological order. Nothing is shared between
/// persons.
///
/// # Example
///
/// ```
/// use vakans_engine::calculation::KarensLedger;
/// use rust_decimal::Decimal;
///
/// let ledger = KarensLedger::new(Decimal::new(80, 1));
/// assert_eq!(ledger.remaining_allowance(), Decimal::new(80, 1));
/// assert_eq!(ledger.cumulative_sick_days(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct KarensLedger {
    remaining_allowance: Decimal,
    cumulative_sick_days: u32,
    last_seen_date: Option<NaiveDate>,
}

impl KarensLedger {
    /// Creates a ledger with the given starting allowance in hours.
    pub fn new(starting_allowance: Decimal) -> Self {
        Self {
            remaining_allowance: starting_allowance.max(Decimal::ZERO),
            cumulative_sick_days: 0,
            last_seen_date: None,
        }
    }

    /// Returns the unspent karens allowance in hours.
    pub fn remaining_allowance(&self) -> Decimal {
        self.remaining_allowance
    }

    /// Returns the number of distinct calendar dates with sick time seen
    /// so far.
    pub fn cumulative_sick_days(&self) -> u32 {
        self.cumulative_sick_days
    }

    /// Returns true if karens hours are currently booked under the
    /// long-term regime.
    pub fn in_long_term_regime(&self) -> bool {
        self.cumulative_sick_days > LONG_TERM_THRESHOLD_DAYS
    }

    /// Consumes a batch of classified spans, resolving each span's payment
    /// status and splitting the span where the allowance runs out.
    ///
    /// Spans must arrive in chronological order across all calls on this
    /// ledger. The returned spans cover exactly the input time; a span that
    /// straddles the exhaustion instant comes back as two pieces that share
    /// a boundary. Zero-length spans are dropped without touching the
    /// ledger, never emitted.
    pub fn consume(&mut self, spans: &[ObSpan]) -> Vec<LedgerSpan> {
        let mut out = Vec::with_capacity(spans.len());

        for span in spans {
            if span.start == span.end {
                continue;
            }
            self.note_sick_day(span.start.date());

            if self.remaining_allowance.is_zero() {
                out.push(resolved(span.start, span.end, span.ob_class, PaymentStatus::Paid));
                continue;
            }

            let karens_status = if self.in_long_term_regime() {
                PaymentStatus::KarensAndLongTerm
            } else {
                PaymentStatus::Karens
            };

            if span.hours <= self.remaining_allowance {
                self.remaining_allowance -= span.hours;
                self.flush_residue();
                out.push(resolved(span.start, span.end, span.ob_class, karens_status));
                continue;
            }

            let cutoff = exhaustion_instant(span.start, self.remaining_allowance);
            self.remaining_allowance = Decimal::ZERO;

            if cutoff > span.start {
                out.push(resolved(span.start, cutoff, span.ob_class, karens_status));
            }
            if cutoff < span.end {
                out.push(resolved(cutoff, span.end, span.ob_class, PaymentStatus::Paid));
            }
        }

        out
    }

    /// Counts the date if it has not been seen yet. Dates arrive in
    /// non-decreasing order, so a single last-seen slot suffices.
    fn note_sick_day(&mut self, date: NaiveDate) {
        if self.last_seen_date != Some(date) {
            self.cumulative_sick_days += 1;
            self.last_seen_date = Some(date);
        }
    }

    /// Drops an allowance remainder too small to express as a whole second.
    ///
    /// An allowance large enough to overflow the seconds conversion is
    /// plainly not sub-second, so overflow keeps the allowance untouched.
    fn flush_residue(&mut self) {
        let seconds = self.remaining_allowance.checked_mul(Decimal::from(3600));
        if seconds.is_some_and(|s| s < Decimal::ONE) {
            self.remaining_allowance = Decimal::ZERO;
        }
    }

}

fn resolved(
    start: NaiveDateTime,
    end: NaiveDateTime,
    ob_class: ObClass,
    payment_status: PaymentStatus,
) -> LedgerSpan {
    LedgerSpan {
        start,
        end,
        hours: hours_between(start, end),
        ob_class,
        payment_status,
    }
}

/// Returns the instant at which the given allowance, started at `start`,
/// runs out. Rounded to whole seconds.
fn exhaustion_instant(start: NaiveDateTime, allowance_hours: Decimal) -> NaiveDateTime {
    let seconds = (allowance_hours * Decimal::from(3600))
        .round()
        .to_i64()
        .expect("allowance seconds fit in i64");
    start + Duration::seconds(seconds)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_datetime(date_str: &str, time_str: &str) -> NaiveDateTime {
        NaiveDateTime::parse_from_str(
            &format!("{} {}", date_str, time_str),
            "%Y-%m-%d %H:%M:%S",
        )
        .unwrap()
    }

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    fn span(date_str: &str, start: &str, end: &str, ob_class: ObClass) -> ObSpan {
        let s = make_datetime(date_str, start);
        let e = make_datetime(date_str, end);
        ObSpan {
            start: s,
            end: e,
            hours: hours_between(s, e),
            ob_class,
        }
    }

    #[test]
    fn test_span_within_allowance_is_karens() {
        let mut ledger = KarensLedger::new(dec("8"));
        let out = ledger.consume(&[span("2025-03-11", "08:00:00", "11:00:00", ObClass::Day)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].payment_status, PaymentStatus::Karens);
        assert_eq!(out[0].hours, dec("3"));
        assert_eq!(ledger.remaining_allowance(), dec("5"));
    }

    #[test]
    fn test_span_splits_at_exhaustion() {
        // 1.5 h allowance against a 3 h span: half karens, half paid
        let mut ledger = KarensLedger::new(dec("1.5"));
        let out = ledger.consume(&[span("2025-03-11", "08:00:00", "11:00:00", ObClass::Day)]);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].payment_status, PaymentStatus::Karens);
        assert_eq!(out[0].hours, dec("1.5"));
        assert_eq!(out[0].end, make_datetime("2025-03-11", "09:30:00"));
        assert_eq!(out[1].payment_status, PaymentStatus::Paid);
        assert_eq!(out[1].hours, dec("1.5"));
        assert_eq!(out[1].start, out[0].end);
        assert_eq!(ledger.remaining_allowance(), Decimal::ZERO);
    }

    #[test]
    fn test_exhausted_ledger_pays_everything() {
        let mut ledger = KarensLedger::new(Decimal::ZERO);
        let out = ledger.consume(&[span("2025-03-11", "08:00:00", "10:00:00", ObClass::Day)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_allowance_depletes_across_spans() {
        let mut ledger = KarensLedger::new(dec("4"));
        let first = ledger.consume(&[span("2025-03-11", "08:00:00", "11:00:00", ObClass::Day)]);
        let second = ledger.consume(&[span("2025-03-12", "08:00:00", "11:00:00", ObClass::Day)]);
        assert_eq!(first[0].payment_status, PaymentStatus::Karens);
        assert_eq!(second.len(), 2);
        assert_eq!(second[0].hours, dec("1"));
        assert_eq!(second[0].payment_status, PaymentStatus::Karens);
        assert_eq!(second[1].hours, dec("2"));
        assert_eq!(second[1].payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_day_counter_increments_once_per_date() {
        let mut ledger = KarensLedger::new(dec("100"));
        ledger.consume(&[
            span("2025-03-11", "08:00:00", "09:00:00", ObClass::Day),
            span("2025-03-11", "20:00:00", "21:00:00", ObClass::Evening),
        ]);
        assert_eq!(ledger.cumulative_sick_days(), 1);
        ledger.consume(&[span("2025-03-12", "08:00:00", "09:00:00", ObClass::Day)]);
        assert_eq!(ledger.cumulative_sick_days(), 2);
    }

    #[test]
    fn test_long_term_regime_starts_on_fifteenth_day() {
        let mut ledger = KarensLedger::new(dec("1000"));
        for day in 1..=14 {
            let date = format!("2025-03-{:02}", day);
            let out = ledger.consume(&[span(&date, "08:00:00", "09:00:00", ObClass::Day)]);
            assert_eq!(out[0].payment_status, PaymentStatus::Karens, "day {day}");
        }
        assert!(!ledger.in_long_term_regime());
        let out = ledger.consume(&[span("2025-03-15", "08:00:00", "09:00:00", ObClass::Day)]);
        assert!(ledger.in_long_term_regime());
        assert_eq!(out[0].payment_status, PaymentStatus::KarensAndLongTerm);
    }

    #[test]
    fn test_long_term_only_applies_while_allowance_lasts() {
        // Past day 14 with no allowance left, time is simply paid
        let mut ledger = KarensLedger::new(dec("2"));
        for day in 1..=15 {
            let date = format!("2025-03-{:02}", day);
            ledger.consume(&[span(&date, "08:00:00", "09:00:00", ObClass::Day)]);
        }
        let out = ledger.consume(&[span("2025-03-16", "08:00:00", "09:00:00", ObClass::Day)]);
        assert_eq!(out[0].payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_sub_second_residue_is_flushed() {
        // 0.5001 h allowance against a 0.5 h span leaves 0.36 s, which
        // cannot be expressed as a split boundary and is dropped
        let mut ledger = KarensLedger::new(dec("0.5001"));
        ledger.consume(&[span("2025-03-11", "08:00:00", "08:30:00", ObClass::Day)]);
        assert_eq!(ledger.remaining_allowance(), Decimal::ZERO);
        let out = ledger.consume(&[span("2025-03-11", "09:00:00", "10:00:00", ObClass::Day)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].payment_status, PaymentStatus::Paid);
    }

    #[test]
    fn test_zero_length_span_dropped() {
        let mut ledger = KarensLedger::new(dec("8"));
        let s = make_datetime("2025-03-11", "08:00:00");
        let out = ledger.consume(&[ObSpan {
            start: s,
            end: s,
            hours: Decimal::ZERO,
            ob_class: ObClass::Day,
        }]);
        assert!(out.is_empty());
        // A dropped span does not count as a sick day either
        assert_eq!(ledger.cumulative_sick_days(), 0);
        assert_eq!(ledger.remaining_allowance(), dec("8"));
    }

    #[test]
    fn test_enormous_allowance_does_not_overflow() {
        let mut ledger = KarensLedger::new(Decimal::MAX);
        let out = ledger.consume(&[span("2025-03-11", "08:00:00", "09:00:00", ObClass::Day)]);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].payment_status, PaymentStatus::Karens);
        assert_eq!(ledger.remaining_allowance(), Decimal::MAX - Decimal::ONE);
    }

    #[test]
    fn test_negative_starting_allowance_clamped() {
        let ledger = KarensLedger::new(dec("-3"));
        assert_eq!(ledger.remaining_allowance(), Decimal::ZERO);
    }

    #[test]
    fn test_split_conserves_hours() {
        let mut ledger = KarensLedger::new(dec("2.25"));
        let input = span("2025-03-11", "07:10:00", "15:40:00", ObClass::Day);
        let total_in = input.hours;
        let out = ledger.consume(&[input]);
        let total_out: Decimal = out.iter().map(|s| s.hours).sum();
        assert_eq!(total_out, total_in);
    }
}
