//! Vacancy reporting and payslip reconciliation.
//!
//! Turns the full set of resolved segments into the output report: vacant
//! detail rows, per-person summaries, and discrepancies between computed
//! karens hours and what payroll has registered.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::{ObClass, OutputSegment, PaymentStatus, PayslipFacts};

/// Which registered figure a discrepancy refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiscrepancyKind {
    /// Computed karens hours differ from the payroll-registered karens hours.
    KarensMismatch,
    /// Computed long-term hours differ from the payroll-registered
    /// long-term hours.
    LongTermMismatch,
}

/// A difference between computed hours and payroll-registered hours.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Discrepancy {
    /// The person the figures belong to.
    pub person_ref: String,
    /// Which registered figure diverged.
    pub kind: DiscrepancyKind,
    /// Hours registered on the payslip.
    #[serde(with = "rust_decimal::serde::str")]
    pub expected: Decimal,
    /// Hours the engine computed.
    #[serde(with = "rust_decimal::serde::str")]
    pub actual: Decimal,
}

/// Aggregated hours for one person, OB class, and payment status.
///
/// Summaries cover all sick time, covered or not; the vacancy filter
/// applies to the detail rows only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryRow {
    /// The person the hours belong to.
    pub person_ref: String,
    /// The OB premium class.
    pub ob_class: ObClass,
    /// The payment status.
    pub payment_status: PaymentStatus,
    /// Total hours in this bucket.
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
}

/// Vacant hours for a person payroll has no payslip facts for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnmatchedHours {
    /// The person missing from the payslip facts.
    pub person_ref: String,
    /// That person's total vacant hours.
    #[serde(with = "rust_decimal::serde::str")]
    pub hours: Decimal,
}

/// The complete calculation output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VacancyReport {
    /// Vacant segments, coalesced and ordered by person and start time.
    pub detail: Vec<OutputSegment>,
    /// All sick hours summed per person, OB class, and payment status.
    pub summary: Vec<SummaryRow>,
    /// Persons with vacant hours but no payslip facts.
    pub unmatched_hours: Vec<UnmatchedHours>,
    /// Differences against the payroll-registered figures.
    pub discrepancies: Vec<Discrepancy>,
}

/// Builds the final report from all resolved segments.
///
/// Only segments without a substitute count as vacant and appear in the
/// detail rows. Summaries and reconciliation run over all segments,
/// covered or not, since the payslip registers the person's full sick
/// time. Discrepancies are reported, never fatal.
pub fn build_report(
    segments: Vec<OutputSegment>,
    facts: &[PayslipFacts],
    tolerance: Decimal,
) -> VacancyReport {
    let discrepancies = reconcile(&segments, facts, tolerance);
    let summary = summarize(&segments);

    let mut vacant: Vec<OutputSegment> = segments
        .into_iter()
        .filter(|s| !s.substitute_present)
        .collect();
    vacant.sort_by(|a, b| a.person_ref.cmp(&b.person_ref).then(a.start.cmp(&b.start)));
    let detail = coalesce_segments(vacant);

    let unmatched_hours = find_unmatched(&detail, facts);

    VacancyReport {
        detail,
        summary,
        unmatched_hours,
        discrepancies,
    }
}

/// Merges adjacent detail rows that agree on person, date, OB class, payment
/// status, and substitute flag, where one ends exactly when the next starts.
///
/// Segmentation boundaries that did not change any classification (a karens
/// cutoff landing on an OB boundary, say) disappear from the output here.
pub fn coalesce_segments(segments: Vec<OutputSegment>) -> Vec<OutputSegment> {
    let mut out: Vec<OutputSegment> = Vec::with_capacity(segments.len());

    for segment in segments {
        match out.last_mut() {
            Some(last)
                if last.person_ref == segment.person_ref
                    && last.date == segment.date
                    && last.ob_class == segment.ob_class
                    && last.payment_status == segment.payment_status
                    && last.substitute_present == segment.substitute_present
                    && last.end == segment.start =>
            {
                last.end = segment.end;
                last.hours += segment.hours;
            }
            _ => out.push(segment),
        }
    }

    out
}

fn summarize(segments: &[OutputSegment]) -> Vec<SummaryRow> {
    let mut buckets: BTreeMap<(String, ObClass, PaymentStatus), Decimal> = BTreeMap::new();
    for segment in segments {
        *buckets
            .entry((
                segment.person_ref.clone(),
                segment.ob_class,
                segment.payment_status,
            ))
            .or_insert(Decimal::ZERO) += segment.hours;
    }

    buckets
        .into_iter()
        .map(|((person_ref, ob_class, payment_status), hours)| SummaryRow {
            person_ref,
            ob_class,
            payment_status,
            hours,
        })
        .collect()
}

fn find_unmatched(detail: &[OutputSegment], facts: &[PayslipFacts]) -> Vec<UnmatchedHours> {
    let known: BTreeSet<&str> = facts.iter().map(|f| f.person_ref.as_str()).collect();

    let mut totals: BTreeMap<String, Decimal> = BTreeMap::new();
    for segment in detail {
        if !known.contains(segment.person_ref.as_str()) {
            *totals
                .entry(segment.person_ref.clone())
                .or_insert(Decimal::ZERO) += segment.hours;
        }
    }

    totals
        .into_iter()
        .map(|(person_ref, hours)| UnmatchedHours { person_ref, hours })
        .collect()
}

fn reconcile(
    segments: &[OutputSegment],
    facts: &[PayslipFacts],
    tolerance: Decimal,
) -> Vec<Discrepancy> {
    let mut karens: BTreeMap<&str, Decimal> = BTreeMap::new();
    let mut long_term: BTreeMap<&str, Decimal> = BTreeMap::new();

    for segment in segments {
        match segment.payment_status {
            PaymentStatus::Karens => {
                *karens.entry(&segment.person_ref).or_insert(Decimal::ZERO) += segment.hours;
            }
            PaymentStatus::KarensAndLongTerm => {
                *karens.entry(&segment.person_ref).or_insert(Decimal::ZERO) += segment.hours;
                *long_term.entry(&segment.person_ref).or_insert(Decimal::ZERO) += segment.hours;
            }
            PaymentStatus::Paid => {}
        }
    }

    let mut discrepancies = Vec::new();
    for fact in facts {
        let computed_karens = karens
            .get(fact.person_ref.as_str())
            .copied()
            .unwrap_or(Decimal::ZERO);
        let computed_long_term = long_term
            .get(fact.person_ref.as_str())
            .copied()
            .unwrap_or(Decimal::ZERO);

        push_if_diverged(
            &mut discrepancies,
            &fact.person_ref,
            DiscrepancyKind::KarensMismatch,
            fact.karens_hours_registered,
            computed_karens,
            tolerance,
        );
        push_if_diverged(
            &mut discrepancies,
            &fact.person_ref,
            DiscrepancyKind::LongTermMismatch,
            fact.long_term_hours_registered,
            computed_long_term,
            tolerance,
        );
    }

    discrepancies
}

fn push_if_diverged(
    discrepancies: &mut Vec<Discrepancy>,
    person_ref: &str,
    kind: DiscrepancyKind,
    expected: Decimal,
    actual: Decimal,
    tolerance: Decimal,
) {
    if (expected - actual).abs() > tolerance {
        warn!(
            person_ref = %person_ref,
            kind = ?kind,
            expected = %expected,
            actual = %actual,
            "registered hours diverge from computed hours"
        );
        discrepancies.push(Discrepancy {
            person_ref: person_ref.to_string(),
            kind,
            expected,
            actual,
        });
    }
}
