//! Core vacancy and karens calculation logic.
//!
//! The pipeline runs in stages: the holiday calendar classifies dates, the
//! OB classifier splits each sick-leave interval into premium spans, the
//! karens ledger resolves payment status per person, and reconciliation
//! assembles the vacancy report against the payslip facts.

mod calendar;
mod engine;
mod karens_ledger;
mod ob_classifier;
mod reconciliation;
mod segment_merger;

pub use calendar::{DateClass, HolidayCalendar};
pub use engine::{partition_roster, run_calculation};
pub use karens_ledger::{KarensLedger, LedgerSpan};
pub use ob_classifier::{classify_instant, classify_interval, ObSpan};
pub use reconciliation::{
    build_report, coalesce_segments, Discrepancy, DiscrepancyKind, SummaryRow, UnmatchedHours,
    VacancyReport,
};
pub use segment_merger::merge_person;
