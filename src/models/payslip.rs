//! Payslip-extracted facts model.
//!
//! These values are produced by the document-extraction collaborators and
//! feed only the reconciliation step; the segmentation engine itself never
//! reads them, except for the optional starting-allowance override used to
//! seed a person's karens ledger.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Per-person facts extracted from payslips.
///
/// # Example
///
/// ```
/// use vakans_engine::models::PayslipFacts;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let facts = PayslipFacts {
///     person_ref: "198001011234".to_string(),
///     karens_hours_registered: Decimal::from_str("8.0").unwrap(),
///     long_term_hours_registered: Decimal::ZERO,
///     starting_allowance_override: None,
/// };
/// assert!(facts.starting_allowance_override.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayslipFacts {
    /// The person these facts belong to.
    pub person_ref: String,
    /// Karens hours already registered in payroll.
    pub karens_hours_registered: Decimal,
    /// Long-term (>14-day) hours already registered in payroll.
    pub long_term_hours_registered: Decimal,
    /// Optional per-person override of the starting karens allowance.
    #[serde(default)]
    pub starting_allowance_override: Option<Decimal>,
}
