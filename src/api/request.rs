//! Request types for the vacancy calculation API.
//!
//! This module defines the JSON request structures for the `/calculate`
//! endpoint.

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::EngineResult;
use crate::models::{PayslipFacts, SickInterval};

/// Request body for the `/calculate` endpoint.
///
/// Contains the sick-leave roster to segment, plus the optional payslip
/// facts for reconciliation and any extra holiday dates not covered by the
/// configured calendar.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculationRequest {
    /// The sick-leave roster rows to process.
    pub roster: Vec<RosterRowRequest>,
    /// Payroll-registered figures per person.
    #[serde(default)]
    pub payslip_facts: Vec<PayslipFactsRequest>,
    /// Holiday dates to apply in addition to the configured calendar.
    #[serde(default)]
    pub holidays: Vec<NaiveDate>,
}

/// One scheduled-but-absent shift block in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RosterRowRequest {
    /// Opaque person identifier.
    pub person_ref: String,
    /// The calendar date of the block.
    pub date: NaiveDate,
    /// The start of the block (inclusive).
    pub start_time: NaiveDateTime,
    /// The end of the block (exclusive).
    pub end_time: NaiveDateTime,
    /// Whether a substitute covered the block.
    #[serde(default)]
    pub substitute_present: bool,
    /// Optional reported duration, cross-checked against the time range.
    #[serde(default)]
    pub hours: Option<Decimal>,
}

/// Payslip figures for one person in a calculation request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PayslipFactsRequest {
    /// The person these figures belong to.
    pub person_ref: String,
    /// Karens hours registered in payroll.
    pub karens_hours_registered: Decimal,
    /// Long-term hours registered in payroll.
    pub long_term_hours_registered: Decimal,
    /// Optional override of the starting karens allowance.
    #[serde(default)]
    pub starting_allowance_override: Option<Decimal>,
}

impl RosterRowRequest {
    /// Converts the request row into a validated [`SickInterval`].
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidInterval`](crate::error::EngineError::InvalidInterval)
    /// for a malformed time range or a reported-hours mismatch.
    pub fn into_interval(self) -> EngineResult<SickInterval> {
        match self.hours {
            Some(reported) => SickInterval::with_reported_hours(
                self.person_ref,
                self.date,
                self.start_time,
                self.end_time,
                reported,
                self.substitute_present,
            ),
            None => SickInterval::new(
                self.person_ref,
                self.date,
                self.start_time,
                self.end_time,
                self.substitute_present,
            ),
        }
    }
}

impl From<PayslipFactsRequest> for PayslipFacts {
    fn from(req: PayslipFactsRequest) -> Self {
        PayslipFacts {
            person_ref: req.person_ref,
            karens_hours_registered: req.karens_hours_registered,
            long_term_hours_registered: req.long_term_hours_registered,
            starting_allowance_override: req.starting_allowance_override,
        }
    }
}
