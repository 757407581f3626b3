//! Person model.
//!
//! A [`Person`] is a sickness subject: an identifier, an ordered sequence
//! of sick-leave intervals, and the starting karens allowance consumed
//! while processing that sequence.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

use super::SickInterval;

/// A sickness subject and their ordered sick-leave history.
///
/// The interval sequence must be sorted by (date, start) and free of
/// overlaps; the karens ledger depends on this ordering, so
/// [`Person::validate`] is called before any ledger state is touched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    /// Stable identifier matching the intervals' `person_ref`.
    pub person_ref: String,
    /// Sick-leave intervals sorted by date then start time.
    pub intervals: Vec<SickInterval>,
    /// Starting karens allowance in hours.
    pub starting_allowance: Decimal,
}

impl Person {
    /// Checks the ordering and non-overlap invariants of the interval
    /// sequence.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::RosterOrderViolation`] if any interval starts
    /// before the previous one ends (covers both unsorted sequences and
    /// overlapping intervals).
    pub fn validate(&self) -> EngineResult<()> {
        for pair in self.intervals.windows(2) {
            let (prev, next) = (&pair[0], &pair[1]);
            if next.start < prev.start {
                return Err(EngineError::RosterOrderViolation {
                    person_ref: self.person_ref.clone(),
                    message: format!(
                        "interval starting {} appears after interval starting {}",
                        next.start, prev.start
                    ),
                });
            }
            if next.start < prev.end {
                return Err(EngineError::RosterOrderViolation {
                    person_ref: self.person_ref.clone(),
                    message: format!(
                        "interval starting {} overlaps interval ending {}",
                        next.start, prev.end
                    ),
                });
            }
        }
        Ok(())
    }

    /// Returns the total roster hours across all intervals.
    pub fn total_hours(&self) -> Decimal {
        self.intervals.iter().map(|i| i.hours).sum()
    }
}
