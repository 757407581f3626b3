//! Data models for the Vacancy and Karens Calculation Engine.
//!
//! This module contains the domain types consumed and produced by the
//! segmentation engine: sick-leave intervals, persons, payslip facts,
//! and the typed output segments of the final report.

mod payslip;
mod person;
mod segment;
mod sick_interval;

pub use payslip::PayslipFacts;
pub use person::Person;
pub use segment::{ObClass, OutputSegment, PaymentStatus};
pub use sick_interval::{hours_between, SickInterval};
