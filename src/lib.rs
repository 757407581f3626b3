//! Vacancy and Karens Calculation Engine
//!
//! This crate computes, for a payroll period, the vacant (uncovered) sick-leave
//! hours an employer must pay compensation for, broken down by OB class
//! (shift-premium category for inconvenient working hours) and by payment
//! status (karens waiting period, paid sick pay, or the >14-day long-term
//! regime), reconciled against payslip-registered facts.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
