//! Configuration for the Vacancy and Karens Calculation Engine.
//!
//! This module provides loading of the engine configuration from YAML
//! files: the holiday calendar and the engine settings (default karens
//! allowance, reconciliation tolerance).

mod loader;
mod types;

pub use loader::ConfigLoader;
pub use types::{CalendarConfig, EngineConfig, EngineSettings};
