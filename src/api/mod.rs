//! HTTP API module for the vacancy calculation engine.
//!
//! This module provides the REST API endpoint for segmenting sick-leave
//! rosters and reconciling them against payslip facts.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::CalculationRequest;
pub use response::{ApiError, CalculationResponse};
pub use state::AppState;
