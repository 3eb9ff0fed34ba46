//! Calculation Service access
//!
//! Wire types for `POST /calculate` and the client that sends them.

pub mod api_client;
pub mod types;

pub use api_client::{CalculationService, HttpCalculationService};
pub use types::{Axis, CalculationRequest, CalculationResult, ServiceResponse};
