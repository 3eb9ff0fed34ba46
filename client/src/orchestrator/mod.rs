//! Orchestrator module
//!
//! Owns the submission lifecycle: parses form input, tracks the UI state,
//! calls the Calculation Service and dispatches the outcome to the result
//! presenter and plot builder, or to the error surface.

pub mod form;
pub mod presenter;
pub mod state;
pub mod submission;

pub use form::RawFormValues;
pub use presenter::{format_error, format_volume, ResultSummary};
pub use state::{Presentation, UiState, ViewState};
pub use submission::{CallOutcome, Completion, Orchestrator, Ticket};
