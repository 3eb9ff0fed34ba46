//! Submission state
//!
//! The orchestrator owns exactly one [`UiState`]. Front ends never inspect
//! flags of their own; they draw the [`ViewState`] projected from it.

use crate::orchestrator::presenter::ResultSummary;

/// Lifecycle of one submission
#[derive(Debug, Clone, PartialEq, Default)]
pub enum UiState {
    /// Nothing shown
    #[default]
    Idle,
    /// Waiting for the service
    Submitting {
        /// Generation of the request being waited on
        generation: u64,
    },
    /// Last submission succeeded
    Success(Presentation),
    /// Last submission failed
    Failed {
        /// One-line message for the error surface
        message: String,
    },
}

/// What the result surface shows after a successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct Presentation {
    /// Formatted volume and error
    pub summary: ResultSummary,
    /// Function expression the result belongs to
    pub function_label: String,
    /// Rows and columns of the rendered grid
    pub grid_dims: (usize, usize),
}

/// Visibility and content of every user-facing surface
#[derive(Debug, Clone, PartialEq)]
pub struct ViewState {
    /// Whether the submit control accepts clicks
    pub submit_enabled: bool,
    /// Whether the busy indicator is shown
    pub busy_visible: bool,
    /// Result surface content, `None` when hidden
    pub result: Option<ResultSummary>,
    /// Error surface content, `None` when hidden
    pub error_message: Option<String>,
}

impl UiState {
    /// Project the state onto the user-facing surfaces
    pub fn view(&self) -> ViewState {
        let busy = self.is_busy();
        ViewState {
            submit_enabled: !busy,
            busy_visible: busy,
            result: match self {
                UiState::Success(presentation) => Some(presentation.summary.clone()),
                _ => None,
            },
            error_message: match self {
                UiState::Failed { message } => Some(message.clone()),
                _ => None,
            },
        }
    }

    /// Whether a request is in flight
    pub fn is_busy(&self) -> bool {
        matches!(self, UiState::Submitting { .. })
    }

    /// Short label for logs and status bars
    pub fn label(&self) -> &'static str {
        match self {
            UiState::Idle => "idle",
            UiState::Submitting { .. } => "submitting",
            UiState::Success(_) => "success",
            UiState::Failed { .. } => "failed",
        }
    }
}
