//! Request orchestrator
//!
//! Drives one submission from form values to either a rendered surface or
//! an error message:
//!
//! 1. `begin` clears the previous outcome, enters `Submitting` and hands out
//!    a [`Ticket`] for the request.
//! 2. The ticket is run against the [`CalculationService`] (the only
//!    suspension point).
//! 3. `complete` moves to `Success` or `Failed` and updates the plot
//!    container.
//!
//! Every `begin` bumps the generation. Outcomes carrying an older generation
//! are dropped, so the visible state always belongs to the most recent
//! request no matter in which order responses arrive.

use crate::config::Config;
use crate::error::ClientError;
use crate::orchestrator::form::RawFormValues;
use crate::orchestrator::presenter::ResultSummary;
use crate::orchestrator::state::{Presentation, UiState, ViewState};
use crate::plot::builder::build_surface_plot;
use crate::plot::render::{HtmlRenderer, PlotRenderer, DEFAULT_CONTAINER};
use crate::service::api_client::{CalculationService, HttpCalculationService};
use crate::service::types::{CalculationRequest, CalculationResult};
use std::sync::Arc;
use std::time::Instant;
use tracing::{info_span, Instrument, Span};
use uuid::Uuid;

/// Outcome of a service call, as handed back to [`Orchestrator::complete`]
pub type CallOutcome = Result<CalculationResult, ClientError>;

/// One issued request
///
/// Owns everything needed to perform the call, so it can be moved onto
/// another task and handed back together with the outcome.
#[derive(Debug)]
pub struct Ticket {
    generation: u64,
    submission_id: Uuid,
    request: CalculationRequest,
    validate_locally: bool,
    started_at: Instant,
    span: Span,
}

impl Ticket {
    /// Generation this ticket was issued for
    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Unique id used in logs
    pub fn submission_id(&self) -> Uuid {
        self.submission_id
    }

    /// Request that will be sent
    pub fn request(&self) -> &CalculationRequest {
        &self.request
    }

    /// Perform the call (after local validation, when enabled)
    pub async fn run(&self, service: &dyn CalculationService) -> CallOutcome {
        async {
            if self.validate_locally {
                self.request.validate()?;
            }
            service.calculate(&self.request).await
        }
        .instrument(self.span.clone())
        .await
    }
}

/// Whether `complete` applied an outcome
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Completion {
    /// The outcome belonged to the current request and was applied
    Applied,
    /// A newer request was issued meanwhile; the outcome was dropped
    Stale,
}

/// Owner of the submission lifecycle
pub struct Orchestrator<R: PlotRenderer> {
    service: Arc<dyn CalculationService>,
    renderer: R,
    container: String,
    validate_locally: bool,
    state: UiState,
    generation: u64,
}

impl Orchestrator<HtmlRenderer> {
    /// HTTP service plus HTML page renderer, both taken from configuration
    pub fn from_config(config: &Config) -> Result<Self, ClientError> {
        let service = HttpCalculationService::from_config(config)?;
        let renderer = HtmlRenderer::new(&config.plot.output_dir);
        Ok(Self::new(Arc::new(service), renderer).with_local_validation(config.validate_locally))
    }
}

impl<R: PlotRenderer> Orchestrator<R> {
    /// Create an idle orchestrator drawing into [`DEFAULT_CONTAINER`]
    pub fn new(service: Arc<dyn CalculationService>, renderer: R) -> Self {
        Self {
            service,
            renderer,
            container: DEFAULT_CONTAINER.to_string(),
            validate_locally: false,
            state: UiState::Idle,
            generation: 0,
        }
    }

    /// Validate requests before sending them
    pub fn with_local_validation(mut self, enabled: bool) -> Self {
        self.validate_locally = enabled;
        self
    }

    /// Current state
    pub fn state(&self) -> &UiState {
        &self.state
    }

    /// Projection of the current state
    pub fn view(&self) -> ViewState {
        self.state.view()
    }

    /// Whether a request is in flight
    pub fn is_busy(&self) -> bool {
        self.state.is_busy()
    }

    /// Renderer the plot container is drawn with
    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    /// Name of the plot container
    pub fn container(&self) -> &str {
        &self.container
    }

    /// Service handle, for running tickets on another task
    pub fn service(&self) -> Arc<dyn CalculationService> {
        Arc::clone(&self.service)
    }

    /// Run one full submission and return the resulting state
    pub async fn submit(&mut self, form: &RawFormValues) -> &UiState {
        let ticket = self.begin(form);
        let outcome = ticket.run(self.service.as_ref()).await;
        self.complete(ticket, outcome);
        &self.state
    }

    /// Clear the previous outcome and enter `Submitting` for a new request
    ///
    /// Any request still in flight becomes stale.
    pub fn begin(&mut self, form: &RawFormValues) -> Ticket {
        self.generation += 1;

        let submission_id = Uuid::new_v4();
        let span = info_span!(
            "submission",
            submission_id = %submission_id,
            generation = self.generation,
        );
        let request = form.to_request();

        span.in_scope(|| {
            tracing::info!(
                function = %request.function,
                a = request.a,
                b = request.b,
                c = request.c,
                d = request.d,
                resolution = ?request.resolution,
                "Submitting calculation"
            );
        });

        // Replaces any Success/Failed state, which hides the previous outcome
        self.state = UiState::Submitting {
            generation: self.generation,
        };

        Ticket {
            generation: self.generation,
            submission_id,
            request,
            validate_locally: self.validate_locally,
            started_at: Instant::now(),
            span,
        }
    }

    /// Apply the outcome of a ticket's call
    ///
    /// Leaving `Submitting` is what re-enables the submit control and hides
    /// the busy indicator, so both happen on every path.
    pub fn complete(&mut self, ticket: Ticket, outcome: CallOutcome) -> Completion {
        let _guard = ticket.span.enter();

        if ticket.generation != self.generation || !self.state.is_busy() {
            tracing::debug!(
                current_generation = self.generation,
                "Dropping outcome of superseded request"
            );
            return Completion::Stale;
        }

        self.state = match outcome.and_then(|result| self.present(&ticket, &result)) {
            Ok(presentation) => UiState::Success(presentation),
            Err(err) => self.fail(err),
        };

        tracing::info!(
            outcome = self.state.label(),
            duration_ms = ticket.started_at.elapsed().as_millis(),
            "Submission completed"
        );
        Completion::Applied
    }

    /// Drop any outcome and go back to `Idle`
    ///
    /// A request still in flight becomes stale.
    pub fn reset(&mut self) {
        self.generation += 1;
        self.state = UiState::Idle;
        if let Err(err) = self.renderer.clear(&self.container) {
            tracing::warn!(error = %err, "Failed to clear plot container");
        }
    }

    fn present(
        &mut self,
        ticket: &Ticket,
        result: &CalculationResult,
    ) -> Result<Presentation, ClientError> {
        let summary = ResultSummary::from_result(result);
        let plot = build_surface_plot(result, &ticket.request.function);
        self.renderer.render(&self.container, &plot)?;

        Ok(Presentation {
            summary,
            function_label: ticket.request.function.clone(),
            grid_dims: result.grid_dims(),
        })
    }

    fn fail(&mut self, err: ClientError) -> UiState {
        tracing::warn!(error = %err, "Submission failed");
        if let Err(clear_err) = self.renderer.clear(&self.container) {
            tracing::warn!(error = %clear_err, "Failed to clear plot container");
        }
        UiState::Failed {
            message: err.user_message(),
        }
    }
}
