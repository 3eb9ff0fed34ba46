//! Surface Viewer client library
//!
//! Submits surface definitions to the Calculation Service and turns the
//! returned grids into plot descriptions. Front ends (the CLI in
//! `src/main.rs` and the desktop GUI) drive everything through
//! [`orchestrator::Orchestrator`].

pub mod config;
pub mod error;
pub mod orchestrator;
pub mod plot;
/// Built-in example surfaces
pub mod presets;
pub mod service;

pub use config::Config;
pub use error::ClientError;
pub use orchestrator::{Orchestrator, RawFormValues, UiState};

/// Install the `tracing` subscriber used by the binaries
///
/// `RUST_LOG` controls verbosity; without it `info` is used.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));
    // Ignore the error when a subscriber is already installed
    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}
