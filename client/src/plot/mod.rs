//! Plot contract
//!
//! Builds the declarative surface plot for a result and hands it to a
//! [`PlotRenderer`].

pub mod builder;
pub mod description;
pub mod render;

pub use builder::{build_surface_plot, plot_title};
pub use description::PlotDescription;
pub use render::{HtmlRenderer, MemoryRenderer, PlotRenderer, DEFAULT_CONTAINER};
