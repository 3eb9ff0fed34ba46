//! Surface plot builder
//!
//! Turns a successful [`CalculationResult`] into a [`PlotDescription`].
//! Pure: the same inputs always produce the same description.

use crate::plot::description::{
    Camera, ColorBar, ContourAxis, Contours, Eye, Font, Layout, Margin, PlotConfig,
    PlotDescription, Projection, Scene, SceneAxis, SurfaceTrace, Title,
};
use crate::service::types::CalculationResult;

/// Perceptually uniform colour scale for the surface
pub const COLOR_SCALE: &str = "Viridis";

/// Default plot height in pixels
pub const PLOT_HEIGHT: u32 = 600;

const AXIS_GRID_COLOR: &str = "rgb(255, 255, 255)";
const AXIS_BACKGROUND_COLOR: &str = "rgb(230, 230, 230)";
const CONTOUR_HIGHLIGHT_COLOR: &str = "#42f462";
const HOVER_TEMPLATE: &str = "x: %{x:.3f}<br>y: %{y:.3f}<br>z: %{z:.3f}<extra></extra>";
const CAMERA_EYE: Eye = Eye {
    x: 1.5,
    y: 1.5,
    z: 1.3,
};

/// Title shown above the surface for a function expression
///
/// The label is used verbatim; escaping is left to the renderer.
pub fn plot_title(function_label: &str) -> String {
    format!("Surface z = {function_label}")
}

/// Build the full plot description for a calculation result
pub fn build_surface_plot(result: &CalculationResult, function_label: &str) -> PlotDescription {
    let trace = SurfaceTrace {
        trace_type: "surface",
        x: result.x.clone(),
        y: result.y.clone(),
        z: result.z.clone(),
        colorscale: COLOR_SCALE,
        showscale: true,
        colorbar: ColorBar {
            title: "z",
            titleside: "right",
        },
        contours: Contours {
            z: ContourAxis {
                show: true,
                usecolormap: true,
                highlightcolor: CONTOUR_HIGHLIGHT_COLOR,
                project: Projection { z: true },
            },
        },
        hovertemplate: HOVER_TEMPLATE,
    };

    let layout = Layout {
        title: Title {
            text: plot_title(function_label),
            font: Font {
                size: 20,
                family: "Arial, sans-serif",
            },
            x: 0.5,
            xanchor: "center",
        },
        autosize: true,
        height: PLOT_HEIGHT,
        scene: Scene {
            xaxis: scene_axis("X"),
            yaxis: scene_axis("Y"),
            zaxis: scene_axis("Z"),
            camera: Camera { eye: CAMERA_EYE },
        },
        margin: Margin {
            l: 0,
            r: 0,
            b: 0,
            t: 40,
        },
    };

    let config = PlotConfig {
        responsive: true,
        display_mode_bar: true,
        displaylogo: false,
        mode_bar_buttons_to_remove: vec!["lasso2d", "select2d"],
    };

    PlotDescription {
        data: vec![trace],
        layout,
        config,
    }
}

fn scene_axis(title: &'static str) -> SceneAxis {
    SceneAxis {
        title,
        gridcolor: AXIS_GRID_COLOR,
        showbackground: true,
        backgroundcolor: AXIS_BACKGROUND_COLOR,
    }
}
