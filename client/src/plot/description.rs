//! Declarative plot description
//!
//! Typed mirror of the `(data, layout, config)` triple accepted by
//! `Plotly.newPlot`. Field names serialize to plotly.js JSON keys.

use crate::service::types::Axis;
use serde::Serialize;

/// Complete, self-contained description of one plot
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlotDescription {
    /// Traces, drawn in order
    pub data: Vec<SurfaceTrace>,
    /// Layout of the figure
    pub layout: Layout,
    /// Rendering options
    pub config: PlotConfig,
}

impl PlotDescription {
    /// Serialize the description into the JSON value handed to plotly.js
    pub fn to_json(&self) -> serde_json::Value {
        // Non-finite floats become null, so this cannot fail
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// 3D surface trace
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SurfaceTrace {
    /// Always `"surface"`
    #[serde(rename = "type")]
    pub trace_type: &'static str,
    /// X coordinates
    pub x: Axis,
    /// Y coordinates
    pub y: Axis,
    /// Heights
    pub z: Vec<Vec<f64>>,
    /// Named colour scale
    pub colorscale: &'static str,
    /// Whether the colour legend is drawn
    pub showscale: bool,
    /// Colour legend settings
    pub colorbar: ColorBar,
    /// Contour settings
    pub contours: Contours,
    /// Hover label template
    pub hovertemplate: &'static str,
}

/// Colour legend
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ColorBar {
    /// Legend title
    pub title: &'static str,
    /// Side the title is drawn on
    pub titleside: &'static str,
}

/// Contours per axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Contours {
    /// Contours along z
    pub z: ContourAxis,
}

/// Contour settings for one axis
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContourAxis {
    /// Draw the contour lines
    pub show: bool,
    /// Colour the lines with the trace colour scale
    pub usecolormap: bool,
    /// Colour of the highlighted contour on hover
    pub highlightcolor: &'static str,
    /// Planes the contours are projected on
    pub project: Projection,
}

/// Contour projection planes
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Projection {
    /// Project on the z plane
    pub z: bool,
}

/// Figure layout
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Layout {
    /// Figure title
    pub title: Title,
    /// Resize with the container
    pub autosize: bool,
    /// Height in pixels
    pub height: u32,
    /// 3D scene
    pub scene: Scene,
    /// Figure margins
    pub margin: Margin,
}

/// Figure title
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Title {
    /// Title text
    pub text: String,
    /// Title font
    pub font: Font,
    /// Horizontal position, as a fraction of the width
    pub x: f64,
    /// Anchor for `x`
    pub xanchor: &'static str,
}

/// Font settings
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Font {
    /// Size in points
    pub size: u32,
    /// CSS font family
    pub family: &'static str,
}

/// 3D scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Scene {
    /// X axis
    pub xaxis: SceneAxis,
    /// Y axis
    pub yaxis: SceneAxis,
    /// Z axis
    pub zaxis: SceneAxis,
    /// Initial camera
    pub camera: Camera,
}

/// One axis of the 3D scene
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SceneAxis {
    /// Axis title
    pub title: &'static str,
    /// Grid line colour
    pub gridcolor: &'static str,
    /// Fill the axis plane
    pub showbackground: bool,
    /// Axis plane colour
    pub backgroundcolor: &'static str,
}

/// Camera placement
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Camera {
    /// Eye position
    pub eye: Eye,
}

/// Eye position of the camera
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Eye {
    /// X component
    pub x: f64,
    /// Y component
    pub y: f64,
    /// Z component
    pub z: f64,
}

/// Figure margins in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Margin {
    /// Left
    pub l: u32,
    /// Right
    pub r: u32,
    /// Bottom
    pub b: u32,
    /// Top
    pub t: u32,
}

/// Rendering options
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlotConfig {
    /// Resize with the window
    pub responsive: bool,
    /// Show the mode bar
    pub display_mode_bar: bool,
    /// Show the plotly logo in the mode bar
    pub displaylogo: bool,
    /// Mode bar buttons to hide
    pub mode_bar_buttons_to_remove: Vec<&'static str>,
}
