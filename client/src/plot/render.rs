//! Rendering capability
//!
//! The charting engine is external; it is reached through [`PlotRenderer`].
//! Each call replaces whatever the container showed before, there is no
//! incremental update.

use crate::error::ClientError;
use crate::plot::description::PlotDescription;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

/// Name of the container the orchestrator draws into
pub const DEFAULT_CONTAINER: &str = "plot-container";

/// plotly.js bundle loaded by rendered pages
pub const PLOTLY_CDN_URL: &str = "https://cdn.plot.ly/plotly-2.27.0.min.js";

/// Something that can display a [`PlotDescription`] inside a named container
pub trait PlotRenderer {
    /// Replace the container contents with the given plot
    fn render(&mut self, container: &str, plot: &PlotDescription) -> Result<(), ClientError>;

    /// Empty the container
    fn clear(&mut self, container: &str) -> Result<(), ClientError>;
}

/// Keeps the last description per container in memory
#[derive(Debug, Default, Clone)]
pub struct MemoryRenderer {
    plots: HashMap<String, PlotDescription>,
    render_count: usize,
}

impl MemoryRenderer {
    /// Create an empty renderer
    pub fn new() -> Self {
        Self::default()
    }

    /// Plot currently shown in `container`, if any
    pub fn current(&self, container: &str) -> Option<&PlotDescription> {
        self.plots.get(container)
    }

    /// Number of successful `render` calls so far
    pub fn render_count(&self) -> usize {
        self.render_count
    }
}

impl PlotRenderer for MemoryRenderer {
    fn render(&mut self, container: &str, plot: &PlotDescription) -> Result<(), ClientError> {
        self.plots.insert(container.to_string(), plot.clone());
        self.render_count += 1;
        Ok(())
    }

    fn clear(&mut self, container: &str) -> Result<(), ClientError> {
        self.plots.remove(container);
        Ok(())
    }
}

/// Writes each container as a standalone HTML page driving plotly.js
#[derive(Debug, Clone)]
pub struct HtmlRenderer {
    output_dir: PathBuf,
}

impl HtmlRenderer {
    /// Pages are written below `output_dir`, which is created on first render
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// Path of the page backing `container`
    pub fn page_path(&self, container: &str) -> PathBuf {
        let file_name: String = container
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.output_dir.join(format!("{file_name}.html"))
    }

    /// Whether `container` currently holds a rendered page
    pub fn has_plot(&self, container: &str) -> bool {
        self.page_path(container).is_file()
    }
}

impl PlotRenderer for HtmlRenderer {
    fn render(&mut self, container: &str, plot: &PlotDescription) -> Result<(), ClientError> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            ClientError::Render(format!(
                "cannot create {}: {}",
                self.output_dir.display(),
                e
            ))
        })?;

        let path = self.page_path(container);
        fs::write(&path, html_page(plot))
            .map_err(|e| ClientError::Render(format!("cannot write {}: {}", path.display(), e)))?;

        tracing::debug!(path = %path.display(), "Plot page written");
        Ok(())
    }

    fn clear(&mut self, container: &str) -> Result<(), ClientError> {
        let path = self.page_path(container);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(ClientError::Render(format!(
                "cannot remove {}: {}",
                path.display(),
                e
            ))),
        }
    }
}

/// Standalone page that draws `plot` with plotly.js
pub fn html_page(plot: &PlotDescription) -> String {
    // No `<` may reach the inline script, or `</script>` and `<!--` in a
    // label would change how the page is parsed
    let json = |value: &serde_json::Value| value.to_string().replace('<', "\\u003c");
    let value = plot.to_json();

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>Surface viewer</title>
<script src="{cdn}"></script>
</head>
<body>
<div id="plot"></div>
<script>
Plotly.newPlot("plot", {data}, {layout}, {config});
</script>
</body>
</html>
"#,
        cdn = PLOTLY_CDN_URL,
        data = json(&value["data"]),
        layout = json(&value["layout"]),
        config = json(&value["config"]),
    )
}
