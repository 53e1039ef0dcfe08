use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

pub mod bars;
pub mod lines;
pub mod style;
pub mod violin;

pub use lines::{Line, line_chart};
pub use violin::{ViolinGroup, ViolinStyle, violinplot};

#[derive(Debug, thiserror::Error)]
pub enum PlotError {
    #[error("failed to draw chart: {0}")]
    Drawing(String),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

pub(crate) fn drawing<E: std::fmt::Display>(err: E) -> PlotError {
    PlotError::Drawing(err.to_string())
}

/// Axis titles and tick formatting shared by every chart.
#[derive(Debug, Clone, Default)]
pub struct AxisSpec {
    pub x_label: String,
    pub y_label: String,
    pub integer_x: bool,
    pub percent_y: bool,
}

impl AxisSpec {
    pub fn new(x_label: &str, y_label: &str) -> Self {
        Self {
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            integer_x: false,
            percent_y: false,
        }
    }

    pub fn integer_x(mut self) -> Self {
        self.integer_x = true;
        self
    }

    pub fn percent_y(mut self) -> Self {
        self.percent_y = true;
        self
    }
}

pub(crate) fn format_x_tick(v: f64, integer: bool) -> String {
    if !integer {
        return format!("{v:.2}");
    }
    let rounded = v.round();
    if (v - rounded).abs() < 1e-6 {
        format!("{}", rounded as i64)
    } else {
        String::new()
    }
}

pub(crate) fn format_y_tick(v: f64, percent: bool) -> String {
    if percent {
        format!("{v:.0}%")
    } else {
        format!("{v:.2}")
    }
}

/// Anything that can draw itself onto a caller-owned drawing area.
pub trait Figure {
    type Error: From<PlotError>;

    fn draw<DB: DrawingBackend>(&self, area: &DrawingArea<DB, Shift>) -> Result<(), Self::Error>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Svg,
    Png,
}

pub fn output_format(path: &Path) -> OutputFormat {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("svg") => OutputFormat::Svg,
        _ => OutputFormat::Png,
    }
}

/// Renders `figure` to `path`; `.svg` goes through the SVG backend, anything else is PNG.
pub fn save_figure<F: Figure>(
    figure: &F,
    path: &Path,
    size: (u32, u32),
    title: Option<&str>,
) -> Result<(), F::Error> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .map_err(|e| PlotError::Drawing(format!("{}: {e}", parent.display())))?;
        }
    }
    match output_format(path) {
        OutputFormat::Svg => draw_root(SVGBackend::new(path, size).into_drawing_area(), figure, title)?,
        OutputFormat::Png => {
            draw_root(BitMapBackend::new(path, size).into_drawing_area(), figure, title)?
        }
    }
    info!("saved chart to {}", path.display());
    Ok(())
}

pub fn draw_root<DB: DrawingBackend, F: Figure>(
    root: DrawingArea<DB, Shift>,
    figure: &F,
    title: Option<&str>,
) -> Result<(), F::Error> {
    root.fill(&WHITE).map_err(drawing)?;
    match title {
        Some(text) => {
            let inner = root.titled(text, ("sans-serif", 22)).map_err(drawing)?;
            figure.draw(&inner)?;
        }
        None => figure.draw(&root)?,
    }
    root.present().map_err(drawing)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/plot/tests.rs"]
mod tests;
