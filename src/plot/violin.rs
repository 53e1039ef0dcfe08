use plotters::coord::Shift;
use plotters::prelude::*;

use crate::model::Orientation;
use crate::plot::lines::{Bounds, FloatChart, draw_legend, draw_lines, line_bounds};
use crate::plot::style::{EDGE_GRAY, palette};
use crate::plot::{AxisSpec, Line, PlotError, drawing, format_y_tick};
use crate::stats::{gaussian_kde, quantile_sorted};

const KDE_POINTS: usize = 100;
const HALF_WIDTH: f64 = 0.25;

#[derive(Debug, Clone)]
pub struct ViolinGroup {
    pub label: String,
    pub values: Vec<f64>,
}

#[derive(Debug, Clone)]
pub struct ViolinStyle {
    pub face_colors: Option<Vec<RGBColor>>,
    pub edge_color: RGBColor,
    pub alpha: f64,
    pub orientation: Orientation,
}

impl Default for ViolinStyle {
    fn default() -> Self {
        Self {
            face_colors: None,
            edge_color: EDGE_GRAY,
            alpha: 0.8,
            orientation: Orientation::Vertical,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViolinStats {
    pub min: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
    pub max: f64,
    pub lower_adjacent: f64,
    pub upper_adjacent: f64,
}

/// Quartiles plus whisker ends clipped to `[min, q1]` and `[q3, max]`.
pub fn violin_stats(values: &[f64]) -> Option<ViolinStats> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return None;
    }
    sorted.sort_by(|a, b| a.total_cmp(b));
    let min = sorted[0];
    let max = sorted[sorted.len() - 1];
    let q1 = quantile_sorted(&sorted, 0.25);
    let median = quantile_sorted(&sorted, 0.5);
    let q3 = quantile_sorted(&sorted, 0.75);
    let iqr = q3 - q1;
    Some(ViolinStats {
        min,
        q1,
        median,
        q3,
        max,
        lower_adjacent: (q1 - 1.5 * iqr).clamp(min, q1),
        upper_adjacent: (q3 + 1.5 * iqr).clamp(q3, max),
    })
}

fn place(orientation: Orientation, pos: f64, value: f64) -> (f64, f64) {
    match orientation {
        Orientation::Vertical => (pos, value),
        Orientation::Horizontal => (value, pos),
    }
}

fn body_outline(values: &[f64], stats: &ViolinStats, pos: f64, orientation: Orientation) -> Option<Vec<(f64, f64)>> {
    let step = (stats.max - stats.min) / (KDE_POINTS - 1) as f64;
    let grid: Vec<f64> = (0..KDE_POINTS).map(|i| stats.min + step * i as f64).collect();
    let density = gaussian_kde(values, &grid)?;
    let peak = density.iter().copied().fold(0.0, f64::max);
    if peak <= 0.0 {
        return None;
    }
    let mut outline: Vec<(f64, f64)> = grid
        .iter()
        .zip(&density)
        .map(|(&v, &d)| place(orientation, pos + HALF_WIDTH * d / peak, v))
        .collect();
    outline.extend(
        grid.iter()
            .zip(&density)
            .rev()
            .map(|(&v, &d)| place(orientation, pos - HALF_WIDTH * d / peak, v)),
    );
    Some(outline)
}

fn draw_violin<DB: DrawingBackend>(
    chart: &mut FloatChart<'_, DB>,
    group: &ViolinGroup,
    pos: f64,
    face: RGBColor,
    style: &ViolinStyle,
) -> Result<(), PlotError> {
    let Some(stats) = violin_stats(&group.values) else {
        return Ok(());
    };
    let orientation = style.orientation;

    if let Some(outline) = body_outline(&group.values, &stats, pos, orientation) {
        chart
            .draw_series(std::iter::once(Polygon::new(
                outline.clone(),
                face.mix(style.alpha).filled(),
            )))
            .map_err(drawing)?;
        let mut closed = outline;
        if let Some(&first) = closed.first() {
            closed.push(first);
        }
        chart
            .draw_series(std::iter::once(PathElement::new(
                closed,
                style.edge_color.stroke_width(1),
            )))
            .map_err(drawing)?;
    }

    chart
        .draw_series([
            PathElement::new(
                vec![
                    place(orientation, pos, stats.lower_adjacent),
                    place(orientation, pos, stats.upper_adjacent),
                ],
                BLACK.stroke_width(1),
            ),
            PathElement::new(
                vec![place(orientation, pos, stats.q1), place(orientation, pos, stats.q3)],
                BLACK.stroke_width(5),
            ),
        ])
        .map_err(drawing)?;
    chart
        .draw_series(std::iter::once(Circle::new(
            place(orientation, pos, stats.median),
            2,
            WHITE.filled(),
        )))
        .map_err(drawing)?;
    Ok(())
}

/// Violins for each group at positions `0..n`, optionally overlaid with lines
/// drawn in the same coordinates.
pub fn violinplot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    groups: &[ViolinGroup],
    style: &ViolinStyle,
    axes: &AxisSpec,
    overlay: &[Line],
) -> Result<(), PlotError> {
    let n = groups.len();
    let mut value_bounds = Bounds {
        x: (0.0, 0.0),
        y: (f64::INFINITY, f64::NEG_INFINITY),
    };
    for v in groups.iter().flat_map(|g| g.values.iter()) {
        value_bounds.include(0.0, *v);
    }
    let overlay_bounds = line_bounds(overlay);
    if !overlay_bounds.is_empty() {
        value_bounds.include(0.0, overlay_bounds.y.0);
        value_bounds.include(0.0, overlay_bounds.y.1);
    }
    if n == 0 || value_bounds.y.0 > value_bounds.y.1 {
        return Err(PlotError::InvalidData("no values to draw violins for".to_string()));
    }
    let values = value_bounds.padded().y;
    let categories = (-0.5, n as f64 - 0.5);

    let (x_range, y_range) = match style.orientation {
        Orientation::Vertical => (categories, values),
        Orientation::Horizontal => (values, categories),
    };
    let mut chart = ChartBuilder::on(area)
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(drawing)?;

    let labels: Vec<&str> = groups.iter().map(|g| g.label.as_str()).collect();
    let category_fmt = |v: &f64| {
        let r = v.round();
        if (v - r).abs() < 1e-6 && r >= 0.0 && (r as usize) < labels.len() {
            labels[r as usize].to_string()
        } else {
            String::new()
        }
    };
    let value_fmt = |v: &f64| format_y_tick(*v, axes.percent_y);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(axes.x_label.as_str()).y_desc(axes.y_label.as_str());
    match style.orientation {
        Orientation::Vertical => {
            mesh.disable_x_mesh()
                .x_labels(n.max(2))
                .x_label_formatter(&category_fmt)
                .y_label_formatter(&value_fmt);
        }
        Orientation::Horizontal => {
            mesh.disable_y_mesh()
                .y_labels(n.max(2))
                .y_label_formatter(&category_fmt)
                .x_label_formatter(&value_fmt);
        }
    }
    mesh.draw().map_err(drawing)?;

    for (idx, group) in groups.iter().enumerate() {
        let face = match &style.face_colors {
            Some(colors) if !colors.is_empty() => colors[idx % colors.len()],
            _ => palette(idx),
        };
        draw_violin(&mut chart, group, idx as f64, face, style)?;
    }

    if !overlay.is_empty() {
        draw_lines(&mut chart, overlay)?;
        if overlay.iter().any(|l| l.label.is_some()) {
            draw_legend(&mut chart)?;
        }
    }
    Ok(())
}
