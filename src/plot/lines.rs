use plotters::coord::Shift;
use plotters::coord::cartesian::Cartesian2d;
use plotters::coord::types::RangedCoordf64;
use plotters::prelude::*;
use plotters::series::DashedLineSeries;

use crate::model::LineStyle;
use crate::plot::{AxisSpec, PlotError, drawing, format_x_tick, format_y_tick};

pub(crate) type FloatChart<'a, DB> = ChartContext<'a, DB, Cartesian2d<RangedCoordf64, RangedCoordf64>>;

#[derive(Debug, Clone)]
pub struct Line {
    pub label: Option<String>,
    pub points: Vec<(f64, f64)>,
    /// `(x, lower, upper)` interval drawn as a translucent band.
    pub band: Option<Vec<(f64, f64, f64)>>,
    pub color: RGBColor,
    pub style: LineStyle,
}

impl Line {
    pub fn new(label: Option<&str>, points: Vec<(f64, f64)>, color: RGBColor, style: LineStyle) -> Self {
        Self {
            label: label.map(str::to_string),
            points: points.into_iter().filter(|(x, y)| x.is_finite() && y.is_finite()).collect(),
            band: None,
            color,
            style,
        }
    }

    pub fn with_band(mut self, band: Vec<(f64, f64, f64)>) -> Self {
        self.band = Some(band);
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Bounds {
    pub x: (f64, f64),
    pub y: (f64, f64),
}

impl Bounds {
    fn empty() -> Self {
        Self {
            x: (f64::INFINITY, f64::NEG_INFINITY),
            y: (f64::INFINITY, f64::NEG_INFINITY),
        }
    }

    pub(crate) fn include(&mut self, x: f64, y: f64) {
        if !x.is_finite() || !y.is_finite() {
            return;
        }
        self.x = (self.x.0.min(x), self.x.1.max(x));
        self.y = (self.y.0.min(y), self.y.1.max(y));
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.x.0 > self.x.1
    }

    /// Widens degenerate ranges and adds a small margin on y.
    pub(crate) fn padded(&self) -> Self {
        let (mut x0, mut x1) = self.x;
        let (mut y0, mut y1) = self.y;
        if x1 - x0 <= f64::EPSILON {
            x0 -= 0.5;
            x1 += 0.5;
        }
        if y1 - y0 <= f64::EPSILON {
            y0 -= 0.5;
            y1 += 0.5;
        }
        let pad = (y1 - y0) * 0.05;
        Self {
            x: (x0, x1),
            y: (y0 - pad, y1 + pad),
        }
    }
}

pub(crate) fn line_bounds(lines: &[Line]) -> Bounds {
    let mut bounds = Bounds::empty();
    for line in lines {
        for &(x, y) in &line.points {
            bounds.include(x, y);
        }
        for &(x, lo, hi) in line.band.iter().flatten() {
            bounds.include(x, lo);
            bounds.include(x, hi);
        }
    }
    bounds
}

pub(crate) fn draw_lines<DB: DrawingBackend>(
    chart: &mut FloatChart<'_, DB>,
    lines: &[Line],
) -> Result<(), PlotError> {
    for line in lines {
        if let Some(band) = &line.band {
            if band.len() > 1 {
                let mut outline: Vec<(f64, f64)> = band.iter().map(|&(x, _, hi)| (x, hi)).collect();
                outline.extend(band.iter().rev().map(|&(x, lo, _)| (x, lo)));
                chart
                    .draw_series(std::iter::once(Polygon::new(
                        outline,
                        line.color.mix(0.2).filled(),
                    )))
                    .map_err(drawing)?;
            }
        }

        let color = line.color;
        let stroke = color.stroke_width(1);
        let anno = match line.style {
            LineStyle::Solid => chart
                .draw_series(LineSeries::new(line.points.iter().copied(), stroke))
                .map_err(drawing)?,
            LineStyle::Dashed => chart
                .draw_series(DashedLineSeries::new(line.points.clone(), 8, 5, stroke))
                .map_err(drawing)?,
            LineStyle::Dotted => chart
                .draw_series(DashedLineSeries::new(line.points.clone(), 2, 4, stroke))
                .map_err(drawing)?,
        };
        if let Some(label) = &line.label {
            anno.label(label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color.stroke_width(2)));
        }
    }
    Ok(())
}

pub(crate) fn draw_legend<'a, DB: DrawingBackend + 'a>(
    chart: &mut FloatChart<'a, DB>,
) -> Result<(), PlotError> {
    chart
        .configure_series_labels()
        .background_style(WHITE.mix(0.8))
        .border_style(BLACK)
        .position(SeriesLabelPosition::LowerRight)
        .draw()
        .map_err(drawing)
}

/// Draws labelled series on shared axes sized to fit all of them.
pub fn line_chart<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    lines: &[Line],
    axes: &AxisSpec,
) -> Result<(), PlotError> {
    let bounds = line_bounds(lines);
    if bounds.is_empty() {
        return Err(PlotError::InvalidData("no finite points to plot".to_string()));
    }
    let bounds = bounds.padded();

    let mut chart = ChartBuilder::on(area)
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(bounds.x.0..bounds.x.1, bounds.y.0..bounds.y.1)
        .map_err(drawing)?;

    let x_span = (bounds.x.1 - bounds.x.0).round() as usize;
    let x_fmt = |v: &f64| format_x_tick(*v, axes.integer_x);
    let y_fmt = |v: &f64| format_y_tick(*v, axes.percent_y);
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(axes.x_label.as_str())
        .y_desc(axes.y_label.as_str())
        .x_label_formatter(&x_fmt)
        .y_label_formatter(&y_fmt);
    if axes.integer_x {
        mesh.x_labels((x_span + 1).clamp(2, 12));
    }
    mesh.draw().map_err(drawing)?;

    draw_lines(&mut chart, lines)?;
    if lines.iter().any(|l| l.label.is_some()) {
        draw_legend(&mut chart)?;
    }
    Ok(())
}
