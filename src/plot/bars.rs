use plotters::coord::Shift;
use plotters::prelude::*;

use crate::model::Orientation;
use crate::plot::style::palette;
use crate::plot::{AxisSpec, PlotError, drawing};

const BAR_HALF_WIDTH: f64 = 0.4;

/// One bar per `(label, count)`, with the count written at the bar's end.
pub fn barplot_count<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    counts: &[(String, usize)],
    orientation: Orientation,
    axes: &AxisSpec,
) -> Result<(), PlotError> {
    if counts.is_empty() {
        return Err(PlotError::InvalidData("nothing to count".to_string()));
    }
    let n = counts.len();
    let max_count = counts.iter().map(|(_, c)| *c).max().unwrap_or(0).max(1) as f64;
    let categories = (-0.5, n as f64 - 0.5);
    let values = (0.0, max_count * 1.1);
    let (x_range, y_range) = match orientation {
        Orientation::Vertical => (categories, values),
        Orientation::Horizontal => (values, categories),
    };

    let mut chart = ChartBuilder::on(area)
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)
        .map_err(drawing)?;

    let category_fmt = |v: &f64| {
        let r = v.round();
        if (v - r).abs() < 1e-6 && r >= 0.0 && (r as usize) < n {
            counts[r as usize].0.clone()
        } else {
            String::new()
        }
    };
    let count_fmt = |v: &f64| format!("{v:.0}");
    let mut mesh = chart.configure_mesh();
    mesh.x_desc(axes.x_label.as_str()).y_desc(axes.y_label.as_str());
    match orientation {
        Orientation::Vertical => {
            mesh.disable_x_mesh()
                .x_labels(n.max(2))
                .x_label_formatter(&category_fmt)
                .y_label_formatter(&count_fmt);
        }
        Orientation::Horizontal => {
            mesh.disable_y_mesh()
                .y_labels(n.max(2))
                .y_label_formatter(&category_fmt)
                .x_label_formatter(&count_fmt);
        }
    }
    mesh.draw().map_err(drawing)?;

    let color = palette(0);
    for (idx, (_, count)) in counts.iter().enumerate() {
        let pos = idx as f64;
        let value = *count as f64;
        let (corner_a, corner_b, label_at) = match orientation {
            Orientation::Vertical => (
                (pos - BAR_HALF_WIDTH, 0.0),
                (pos + BAR_HALF_WIDTH, value),
                (pos - BAR_HALF_WIDTH / 2.0, value + max_count * 0.03),
            ),
            Orientation::Horizontal => (
                (0.0, pos - BAR_HALF_WIDTH),
                (value, pos + BAR_HALF_WIDTH),
                (value + max_count * 0.01, pos),
            ),
        };
        chart
            .draw_series(std::iter::once(Rectangle::new(
                [corner_a, corner_b],
                color.mix(0.9).filled(),
            )))
            .map_err(drawing)?;
        chart
            .draw_series(std::iter::once(Text::new(
                count.to_string(),
                label_at,
                ("sans-serif", 14),
            )))
            .map_err(drawing)?;
    }
    Ok(())
}
