use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::warn;

use crate::analysis::{AnalysisError, load_experiments};
use crate::input::{Experiments, RUN_PREFIX, RunTable};
use crate::model::{Aggregate, LineStyle, ScoreColumn};
use crate::plot::style::series_styles;
use crate::plot::{AxisSpec, Line, line_chart};
use crate::stats::{CummaxRow, cummax_by_rep, summarize_by_x};

/// Running best per rep, grouped by `(rep, round, measurement_cost)`.
///
/// Tables without any measurement cost fall back to `(rep, round)` groups,
/// which only supports a round x axis.
pub fn cummax_rows(
    name: &str,
    table: &RunTable,
    score: ScoreColumn,
    method: Aggregate,
    xaxis_is_round: bool,
) -> Result<Vec<CummaxRow>, AnalysisError> {
    let with_cost = table.has_measurement_cost();
    if !with_cost {
        if !xaxis_is_round {
            return Err(AnalysisError::Insufficient {
                name: name.to_string(),
                reason: "no measurement_cost values to use as x axis".to_string(),
            });
        }
        warn!("{}: no measurement_cost column; grouping by round only", name);
    }
    Ok(cummax_by_rep(table, score, method, with_cost))
}

/// Mean over reps of the running best, with a 95% band.
pub fn cummax_line(rows: &[CummaxRow], xaxis_is_round: bool, label: Option<&str>, color: RGBColor, style: LineStyle) -> Line {
    let points = rows.iter().filter_map(|r| {
        let x = if xaxis_is_round {
            Some(f64::from(r.round))
        } else {
            r.measurement_cost
        };
        x.map(|x| (x, r.value))
    });
    let summary = summarize_by_x(points);
    let mean = summary.iter().map(|(x, ci)| (*x, ci.mean)).collect();
    let band = summary.iter().map(|(x, ci)| (*x, ci.lower, ci.upper)).collect();
    Line::new(label, mean, color, style).with_band(band)
}

pub fn cummax_round<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    experiments: &Experiments,
    score: ScoreColumn,
    method: Aggregate,
    xaxis_is_round: bool,
    linestyles: Option<&[LineStyle]>,
    colors: Option<&[RGBColor]>,
) -> Result<(), AnalysisError> {
    let tables = load_experiments(experiments, RUN_PREFIX)?;
    let styles = series_styles(tables.len(), colors, linestyles);

    let mut lines = Vec::with_capacity(tables.len());
    for ((name, table), (color, style)) in tables.iter().zip(styles) {
        let rows = cummax_rows(name, table, score, method, xaxis_is_round)?;
        lines.push(cummax_line(&rows, xaxis_is_round, Some(name.as_str()), color, style));
    }

    let x_label = if xaxis_is_round { "round" } else { "measurement_cost" };
    let mut axes = AxisSpec::new(x_label, score.name());
    if xaxis_is_round {
        axes = axes.integer_x();
    }
    line_chart(area, &lines, &axes)?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/cummax.rs"]
mod tests;
