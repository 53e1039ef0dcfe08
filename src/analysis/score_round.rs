use plotters::coord::Shift;
use plotters::prelude::*;

use crate::analysis::{AnalysisError, load_experiments};
use crate::input::{Experiments, RUN_PREFIX, RunTable};
use crate::model::{Aggregate, LineStyle, ScoreColumn};
use crate::plot::style::series_styles;
use crate::plot::{AxisSpec, Line, line_chart};
use crate::stats::{aggregate_per_rep, median};

pub const DEFAULT_MAX_ROUND: u32 = 10;

/// For each round `r` up to `max_round`, the median over reps of `score`
/// reduced with `method` over every row with `round <= r`.
pub fn score_round_points(table: &RunTable, score: ScoreColumn, method: Aggregate, max_round: u32) -> Vec<(u32, f64)> {
    let Some(last) = table.max_round() else {
        return Vec::new();
    };
    let last = last.min(max_round);
    (0..=last)
        .filter_map(|round| {
            let upto = table.filter(|r| r.round <= round);
            let per_rep: Vec<f64> = aggregate_per_rep(&upto.records, score, method)
                .into_values()
                .collect();
            let value = median(&per_rep);
            (!value.is_nan()).then_some((round, value))
        })
        .collect()
}

pub fn score_round<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    experiments: &Experiments,
    score: ScoreColumn,
    method: Aggregate,
    max_round: u32,
    linestyles: Option<&[LineStyle]>,
    colors: Option<&[RGBColor]>,
) -> Result<(), AnalysisError> {
    let tables = load_experiments(experiments, RUN_PREFIX)?;
    let styles = series_styles(tables.len(), colors, linestyles);

    let lines: Vec<Line> = tables
        .iter()
        .zip(styles)
        .map(|((name, table), (color, style))| {
            let points = score_round_points(table, score, method, max_round)
                .into_iter()
                .map(|(round, v)| (f64::from(round), v))
                .collect();
            Line::new(Some(name.as_str()), points, color, style)
        })
        .collect();

    line_chart(area, &lines, &AxisSpec::new("round", score.name()).integer_x())?;
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/score_round.rs"]
mod tests;
