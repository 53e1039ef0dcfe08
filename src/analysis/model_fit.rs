use std::collections::BTreeMap;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::analysis::{AnalysisError, load_experiments, load_single};
use crate::input::{Experiments, RUN_PREFIX, RunTable};
use crate::model::{CorrelationMethod, LineStyle};
use crate::plot::style::{palette_range, series_styles};
use crate::plot::{AxisSpec, Line, ViolinGroup, ViolinStyle, line_chart, violinplot};
use crate::stats::correlation::{correlation_by_rep_round, median_correlation_by_round};

/// Rounds whose model was trained on too little data to be judged.
pub const UNTRAINED_ROUNDS: [u32; 2] = [0, 1];

/// Per-round violins of the per-rep model fit, skipping the first two rounds.
pub fn model_fit_groups(table: &RunTable, method: CorrelationMethod) -> Vec<ViolinGroup> {
    let mut by_round: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for ((_, round), value) in correlation_by_rep_round(table, method, &UNTRAINED_ROUNDS) {
        let values = by_round.entry(round).or_default();
        if !value.is_nan() {
            values.push(value);
        }
    }
    by_round
        .into_iter()
        .map(|(round, values)| ViolinGroup {
            label: round.to_string(),
            values,
        })
        .collect()
}

pub fn model_performance<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    path: &Path,
    method: CorrelationMethod,
    face_colors: Option<&[RGBColor]>,
) -> Result<(), AnalysisError> {
    let table = load_single(path, RUN_PREFIX)?;
    let n_round = table.max_round().unwrap_or(0) as usize;
    let groups = model_fit_groups(&table, method);
    if groups.is_empty() {
        return Err(AnalysisError::Insufficient {
            name: path.display().to_string(),
            reason: "no rounds after round 1 carry model scores".to_string(),
        });
    }

    let face_colors = match face_colors {
        Some(c) => c.to_vec(),
        None => palette_range(1, n_round.max(1)),
    };
    let style = ViolinStyle {
        face_colors: Some(face_colors),
        ..ViolinStyle::default()
    };
    violinplot(area, &groups, &style, &AxisSpec::new("round", method.label()), &[])?;
    Ok(())
}

/// Median-over-reps model fit by round. With `fill_missing`, a round whose
/// reps all have an undefined correlation reports 0.
pub fn model_fit_curve(
    table: &RunTable,
    method: CorrelationMethod,
    excluded: &[u32],
    fill_missing: bool,
) -> Vec<(u32, f64)> {
    median_correlation_by_round(table, method, excluded)
        .into_iter()
        .map(|(round, v)| {
            if fill_missing && v.is_nan() {
                (round, 0.0)
            } else {
                (round, v)
            }
        })
        .collect()
}

fn draw_fit_curves<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    tables: &[(String, RunTable)],
    method: CorrelationMethod,
    excluded: &[u32],
    fill_missing: bool,
    linestyles: Option<&[LineStyle]>,
    colors: Option<&[RGBColor]>,
) -> Result<(), AnalysisError> {
    let styles = series_styles(tables.len(), colors, linestyles);
    let lines: Vec<Line> = tables
        .iter()
        .zip(styles)
        .map(|((name, table), (color, style))| {
            let points = model_fit_curve(table, method, excluded, fill_missing)
                .into_iter()
                .map(|(round, v)| (f64::from(round), v))
                .collect();
            Line::new(Some(name.as_str()), points, color, style)
        })
        .collect();
    line_chart(area, &lines, &AxisSpec::new("round", method.label()).integer_x())?;
    Ok(())
}

pub fn model_performance_curve<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    experiments: &Experiments,
    method: CorrelationMethod,
    linestyles: Option<&[LineStyle]>,
    colors: Option<&[RGBColor]>,
) -> Result<(), AnalysisError> {
    let tables = load_experiments(experiments, RUN_PREFIX)?;
    draw_fit_curves(area, &tables, method, &UNTRAINED_ROUNDS, false, linestyles, colors)
}

/// Model fit on held-out evaluation files (`<prefix>*.csv`), from round 1 on.
pub fn eval_model<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    experiments: &Experiments,
    prefix: &str,
    method: CorrelationMethod,
    linestyles: Option<&[LineStyle]>,
    colors: Option<&[RGBColor]>,
) -> Result<(), AnalysisError> {
    let tables = load_experiments(experiments, prefix)?;
    draw_fit_curves(area, &tables, method, &[0], true, linestyles, colors)
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/model_fit.rs"]
mod tests;
