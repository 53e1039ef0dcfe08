use std::collections::BTreeMap;

use plotters::coord::Shift;
use plotters::prelude::*;
use serde::Serialize;

use crate::analysis::{AnalysisError, load_experiments};
use crate::input::{Experiments, RUN_PREFIX, RunTable};
use crate::model::{Aggregate, LineStyle, ScoreColumn};
use crate::plot::style::series_styles;
use crate::plot::{AxisSpec, Line, line_chart};
use crate::report::text::success_message;
use crate::stats::aggregate_by;

/// Target level for a success, as a percentage of the `[min, max]` score range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SuccessLevel {
    pub level: f64,
    pub global_max: f64,
    pub global_min: f64,
}

impl Default for SuccessLevel {
    fn default() -> Self {
        Self {
            level: 100.0,
            global_max: 1.0,
            global_min: 0.0,
        }
    }
}

impl SuccessLevel {
    pub fn threshold(&self) -> f64 {
        (self.global_max - self.global_min) * self.level / 100.0 + self.global_min
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SuccessRow {
    pub name: String,
    pub ratios: Vec<(u32, f64)>,
}

/// Percentage of reps whose best `true_score` has reached `threshold` by each round.
///
/// A hit carries over to every later round of the same rep, including rounds
/// the rep has no rows for, so the curve never decreases.
pub fn success_curve(table: &RunTable, threshold: f64) -> Vec<(u32, f64)> {
    let n_reps = table.n_reps();
    if n_reps == 0 {
        return Vec::new();
    }
    let best = aggregate_by(&table.records, ScoreColumn::TrueScore, Aggregate::Max, |r| {
        Some((r.rep, r.round))
    });

    let mut by_rep: BTreeMap<usize, BTreeMap<u32, bool>> = BTreeMap::new();
    for ((rep, round), value) in best {
        by_rep.entry(rep).or_default().insert(round, value >= threshold);
    }

    let mut hits: BTreeMap<u32, usize> = table.rounds().into_iter().map(|r| (r, 0)).collect();
    for rounds in by_rep.values() {
        let mut reached = false;
        for (round, count) in hits.iter_mut() {
            reached |= rounds.get(round).copied().unwrap_or(false);
            if reached {
                *count += 1;
            }
        }
    }

    hits.into_iter()
        .map(|(round, count)| (round, count as f64 / n_reps as f64 * 100.0))
        .collect()
}

fn pick_rounds(
    name: &str,
    curve: &[(u32, f64)],
    rounds: Option<&[u32]>,
) -> Result<Vec<(u32, f64)>, AnalysisError> {
    let lookup: BTreeMap<u32, f64> = curve.iter().copied().collect();
    let wanted: Vec<u32> = match rounds {
        Some(r) => r.to_vec(),
        None => curve.last().map(|(r, _)| *r).into_iter().collect(),
    };
    wanted
        .into_iter()
        .map(|round| {
            lookup
                .get(&round)
                .map(|v| (round, *v))
                .ok_or_else(|| AnalysisError::MissingRound {
                    name: name.to_string(),
                    round,
                })
        })
        .collect()
}

/// Success ratio per experiment at `rounds` (default: each experiment's last round).
pub fn success_ratio(
    experiments: &Experiments,
    level: SuccessLevel,
    rounds: Option<&[u32]>,
) -> Result<Vec<SuccessRow>, AnalysisError> {
    let threshold = level.threshold();
    let tables = load_experiments(experiments, RUN_PREFIX)?;
    tables
        .iter()
        .map(|(name, table)| {
            let curve = success_curve(table, threshold);
            Ok(SuccessRow {
                name: name.clone(),
                ratios: pick_rounds(name, &curve, rounds)?,
            })
        })
        .collect()
}

pub fn success_ratio_plot<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    experiments: &Experiments,
    level: SuccessLevel,
    linestyles: Option<&[LineStyle]>,
    colors: Option<&[RGBColor]>,
    print_rounds: Option<&[u32]>,
) -> Result<(), AnalysisError> {
    let threshold = level.threshold();
    let tables = load_experiments(experiments, RUN_PREFIX)?;
    let styles = series_styles(tables.len(), colors, linestyles);

    let mut lines = Vec::with_capacity(tables.len());
    let mut messages = Vec::new();
    for ((name, table), (color, style)) in tables.iter().zip(styles) {
        let curve = success_curve(table, threshold);
        for (round, ratio) in pick_rounds(name, &curve, print_rounds)? {
            messages.push(success_message(round, name, ratio));
        }
        let points = curve.iter().map(|(r, v)| (f64::from(*r), *v)).collect();
        lines.push(Line::new(Some(name.as_str()), points, color, style));
    }

    line_chart(area, &lines, &AxisSpec::new("round", "success ratio").integer_x().percent_y())?;
    for message in messages {
        println!("{message}");
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/success.rs"]
mod tests;
