use std::collections::BTreeMap;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use crate::analysis::cummax::cummax_line;
use crate::analysis::{AnalysisError, load_single};
use crate::input::{RUN_PREFIX, RunTable};
use crate::model::{Aggregate, LineStyle, ScoreColumn};
use crate::plot::style::palette;
use crate::plot::{AxisSpec, ViolinGroup, ViolinStyle, violinplot};
use crate::report::text::render_cummax_table;
use crate::stats::{CummaxRow, cummax_by_rep};

/// `score` values of every row, one group per round in round order.
pub fn round_groups(table: &RunTable, score: ScoreColumn) -> Vec<(u32, ViolinGroup)> {
    let mut by_round: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for record in &table.records {
        let values = by_round.entry(record.round).or_default();
        if let Some(v) = score.value(record) {
            values.push(v);
        }
    }
    by_round
        .into_iter()
        .map(|(round, values)| {
            (
                round,
                ViolinGroup {
                    label: round.to_string(),
                    values,
                },
            )
        })
        .collect()
}

/// Violin per round of `path`'s runs, overlaid with the running best.
///
/// Returns the cumulative-max rows; with `print_value` they are also
/// printed to stdout.
pub fn violin_and_cummax_round<DB: DrawingBackend>(
    area: &DrawingArea<DB, Shift>,
    path: &Path,
    score: ScoreColumn,
    print_value: bool,
    rep: Option<usize>,
) -> Result<Vec<CummaxRow>, AnalysisError> {
    let mut table = load_single(path, RUN_PREFIX)?;
    if let Some(rep) = rep {
        table = table.filter_rep(rep);
        if table.is_empty() {
            return Err(AnalysisError::InvalidArgument(format!(
                "rep {rep} not found under {}",
                path.display()
            )));
        }
    }
    let max_round = table.max_round().unwrap_or(0) as usize;

    let rounds = round_groups(&table, score);
    let position: BTreeMap<u32, f64> = rounds
        .iter()
        .enumerate()
        .map(|(idx, (round, _))| (*round, idx as f64))
        .collect();
    let groups: Vec<ViolinGroup> = rounds.into_iter().map(|(_, g)| g).collect();

    let mut face_colors = vec![palette(0)];
    face_colors.extend((0..=max_round).map(palette));
    let style = ViolinStyle {
        face_colors: Some(face_colors),
        ..ViolinStyle::default()
    };

    let with_cost = table.has_measurement_cost();
    let rows = cummax_by_rep(&table, score, Aggregate::Max, with_cost);
    let mut line = cummax_line(&rows, true, None, palette(6), LineStyle::Solid);
    line.points = line
        .points
        .iter()
        .filter_map(|(x, y)| position.get(&(*x as u32)).map(|p| (*p, *y)))
        .collect();
    line.band = line.band.map(|band| {
        band.into_iter()
            .filter_map(|(x, lo, hi)| position.get(&(x as u32)).map(|p| (*p, lo, hi)))
            .collect()
    });

    violinplot(
        area,
        &groups,
        &style,
        &AxisSpec::new("round", score.name()),
        std::slice::from_ref(&line),
    )?;

    if print_value {
        println!("{}", render_cummax_table(&rows, score));
    }
    Ok(rows)
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/violin_round.rs"]
mod tests;
