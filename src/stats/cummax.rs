use std::collections::BTreeMap;

use crate::input::RunTable;
use crate::model::{Aggregate, ScoreColumn};
use crate::stats::{OrderedF64, aggregate_by};

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CummaxRow {
    pub round: u32,
    pub measurement_cost: Option<f64>,
    pub rep: usize,
    pub value: f64,
}

/// Running best score per rep.
///
/// Scores are grouped by `(rep, round)` or, with `with_cost`, by
/// `(rep, round, measurement_cost)` and reduced with `method`. Each rep then
/// carries a running maximum along the sorted group keys. A key missing for
/// a rep yields no row for that rep, and does not reset its running value.
pub fn cummax_by_rep(
    table: &RunTable,
    score: ScoreColumn,
    method: Aggregate,
    with_cost: bool,
) -> Vec<CummaxRow> {
    let grouped = aggregate_by(&table.records, score, method, |r| {
        let cost = if with_cost {
            Some(OrderedF64(r.measurement_cost?))
        } else {
            None
        };
        Some((r.round, cost, r.rep))
    });

    let mut by_key: BTreeMap<(u32, Option<OrderedF64>), BTreeMap<usize, f64>> = BTreeMap::new();
    for ((round, cost, rep), value) in grouped {
        by_key.entry((round, cost)).or_default().insert(rep, value);
    }

    let mut running: BTreeMap<usize, f64> = BTreeMap::new();
    let mut out = Vec::new();
    for ((round, cost), reps) in by_key {
        for (rep, value) in reps {
            if value.is_nan() {
                continue;
            }
            let best = running
                .entry(rep)
                .and_modify(|b| *b = b.max(value))
                .or_insert(value);
            out.push(CummaxRow {
                round,
                measurement_cost: cost.map(|c| c.0),
                rep,
                value: *best,
            });
        }
    }
    out
}

/// Per-round median across reps of the running best per-round score.
pub fn median_cummax_by_round(
    table: &RunTable,
    score: ScoreColumn,
    method: Aggregate,
) -> Vec<(u32, f64)> {
    let mut by_round: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for row in cummax_by_rep(table, score, method, false) {
        by_round.entry(row.round).or_default().push(row.value);
    }
    by_round
        .into_iter()
        .map(|(round, values)| (round, crate::stats::median(&values)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/cummax.rs"]
mod tests;
