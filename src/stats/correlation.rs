use std::collections::BTreeMap;

use crate::input::RunTable;
use crate::model::CorrelationMethod;

pub fn pearson(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }
    let n = x.len() as f64;
    let mean_x = x.iter().sum::<f64>() / n;
    let mean_y = y.iter().sum::<f64>() / n;

    let (mut num, mut denom_x, mut denom_y) = (0.0, 0.0, 0.0);
    for (&xx, &yy) in x.iter().zip(y.iter()) {
        let dx = xx - mean_x;
        let dy = yy - mean_y;
        num += dx * dy;
        denom_x += dx * dx;
        denom_y += dy * dy;
    }

    let denom = denom_x.sqrt() * denom_y.sqrt();
    if denom == 0.0 {
        return f64::NAN;
    }
    (num / denom).clamp(-1.0, 1.0)
}

/// 1-based ranks; tied values share their average rank.
pub fn rank_data(vals: &[f64]) -> Vec<f64> {
    let mut indexed: Vec<(usize, f64)> = vals.iter().copied().enumerate().collect();
    indexed.sort_by(|a, b| a.1.total_cmp(&b.1));

    let mut ranks = vec![0.0; vals.len()];
    let mut i = 0;
    while i < indexed.len() {
        let val = indexed[i].1;
        let mut j = i + 1;
        while j < indexed.len() && indexed[j].1 == val {
            j += 1;
        }
        let avg_rank = ((i + 1) as f64 + j as f64) / 2.0;
        for item in &indexed[i..j] {
            ranks[item.0] = avg_rank;
        }
        i = j;
    }
    ranks
}

pub fn spearman(x: &[f64], y: &[f64]) -> f64 {
    if x.len() != y.len() || x.len() < 2 {
        return f64::NAN;
    }
    pearson(&rank_data(x), &rank_data(y))
}

fn discount(position: usize) -> f64 {
    1.0 / ((position + 2) as f64).log2()
}

/// Normalized discounted cumulative gain of ranking `y_true` by `y_score`.
///
/// Gains are the raw true scores. Items with equal predicted scores share
/// the average of their gains over the positions they occupy.
pub fn ndcg(y_true: &[f64], y_score: &[f64]) -> f64 {
    if y_true.len() != y_score.len() || y_true.len() < 2 {
        return f64::NAN;
    }

    let mut order: Vec<usize> = (0..y_score.len()).collect();
    order.sort_by(|&a, &b| y_score[b].total_cmp(&y_score[a]));

    let mut dcg = 0.0;
    let mut pos = 0;
    while pos < order.len() {
        let score = y_score[order[pos]];
        let mut end = pos + 1;
        while end < order.len() && y_score[order[end]] == score {
            end += 1;
        }
        let gain = order[pos..end].iter().map(|&i| y_true[i]).sum::<f64>() / (end - pos) as f64;
        let disc: f64 = (pos..end).map(discount).sum();
        dcg += gain * disc;
        pos = end;
    }

    let mut ideal = y_true.to_vec();
    ideal.sort_by(|a, b| b.total_cmp(a));
    let idcg: f64 = ideal.iter().enumerate().map(|(i, g)| g * discount(i)).sum();
    if idcg == 0.0 {
        return 0.0;
    }
    dcg / idcg
}

pub fn correlate(method: CorrelationMethod, y_true: &[f64], y_model: &[f64]) -> f64 {
    match method {
        CorrelationMethod::Spearman => spearman(y_true, y_model),
        CorrelationMethod::Pearson => pearson(y_true, y_model),
        CorrelationMethod::Ndcg => ndcg(y_true, y_model),
    }
}

/// Correlation between true and model scores for every `(rep, round)` group.
///
/// Rows without a model score are dropped. Rounds in `excluded` are skipped.
pub fn correlation_by_rep_round(
    table: &RunTable,
    method: CorrelationMethod,
    excluded: &[u32],
) -> BTreeMap<(usize, u32), f64> {
    let mut groups: BTreeMap<(usize, u32), (Vec<f64>, Vec<f64>)> = BTreeMap::new();
    for record in &table.records {
        if excluded.contains(&record.round) {
            continue;
        }
        let Some(model) = record.model_score else {
            continue;
        };
        if record.true_score.is_nan() || model.is_nan() {
            continue;
        }
        let (truth, pred) = groups.entry((record.rep, record.round)).or_default();
        truth.push(record.true_score);
        pred.push(model);
    }
    groups
        .into_iter()
        .map(|(key, (truth, pred))| (key, correlate(method, &truth, &pred)))
        .collect()
}

/// Median over reps of the per-(rep, round) correlation, keyed by round.
pub fn median_correlation_by_round(
    table: &RunTable,
    method: CorrelationMethod,
    excluded: &[u32],
) -> BTreeMap<u32, f64> {
    let mut by_round: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for ((_, round), value) in correlation_by_rep_round(table, method, excluded) {
        by_round.entry(round).or_default().push(value);
    }
    by_round
        .into_iter()
        .map(|(round, values)| (round, crate::stats::median(&values)))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/correlation.rs"]
mod tests;
