use std::cmp::Ordering;
use std::collections::BTreeMap;

use crate::input::RunRecord;
use crate::model::{Aggregate, ScoreColumn};

pub mod correlation;
pub mod cummax;

pub use cummax::{CummaxRow, cummax_by_rep};

/// Total-ordered f64 so scores and costs can key a `BTreeMap`.
#[derive(Debug, Clone, Copy)]
pub struct OrderedF64(pub f64);

impl PartialEq for OrderedF64 {
    fn eq(&self, other: &Self) -> bool {
        self.0.total_cmp(&other.0) == Ordering::Equal
    }
}

impl Eq for OrderedF64 {}

impl PartialOrd for OrderedF64 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrderedF64 {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

fn sorted_finite(values: &[f64]) -> Vec<f64> {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    sorted.sort_by(|a, b| a.total_cmp(b));
    sorted
}

/// Linearly interpolated quantile of already sorted values.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    if sorted.is_empty() {
        return f64::NAN;
    }
    let pos = (sorted.len() - 1) as f64 * q.clamp(0.0, 1.0);
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}

pub fn quantile(values: &[f64], q: f64) -> f64 {
    quantile_sorted(&sorted_finite(values), q)
}

pub fn median(values: &[f64]) -> f64 {
    quantile(values, 0.5)
}

pub fn mean(values: &[f64]) -> f64 {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    if finite.is_empty() {
        return f64::NAN;
    }
    finite.iter().sum::<f64>() / finite.len() as f64
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeanCi {
    pub mean: f64,
    pub lower: f64,
    pub upper: f64,
}

/// Mean with a normal-approximation 95% interval.
pub fn mean_ci(values: &[f64]) -> MeanCi {
    let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
    let m = mean(&finite);
    if finite.len() < 2 {
        return MeanCi {
            mean: m,
            lower: m,
            upper: m,
        };
    }
    let n = finite.len() as f64;
    let var = finite.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1.0);
    let half = 1.96 * (var / n).sqrt();
    MeanCi {
        mean: m,
        lower: m - half,
        upper: m + half,
    }
}

/// Collapses `(x, y)` observations to one mean-with-interval per distinct x.
pub fn summarize_by_x<I>(points: I) -> Vec<(f64, MeanCi)>
where
    I: IntoIterator<Item = (f64, f64)>,
{
    let mut by_x: BTreeMap<OrderedF64, Vec<f64>> = BTreeMap::new();
    for (x, y) in points {
        if x.is_nan() || y.is_nan() {
            continue;
        }
        by_x.entry(OrderedF64(x)).or_default().push(y);
    }
    by_x.into_iter().map(|(x, ys)| (x.0, mean_ci(&ys))).collect()
}

/// Groups records by `key` and reduces each group's score with `method`.
///
/// Records for which `key` returns `None` are dropped. A group whose scores
/// are all missing reduces to NaN.
pub fn aggregate_by<K, F>(
    records: &[RunRecord],
    score: ScoreColumn,
    method: Aggregate,
    key: F,
) -> BTreeMap<K, f64>
where
    K: Ord,
    F: Fn(&RunRecord) -> Option<K>,
{
    let mut groups: BTreeMap<K, Vec<f64>> = BTreeMap::new();
    for record in records {
        let Some(k) = key(record) else {
            continue;
        };
        let values = groups.entry(k).or_default();
        if let Some(v) = score.value(record) {
            values.push(v);
        }
    }
    groups
        .into_iter()
        .map(|(k, values)| (k, method.apply(&values)))
        .collect()
}

pub fn aggregate_per_rep(
    records: &[RunRecord],
    score: ScoreColumn,
    method: Aggregate,
) -> BTreeMap<usize, f64> {
    aggregate_by(records, score, method, |r| Some(r.rep))
}

/// Trapezoidal area under `(xs, ys)`.
pub fn trapezoid_auc(xs: &[f64], ys: &[f64]) -> f64 {
    xs.windows(2)
        .zip(ys.windows(2))
        .map(|(x, y)| (x[1] - x[0]) * (y[0] + y[1]) * 0.5)
        .sum()
}

/// Gaussian kernel density with Scott's bandwidth, evaluated at `points`.
///
/// Returns `None` when the sample has fewer than two values or no spread.
pub fn gaussian_kde(values: &[f64], points: &[f64]) -> Option<Vec<f64>> {
    let finite: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if finite.len() < 2 {
        return None;
    }
    let n = finite.len() as f64;
    let m = finite.iter().sum::<f64>() / n;
    let var = finite.iter().map(|v| (v - m) * (v - m)).sum::<f64>() / (n - 1.0);
    if var <= 0.0 {
        return None;
    }
    let bw = n.powf(-0.2) * var.sqrt();
    let norm = 1.0 / (n * bw * (2.0 * std::f64::consts::PI).sqrt());
    Some(
        points
            .iter()
            .map(|&p| {
                finite
                    .iter()
                    .map(|&v| {
                        let z = (p - v) / bw;
                        (-0.5 * z * z).exp()
                    })
                    .sum::<f64>()
                    * norm
            })
            .collect(),
    )
}

#[cfg(test)]
#[path = "../../tests/src_inline/stats/tests.rs"]
mod tests;
