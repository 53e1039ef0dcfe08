use serde::Serialize;
use tracing::debug;

use crate::analysis::{AnalysisError, load_experiments};
use crate::input::{Experiments, RUN_PREFIX, RunTable};
use crate::model::{Aggregate, ScoreColumn};
use crate::stats::cummax::median_cummax_by_round;
use crate::stats::trapezoid_auc;

pub const DEFAULT_AUC_ROUND: u32 = 10;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AucRow {
    pub name: String,
    pub auc: f64,
}

/// Median running best by round, rescaled so round 0 maps to 0 and a
/// perfect score of 1 maps to 1.
pub fn normalized_curve(
    name: &str,
    table: &RunTable,
    score: ScoreColumn,
    method: Aggregate,
) -> Result<Vec<(u32, f64)>, AnalysisError> {
    let curve = median_cummax_by_round(table, score, method);
    let baseline = curve
        .iter()
        .find(|(round, _)| *round == 0)
        .map(|(_, v)| *v)
        .ok_or_else(|| AnalysisError::MissingRound {
            name: name.to_string(),
            round: 0,
        })?;
    if (1.0 - baseline).abs() < f64::EPSILON {
        return Err(AnalysisError::Insufficient {
            name: name.to_string(),
            reason: "round 0 already reaches a score of 1; nothing left to normalize".to_string(),
        });
    }
    Ok(curve
        .into_iter()
        .map(|(round, v)| (round, (v - baseline) / (1.0 - baseline)))
        .collect())
}

/// Area under the normalized curve over its first `round + 1` rounds.
pub fn curve_auc(name: &str, curve: &[(u32, f64)], round: u32) -> Result<f64, AnalysisError> {
    let take = (round as usize + 1).min(curve.len());
    if take < 2 {
        return Err(AnalysisError::Insufficient {
            name: name.to_string(),
            reason: "at least two rounds are needed for an area under the curve".to_string(),
        });
    }
    let xs: Vec<f64> = curve[..take].iter().map(|(r, _)| f64::from(*r)).collect();
    let ys: Vec<f64> = curve[..take].iter().map(|(_, v)| *v).collect();
    Ok(trapezoid_auc(&xs, &ys))
}

pub fn auc(
    experiments: &Experiments,
    round: u32,
    score: ScoreColumn,
    method: Aggregate,
) -> Result<Vec<AucRow>, AnalysisError> {
    let tables = load_experiments(experiments, RUN_PREFIX)?;
    tables
        .iter()
        .map(|(name, table)| {
            let curve = normalized_curve(name, table, score, method)?;
            let value = curve_auc(name, &curve, round)?;
            debug!("{}: auc over {} rounds = {}", name, round + 1, value);
            Ok(AucRow {
                name: name.clone(),
                auc: value,
            })
        })
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/analysis/auc.rs"]
mod tests;
