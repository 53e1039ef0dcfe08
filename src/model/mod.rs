use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::input::RunRecord;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScoreColumn {
    #[default]
    #[value(name = "true_score")]
    TrueScore,
    #[value(name = "model_score")]
    ModelScore,
}

impl ScoreColumn {
    pub fn name(self) -> &'static str {
        match self {
            ScoreColumn::TrueScore => "true_score",
            ScoreColumn::ModelScore => "model_score",
        }
    }

    pub fn value(self, record: &RunRecord) -> Option<f64> {
        match self {
            ScoreColumn::TrueScore => Some(record.true_score),
            ScoreColumn::ModelScore => record.model_score,
        }
    }
}

/// Reducer applied to a group of scores. NaN values are skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Aggregate {
    #[default]
    Max,
    Min,
    Mean,
    Median,
    Sum,
}

impl Aggregate {
    pub fn apply(self, values: &[f64]) -> f64 {
        let finite: Vec<f64> = values.iter().copied().filter(|v| !v.is_nan()).collect();
        if finite.is_empty() {
            return if self == Aggregate::Sum { 0.0 } else { f64::NAN };
        }
        match self {
            Aggregate::Max => finite.iter().copied().fold(f64::NEG_INFINITY, f64::max),
            Aggregate::Min => finite.iter().copied().fold(f64::INFINITY, f64::min),
            Aggregate::Mean => finite.iter().sum::<f64>() / finite.len() as f64,
            Aggregate::Median => crate::stats::median(&finite),
            Aggregate::Sum => finite.iter().sum(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
pub enum CorrelationMethod {
    #[value(name = "spearman", alias = "Spearman")]
    Spearman,
    #[value(name = "pearson", alias = "Pearson")]
    Pearson,
    #[value(name = "ndcg", alias = "NDCG")]
    Ndcg,
}

impl CorrelationMethod {
    pub fn label(self) -> &'static str {
        match self {
            CorrelationMethod::Spearman => "Spearman",
            CorrelationMethod::Pearson => "Pearson",
            CorrelationMethod::Ndcg => "NDCG",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LineStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Orientation {
    #[default]
    Vertical,
    Horizontal,
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/tests.rs"]
mod tests;
