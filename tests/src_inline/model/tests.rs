use clap::ValueEnum;

use super::*;
use crate::test_support::record;

#[test]
fn test_aggregate_skips_nan() {
    let values = [1.0, f64::NAN, 3.0, 2.0];
    assert_eq!(Aggregate::Max.apply(&values), 3.0);
    assert_eq!(Aggregate::Min.apply(&values), 1.0);
    assert_eq!(Aggregate::Mean.apply(&values), 2.0);
    assert_eq!(Aggregate::Median.apply(&values), 2.0);
    assert_eq!(Aggregate::Sum.apply(&values), 6.0);
}

#[test]
fn test_aggregate_of_nothing() {
    assert!(Aggregate::Max.apply(&[]).is_nan());
    assert!(Aggregate::Mean.apply(&[f64::NAN]).is_nan());
    assert_eq!(Aggregate::Sum.apply(&[]), 0.0);
}

#[test]
fn test_score_column_value() {
    let mut r = record(0, 1, 0.5);
    assert_eq!(ScoreColumn::TrueScore.value(&r), Some(0.5));
    assert_eq!(ScoreColumn::ModelScore.value(&r), None);
    r.model_score = Some(0.25);
    assert_eq!(ScoreColumn::ModelScore.value(&r), Some(0.25));
    assert_eq!(ScoreColumn::ModelScore.name(), "model_score");
}

#[test]
fn test_correlation_method_accepts_display_names() {
    assert_eq!(
        CorrelationMethod::from_str("NDCG", false).unwrap(),
        CorrelationMethod::Ndcg
    );
    assert_eq!(
        CorrelationMethod::from_str("spearman", false).unwrap(),
        CorrelationMethod::Spearman
    );
    assert_eq!(CorrelationMethod::Pearson.label(), "Pearson");
}

#[test]
fn test_score_column_cli_names() {
    assert_eq!(
        ScoreColumn::from_str("model_score", false).unwrap(),
        ScoreColumn::ModelScore
    );
    assert!(ScoreColumn::from_str("score", false).is_err());
}
