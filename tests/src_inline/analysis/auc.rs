use super::*;
use crate::test_support::{make_temp_dir, table, write_score_runs};

#[test]
fn test_normalized_curve_maps_round_zero_to_zero() {
    let t = table(&[(0, 0, 0.5), (0, 1, 0.75), (0, 2, 1.0)]);
    let curve = normalized_curve("x", &t, ScoreColumn::TrueScore, Aggregate::Max).unwrap();
    assert_eq!(curve, vec![(0, 0.0), (1, 0.5), (2, 1.0)]);
}

#[test]
fn test_normalized_curve_rejects_saturated_or_missing_baseline() {
    let saturated = table(&[(0, 0, 1.0), (0, 1, 1.0)]);
    assert!(matches!(
        normalized_curve("x", &saturated, ScoreColumn::TrueScore, Aggregate::Max),
        Err(AnalysisError::Insufficient { .. })
    ));

    let late = table(&[(0, 1, 0.2), (0, 2, 0.4)]);
    assert!(matches!(
        normalized_curve("x", &late, ScoreColumn::TrueScore, Aggregate::Max),
        Err(AnalysisError::MissingRound { round: 0, .. })
    ));
}

#[test]
fn test_curve_auc_truncates_to_round() {
    let curve = vec![(0, 0.0), (1, 0.5), (2, 1.0), (3, 1.0)];
    assert!((curve_auc("x", &curve, 2).unwrap() - 1.0).abs() < 1e-12);
    assert!((curve_auc("x", &curve, 10).unwrap() - 2.0).abs() < 1e-12);
    assert!(matches!(
        curve_auc("x", &curve, 0),
        Err(AnalysisError::Insufficient { .. })
    ));
}

#[test]
fn test_auc_per_experiment_in_name_order() {
    let fast = make_temp_dir();
    write_score_runs(&fast, &[&[(0, 0.0), (1, 1.0), (2, 1.0)]]);
    let slow = make_temp_dir();
    write_score_runs(&slow, &[&[(0, 0.0), (1, 0.0), (2, 1.0)]]);
    let exps = Experiments::from_runs(vec![
        ("slow".to_string(), slow),
        ("fast".to_string(), fast),
    ]);

    let rows = auc(&exps, 2, ScoreColumn::TrueScore, Aggregate::Max).unwrap();
    assert_eq!(rows[0].name, "fast");
    assert!((rows[0].auc - 1.5).abs() < 1e-12);
    assert_eq!(rows[1].name, "slow");
    assert!((rows[1].auc - 0.5).abs() < 1e-12);
}
