use super::*;

#[test]
fn test_success_message_format() {
    assert_eq!(success_message(10, "greedy", 40.0), "Round 10-greedy: 40.00%");
    assert_eq!(success_message(3, "x", 100.0 / 3.0), "Round 3-x: 33.33%");
}

#[test]
fn test_cummax_table_lists_rows() {
    let rows = vec![
        CummaxRow {
            round: 0,
            measurement_cost: None,
            rep: 0,
            value: 0.25,
        },
        CummaxRow {
            round: 1,
            measurement_cost: Some(2.0),
            rep: 1,
            value: 0.5,
        },
    ];
    let out = render_cummax_table(&rows, ScoreColumn::TrueScore);
    assert!(out.starts_with("cumulative max of true_score"));
    assert!(out.contains("measurement_cost"));
    assert!(out.contains("0.2500"));
    assert!(out.contains("2.0000"));
    assert_eq!(
        render_cummax_table(&[], ScoreColumn::ModelScore),
        "No model_score values to show"
    );
}

#[test]
fn test_success_table_aligns_rounds() {
    let rows = vec![
        SuccessRow {
            name: "greedy".to_string(),
            ratios: vec![(5, 20.0), (10, 40.0)],
        },
        SuccessRow {
            name: "random".to_string(),
            ratios: vec![(10, 12.5)],
        },
    ];
    let out = render_success_table(&rows);
    assert!(out.contains("round 5"));
    assert!(out.contains("round 10"));
    assert!(out.contains("40.00%"));
    assert!(out.contains("12.50%"));
    assert!(out.contains("random"));
}

#[test]
fn test_named_value_tables() {
    let auc = render_auc_table(&[AucRow {
        name: "greedy".to_string(),
        auc: 1.25,
    }]);
    assert!(auc.contains("experiment"));
    assert!(auc.contains("1.2500"));

    let rs = render_rs_table(&[("gb1".to_string(), f64::NAN)]);
    assert!(rs.contains("gb1"));
    assert!(rs.contains("nan"));
}
