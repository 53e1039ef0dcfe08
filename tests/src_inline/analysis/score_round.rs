use super::*;
use crate::test_support::{make_temp_dir, render_svg, table, write_score_runs};

#[test]
fn test_points_accumulate_rounds_up_to_each_round() {
    let t = table(&[
        (0, 0, 0.1),
        (0, 1, 0.5),
        (0, 2, 0.2),
        (1, 0, 0.3),
        (1, 1, 0.2),
        (1, 2, 0.9),
    ]);
    let points = score_round_points(&t, ScoreColumn::TrueScore, Aggregate::Max, 10);
    assert_eq!(points.len(), 3);
    assert!((points[0].1 - 0.2).abs() < 1e-12);
    assert!((points[1].1 - 0.4).abs() < 1e-12);
    assert!((points[2].1 - 0.7).abs() < 1e-12);
}

#[test]
fn test_points_stop_at_max_round() {
    let t = table(&[(0, 0, 0.1), (0, 1, 0.5), (0, 2, 0.2), (0, 3, 0.9)]);
    let points = score_round_points(&t, ScoreColumn::TrueScore, Aggregate::Max, 1);
    assert_eq!(points, vec![(0, 0.1), (1, 0.5)]);
}

#[test]
fn test_cap_applies_to_each_experiment_independently() {
    let short = make_temp_dir();
    write_score_runs(&short, &[&[(0, 0.1), (1, 0.2)]]);
    let long = make_temp_dir();
    write_score_runs(&long, &[&[(0, 0.1), (1, 0.2), (2, 0.3), (3, 0.4)]]);
    let exps = Experiments::from_runs(vec![
        ("short".to_string(), short),
        ("long".to_string(), long.clone()),
    ]);
    let long_table = crate::input::read_data(&long, crate::input::RUN_PREFIX).unwrap();
    let points = score_round_points(&long_table, ScoreColumn::TrueScore, Aggregate::Max, 3);
    assert_eq!(points.last(), Some(&(3, 0.4)));

    let (result, svg) = render_svg(|area| {
        score_round(area, &exps, ScoreColumn::TrueScore, Aggregate::Max, 3, None, None)
    });
    result.unwrap();
    assert!(svg.contains("short"));
    assert!(svg.contains("long"));
}

#[test]
fn test_empty_table_has_no_points() {
    let t = table(&[]);
    assert!(score_round_points(&t, ScoreColumn::TrueScore, Aggregate::Max, 10).is_empty());
}
