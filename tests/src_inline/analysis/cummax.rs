use super::*;
use crate::input::RunRecord;
use crate::model::Aggregate;
use crate::plot::style::palette;
use crate::test_support::{make_temp_dir, record, render_svg, table, write_run_file, write_score_runs};

#[test]
fn test_rows_without_cost_fall_back_to_round() {
    let t = table(&[(0, 0, 0.2), (0, 1, 0.1)]);
    let rows = cummax_rows("x", &t, ScoreColumn::TrueScore, Aggregate::Max, true).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[1].value, 0.2);

    let err = cummax_rows("x", &t, ScoreColumn::TrueScore, Aggregate::Max, false).unwrap_err();
    assert!(matches!(err, AnalysisError::Insufficient { .. }));
}

#[test]
fn test_cummax_line_averages_reps_with_band() {
    let t = table(&[(0, 0, 0.2), (0, 1, 0.6), (1, 0, 0.4), (1, 1, 0.3)]);
    let rows = cummax_rows("x", &t, ScoreColumn::TrueScore, Aggregate::Max, true).unwrap();
    let line = cummax_line(&rows, true, Some("x"), palette(0), LineStyle::Solid);
    assert_eq!(line.points.len(), 2);
    assert!((line.points[0].1 - 0.3).abs() < 1e-12);
    assert!((line.points[1].1 - 0.5).abs() < 1e-12);
    let band = line.band.unwrap();
    assert!(band[0].1 < 0.3 && band[0].2 > 0.3);
}

#[test]
fn test_cost_axis_uses_measurement_cost() {
    let records: Vec<RunRecord> = [(0, 10.0, 0.1), (1, 20.0, 0.5)]
        .iter()
        .map(|&(round, cost, s)| RunRecord {
            measurement_cost: Some(cost),
            ..record(0, round, s)
        })
        .collect();
    let t = crate::input::RunTable::new(records);
    let rows = cummax_rows("x", &t, ScoreColumn::TrueScore, Aggregate::Max, false).unwrap();
    let line = cummax_line(&rows, false, None, palette(0), LineStyle::Solid);
    assert_eq!(line.points, vec![(10.0, 0.1), (20.0, 0.5)]);
}

#[test]
fn test_cummax_round_renders_each_experiment() {
    let a = make_temp_dir();
    write_score_runs(&a, &[&[(0, 0.1), (1, 0.3)], &[(0, 0.2), (1, 0.1)]]);
    let b = make_temp_dir();
    write_run_file(
        &b,
        "run_0.csv",
        "round,measurement_cost,true_score",
        &["0,1,0.2", "1,2,0.4"],
    );
    let exps = Experiments::from_runs(vec![("a".to_string(), a), ("b".to_string(), b)]);

    let (result, svg) = render_svg(|area| {
        cummax_round(
            area,
            &exps,
            ScoreColumn::TrueScore,
            Aggregate::Max,
            true,
            Some(&[LineStyle::Dashed][..]),
            None,
        )
    });
    result.unwrap();
    assert!(svg.contains("round"));

    let (result, _) = render_svg(|area| {
        cummax_round(area, &exps, ScoreColumn::TrueScore, Aggregate::Max, false, None, None)
    });
    assert!(matches!(result, Err(AnalysisError::Insufficient { .. })));
}
