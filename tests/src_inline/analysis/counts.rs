use super::*;
use crate::test_support::{make_temp_dir, render_svg, table, write_score_runs};

#[test]
fn test_count_by_round_and_rep() {
    let t = table(&[(0, 0, 0.1), (0, 0, 0.2), (0, 1, 0.3), (1, 10, 0.4)]);
    assert_eq!(
        count_by(&t, CountColumn::Round),
        vec![("0".to_string(), 2), ("1".to_string(), 1), ("10".to_string(), 1)]
    );
    assert_eq!(
        count_by(&t, CountColumn::Rep),
        vec![("0".to_string(), 3), ("1".to_string(), 1)]
    );
}

#[test]
fn test_barplot_counts_reads_prefixed_files() {
    let dir = make_temp_dir();
    write_score_runs(&dir, &[&[(0, 0.1), (0, 0.2), (1, 0.3)]]);
    let (result, svg) = render_svg(|area| {
        barplot_counts(area, &dir, "run", CountColumn::Round, Orientation::Horizontal)
    });
    result.unwrap();
    assert!(svg.contains("count"));

    let (result, _) = render_svg(|area| {
        barplot_counts(area, &dir, "eval", CountColumn::Rep, Orientation::Vertical)
    });
    assert!(matches!(result, Err(AnalysisError::Input(_))));
}
