use std::fs;

use super::reader::is_run_file;
use super::{InputError, read_data, read_run_file};
use crate::test_support::{RUN_HEADER, make_temp_dir, write_file, write_gz, write_run_file};

#[test]
fn test_is_run_file_matches_prefix_and_extension() {
    assert!(is_run_file("run_0.csv", "run"));
    assert!(is_run_file("run_0.csv.gz", "run"));
    assert!(!is_run_file("eval_0.csv", "run"));
    assert!(!is_run_file("run_0.tsv", "run"));
    assert!(is_run_file("eval_3.csv", "eval"));
}

#[test]
fn test_read_run_file_skips_metadata_and_parses_optional_columns() {
    let dir = make_temp_dir();
    let path = write_run_file(
        &dir,
        "run_0.csv",
        RUN_HEADER,
        &["0,1.5,0.25,0.2,ACDE", "1,,0.5,,"],
    );

    let rows = read_run_file(&path, 3).unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].rep, 3);
    assert_eq!(rows[0].round, 0);
    assert_eq!(rows[0].measurement_cost, Some(1.5));
    assert_eq!(rows[0].model_score, Some(0.2));
    assert_eq!(rows[0].seq.as_deref(), Some("ACDE"));
    assert_eq!(rows[1].measurement_cost, None);
    assert_eq!(rows[1].model_score, None);
    assert_eq!(rows[1].seq, None);
}

#[test]
fn test_read_run_file_ignores_extra_columns() {
    let dir = make_temp_dir();
    let path = write_run_file(&dir, "run_0.csv", "round,true_score,batch", &["2,0.75,a"]);
    let rows = read_run_file(&path, 0).unwrap();
    assert_eq!(rows[0].round, 2);
    assert_eq!(rows[0].true_score, 0.75);
}

#[test]
fn test_read_data_assigns_reps_in_file_name_order() {
    let dir = make_temp_dir();
    write_run_file(&dir, "run_b.csv", "round,true_score", &["0,0.9"]);
    write_run_file(&dir, "run_a.csv", "round,true_score", &["0,0.1", "1,0.2"]);
    write_run_file(&dir, "eval_a.csv", "round,true_score", &["0,0.5"]);
    write_file(&dir.join("notes.txt"), "not a run\n");

    let table = read_data(&dir, "run").unwrap();
    assert_eq!(table.records.len(), 3);
    assert_eq!(table.n_reps(), 2);
    let rep0: Vec<f64> = table.filter_rep(0).records.iter().map(|r| r.true_score).collect();
    assert_eq!(rep0, vec![0.1, 0.2]);
    assert_eq!(table.filter_rep(1).records[0].true_score, 0.9);
    assert_eq!(table.max_round(), Some(1));
    assert_eq!(table.rounds(), vec![0, 1]);
}

#[test]
fn test_read_data_decompresses_gz_files() {
    let dir = make_temp_dir();
    write_gz(
        &dir.join("run_0.csv.gz"),
        "# meta\nround,true_score\n0,0.3\n1,0.6\n",
    );
    let table = read_data(&dir, "run").unwrap();
    assert_eq!(table.records.len(), 2);
    assert_eq!(table.records[1].true_score, 0.6);
}

#[test]
fn test_read_data_without_matching_files_is_missing_input() {
    let dir = make_temp_dir();
    write_run_file(&dir, "eval_0.csv", "round,true_score", &["0,0.5"]);
    let err = read_data(&dir, "run").unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));

    let missing = dir.join("does_not_exist");
    let err = read_data(&missing, "run").unwrap_err();
    assert!(matches!(err, InputError::MissingInput(_)));
}

#[test]
fn test_read_data_reports_bad_rows_with_path() {
    let dir = make_temp_dir();
    write_run_file(&dir, "run_0.csv", "round,true_score", &["zero,0.5"]);
    let err = read_data(&dir, "run").unwrap_err();
    match err {
        InputError::Csv { path, .. } => assert!(path.ends_with("run_0.csv")),
        other => panic!("unexpected error {other:?}"),
    }
}

#[test]
fn test_empty_run_file_is_invalid() {
    let dir = make_temp_dir();
    let path = dir.join("run_0.csv");
    fs::write(&path, "").unwrap();
    let err = read_run_file(&path, 0).unwrap_err();
    assert!(matches!(err, InputError::InvalidInput(_)));
}

#[test]
fn test_header_only_file_has_no_rows() {
    let dir = make_temp_dir();
    let path = write_run_file(&dir, "run_0.csv", "round,true_score", &[]);
    assert!(read_run_file(&path, 0).unwrap().is_empty());
}
