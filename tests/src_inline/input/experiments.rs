use std::path::PathBuf;

use plotters::style::RGBColor;

use super::{Experiments, parse_run_arg};
use crate::input::InputError;
use crate::model::LineStyle;
use crate::test_support::{make_temp_dir, write_file};

#[test]
fn test_parse_run_arg() {
    let (name, dir) = parse_run_arg("greedy=runs/greedy").unwrap();
    assert_eq!(name, "greedy");
    assert_eq!(dir, PathBuf::from("runs/greedy"));

    assert!(parse_run_arg("greedy").is_err());
    assert!(parse_run_arg("=runs").is_err());
    assert!(parse_run_arg("greedy=").is_err());
}

#[test]
fn test_iteration_is_sorted_by_name() {
    let exps = Experiments::from_runs(vec![
        ("zeta".to_string(), PathBuf::from("z")),
        ("alpha".to_string(), PathBuf::from("a")),
    ]);
    let names: Vec<&str> = exps.iter().map(|(n, _)| n).collect();
    assert_eq!(names, vec!["alpha", "zeta"]);
    assert_eq!(exps.len(), 2);
}

#[test]
fn test_from_json_file_resolves_relative_dirs_and_styles() {
    let dir = make_temp_dir();
    let path = dir.join("experiments.json");
    write_file(
        &path,
        r##"{"runs": {"greedy": "greedy_runs", "abs": "/data/abs"},
            "colors": ["#ff0000", "00ff00"],
            "linestyles": ["dashed"]}"##,
    );

    let exps = Experiments::from_json_file(&path).unwrap();
    assert_eq!(exps.runs["greedy"], dir.join("greedy_runs"));
    assert_eq!(exps.runs["abs"], PathBuf::from("/data/abs"));
    assert_eq!(
        exps.colors,
        Some(vec![RGBColor(255, 0, 0), RGBColor(0, 255, 0)])
    );
    assert_eq!(exps.linestyles, Some(vec![LineStyle::Dashed]));
}

#[test]
fn test_from_json_file_rejects_unknown_keys_and_bad_colors() {
    let dir = make_temp_dir();
    let path = dir.join("bad.json");
    write_file(&path, r#"{"runs": {}, "colours": []}"#);
    assert!(matches!(
        Experiments::from_json_file(&path),
        Err(InputError::Json { .. })
    ));

    write_file(&path, r#"{"runs": {"a": "a"}, "colors": ["blue"]}"#);
    assert!(matches!(
        Experiments::from_json_file(&path),
        Err(InputError::InvalidInput(_))
    ));
}

#[test]
fn test_merge_prefers_later_entries() {
    let mut base = Experiments::from_runs(vec![
        ("a".to_string(), PathBuf::from("file_a")),
        ("b".to_string(), PathBuf::from("file_b")),
    ]);
    base.colors = Some(vec![RGBColor(1, 2, 3)]);

    let mut cli = Experiments::from_runs(vec![("a".to_string(), PathBuf::from("cli_a"))]);
    cli.linestyles = Some(vec![LineStyle::Dotted]);
    base.merge(cli);

    assert_eq!(base.runs["a"], PathBuf::from("cli_a"));
    assert_eq!(base.runs["b"], PathBuf::from("file_b"));
    assert_eq!(base.colors, Some(vec![RGBColor(1, 2, 3)]));
    assert_eq!(base.linestyles, Some(vec![LineStyle::Dotted]));
}
