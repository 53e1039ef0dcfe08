use std::fs;

use super::*;
use crate::test_support::make_temp_dir;

/// Scores a subgraph by its size; empty subgraphs are undefined.
struct SizeEstimator;

impl RuggednessEstimator for SizeEstimator {
    fn ruggedness(&self, subgraph: &[(String, f64)]) -> f64 {
        if subgraph.is_empty() {
            f64::NAN
        } else {
            subgraph.len() as f64
        }
    }
}

fn landscape(name: &str, seqs: &[&str]) -> Landscape {
    Landscape::new(
        name,
        seqs.iter().enumerate().map(|(i, s)| (s.to_string(), i as f64)).collect(),
    )
    .unwrap()
}

#[test]
fn test_subgraph_filters_fixed_positions() {
    let land = landscape("toy", &["AAA", "AAC", "CAA", "ACA"]);
    let sub = subgraph(&land, &[0, 1], b'A');
    let seqs: Vec<&str> = sub.iter().map(|(s, _)| s.as_str()).collect();
    assert_eq!(seqs, vec!["AAA", "AAC"]);
}

#[test]
fn test_whole_landscape_when_sizes_match() {
    let land = landscape("toy", &["AA", "AC", "CA"]);
    let params = RsParams {
        subgraph_size: 2,
        ..RsParams::default()
    };
    let values = subgraph_values(&land, params, &SizeEstimator).unwrap();
    assert_eq!(values, vec![3.0]);
}

#[test]
fn test_subgraph_values_iterate_positions_then_residues() {
    let land = landscape("toy", &["AAA", "AAC", "CAA", "CCC"]);
    let params = RsParams {
        subgraph_size: 2,
        amino_acids: "AC",
    };
    let values = subgraph_values(&land, params, &SizeEstimator).unwrap();
    // free {0,1} fixes 2; free {0,2} fixes 1; free {1,2} fixes 0.
    assert_eq!(values.len(), 6);
    assert_eq!(values[0], 2.0);
    assert_eq!(values[1], 2.0);
    assert_eq!(values[2], 3.0);
    assert_eq!(values[3], 1.0);
    assert_eq!(values[4], 2.0);
    assert_eq!(values[5], 2.0);
}

#[test]
fn test_subgraph_larger_than_sequence_is_an_error() {
    let land = landscape("toy", &["AA", "AC"]);
    let err = subgraph_values(&land, RsParams::default(), &SizeEstimator).unwrap_err();
    assert!(matches!(
        err,
        RuggednessError::SubgraphTooLarge {
            seq_len: 2,
            subgraph_size: 4,
            ..
        }
    ));
}

#[test]
fn test_rs_means_skip_nan() {
    let land = landscape("toy", &["AAA", "AAC", "CAA"]);
    let params = RsParams {
        subgraph_size: 2,
        amino_acids: "AG",
    };
    // Residue G never matches, so half of the subgraphs are empty.
    let out = rs(std::slice::from_ref(&land), None, params, &SizeEstimator).unwrap();
    let expected = (2.0 + 3.0 + 2.0) / 3.0;
    assert!((out[0] - expected).abs() < 1e-12);
}

#[test]
fn test_rs_writes_then_reads_cache() {
    let dir = make_temp_dir();
    let cache = vec![dir.join("cache").join("toy_rs.csv")];
    let land = landscape("toy", &["AAA", "AAC", "CAA"]);
    let params = RsParams {
        subgraph_size: 2,
        amino_acids: "AG",
    };

    let first = rs(std::slice::from_ref(&land), Some(cache.as_slice()), params, &SizeEstimator).unwrap();
    let text = fs::read_to_string(&cache[0]).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("0"));
    assert_eq!(text.lines().count(), 7);
    assert_eq!(read_cache(&cache[0]).unwrap().iter().filter(|v| v.is_nan()).count(), 3);

    fs::write(&cache[0], "0\n1.0\n\n3.0\n").unwrap();
    let cached = rs(std::slice::from_ref(&land), Some(cache.as_slice()), params, &SizeEstimator).unwrap();
    assert!((cached[0] - 2.0).abs() < 1e-12);
    assert!((first[0] - 7.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_cache_list_must_match_landscapes() {
    let land = landscape("toy", &["AAA", "AAC"]);
    let err = rs(
        std::slice::from_ref(&land),
        Some(&[][..]),
        RsParams::default(),
        &SizeEstimator,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        RuggednessError::CacheMismatch {
            landscapes: 1,
            files: 0
        }
    ));
}

#[test]
fn test_invalid_cache_value_is_reported() {
    let dir = make_temp_dir();
    let path = dir.join("bad.csv");
    fs::write(&path, "0\nrough\n").unwrap();
    assert!(matches!(
        read_cache(&path),
        Err(RuggednessError::InvalidCache { .. })
    ));
}
