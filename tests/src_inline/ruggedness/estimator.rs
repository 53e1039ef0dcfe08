use super::*;

fn subgraph(pairs: &[(&str, f64)]) -> Vec<(String, f64)> {
    pairs.iter().map(|(s, v)| (s.to_string(), *v)).collect()
}

#[test]
fn test_additive_landscape_is_smooth() {
    let sub = subgraph(&[("AA", 0.0), ("AB", 1.0), ("BA", 2.0), ("BB", 3.0)]);
    let rs = RoughnessToSlope::default().ruggedness(&sub);
    assert!(rs.abs() < 1e-6, "rs = {rs}");
}

#[test]
fn test_epistatic_landscape_ratio() {
    let sub = subgraph(&[("AA", 0.0), ("AB", 1.0), ("BA", 1.0), ("BB", 3.0)]);
    let rs = RoughnessToSlope::default().ruggedness(&sub);
    assert!((rs - 0.25 / 1.5).abs() < 1e-6, "rs = {rs}");
}

#[test]
fn test_degenerate_subgraphs_are_nan() {
    let est = RoughnessToSlope::default();
    assert!(est.ruggedness(&[]).is_nan());
    assert!(est.ruggedness(&subgraph(&[("AA", 1.0)])).is_nan());
    assert!(est.ruggedness(&subgraph(&[("AA", 1.0), ("AA", 2.0)])).is_nan());
}

#[test]
fn test_additive_design_uses_reference_coding() {
    let design = additive_design(&subgraph(&[("AC", 0.0), ("BC", 0.0), ("CD", 0.0)]));
    assert_eq!(design[0], vec![1.0, 0.0, 0.0, 0.0]);
    assert_eq!(design[1], vec![1.0, 1.0, 0.0, 0.0]);
    assert_eq!(design[2], vec![1.0, 0.0, 1.0, 1.0]);
}
