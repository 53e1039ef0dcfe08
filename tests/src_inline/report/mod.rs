use super::*;

#[test]
fn test_format_f64_4() {
    assert_eq!(format_f64_4(0.5), "0.5000");
    assert_eq!(format_f64_4(f64::NAN), "nan");
}
