use super::*;

#[test]
fn test_quantiles() {
    let v = vec![1.0, 2.0, 3.0, 4.0, 5.0];
    assert_eq!(median(&v), 3.0);
    assert_eq!(p90(&v), 5.0);
    assert_eq!(p10(&v), 2.0);
}

#[test]
fn test_quantiles_skip_nan() {
    let v = vec![f64::NAN, 10.0, f64::NAN, 30.0, 20.0];
    assert_eq!(median(&v), 20.0);
    let stats = score_stats(&v);
    assert_eq!(stats.n_scored, 3);
    assert!(median(&[f64::NAN]).is_nan());
}

#[test]
fn test_format_na() {
    assert_eq!(format_f64_6(50.0), "50.000000");
    assert_eq!(format_f64_6(f64::NAN), "NA");
}
