use super::*;

#[test]
fn test_gain_fixed_points() {
    for k in [0.25, 0.5, 1.0, 2.0, 3.0, 7.5] {
        assert_eq!(gain(0.0, k), 0.0);
        assert_eq!(gain(0.5, k), 0.5);
        assert_eq!(gain(1.0, k), 1.0);
    }
}

#[test]
fn test_gain_k1_is_identity() {
    for x in [0.0, 0.1, 0.25, 0.4, 0.5, 0.6, 0.75, 0.9, 1.0] {
        assert!((gain(x, 1.0) - x).abs() < 1e-12);
    }
}

#[test]
fn test_gain_symmetric() {
    for x in [0.05, 0.2, 0.33, 0.45] {
        let lo = gain(x, 3.0);
        let hi = gain(1.0 - x, 3.0);
        assert!((lo + hi - 1.0).abs() < 1e-12);
    }
}

#[test]
fn test_gain_sharpens_for_k_above_one() {
    assert!(gain(0.25, 3.0) < 0.25);
    assert!(gain(0.75, 3.0) > 0.75);
    // 0.5 * (0.5)^3
    assert!((gain(0.25, 3.0) - 0.0625).abs() < 1e-12);
}

#[test]
fn test_transform_from_gain_k() {
    assert_eq!(ScoreTransform::from_gain_k(None).unwrap(), ScoreTransform::Identity);
    assert_eq!(
        ScoreTransform::from_gain_k(Some(3.0)).unwrap(),
        ScoreTransform::Gain { k: 3.0 }
    );
    assert!(ScoreTransform::from_gain_k(Some(0.0)).is_err());
    assert!(ScoreTransform::from_gain_k(Some(-1.0)).is_err());
    assert!(ScoreTransform::from_gain_k(Some(f64::NAN)).is_err());
}

#[test]
fn test_apply_clips_and_keeps_nan() {
    let t = ScoreTransform::Gain { k: 3.0 };
    assert_eq!(t.apply(1.2), 1.0);
    assert_eq!(t.apply(-0.1), 0.0);
    assert!(t.apply(f64::NAN).is_nan());
    assert_eq!(ScoreTransform::Identity.apply(0.42), 0.42);
}
