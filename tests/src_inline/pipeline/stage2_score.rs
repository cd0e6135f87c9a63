use super::*;
use crate::model::transform::ScoreTransform;

fn labels(n: usize) -> Vec<String> {
    (0..n).map(|i| format!("label_{i}")).collect()
}

fn scorer(weights: &[f64]) -> WeightedScorer {
    WeightedScorer::new(LabelWeights::new(weights.to_vec()).unwrap(), &labels(weights.len()))
        .unwrap()
}

#[test]
fn test_uniform_weights_average() {
    let s = scorer(&[1.0; 5]);
    let score = s.score(&[0.9; 5]);
    assert!((score - 90.0).abs() < 1e-9);
}

#[test]
fn test_weighted_average() {
    let s = scorer(&[2.0, 1.0, 1.0, 3.0, 3.0]);
    // (2*1 + 0 + 0 + 3*0.5 + 3*0.5) / 10 = 0.5
    let score = s.score(&[1.0, 0.0, 0.0, 0.5, 0.5]);
    assert!((score - 50.0).abs() < 1e-9);
}

#[test]
fn test_gain_midpoint_scores_fifty() {
    let s = scorer(&[2.0, 1.0, 1.0, 3.0, 3.0]);
    let t = ScoreTransform::Gain { k: 3.0 };
    let row: Vec<f64> = [0.5; 5].iter().map(|&x| t.apply(x)).collect();
    assert_eq!(s.score(&row), 50.0);
}

#[test]
fn test_missing_score_gives_nan() {
    let s = scorer(&[1.0, 1.0]);
    assert!(s.score(&[0.5, f64::NAN]).is_nan());
}

#[test]
fn test_mismatch_fails_at_construction() {
    let w = LabelWeights::new(vec![1.0; 3]).unwrap();
    assert!(matches!(
        WeightedScorer::new(w, &labels(5)),
        Err(ConfigError::WeightCountMismatch {
            weights: 3,
            columns: 5
        })
    ));
}

#[test]
fn test_scores_stay_in_range() {
    let s = scorer(&[0.5, 2.0, 1.5]);
    let grid = [0.0, 0.1, 0.33, 0.5, 0.77, 1.0];
    for &a in &grid {
        for &b in &grid {
            for &c in &grid {
                let v = s.score(&[a, b, c]);
                assert!((0.0..=100.0 + 1e-9).contains(&v), "{v}");
            }
        }
    }
}

#[test]
fn test_run_stage2_rows() {
    let s = scorer(&[1.0, 1.0]);
    let input = Stage1Output {
        scores: vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![0.2, 0.4]],
    };
    let out = run_stage2(&s, &input);
    assert_eq!(out[0], 0.0);
    assert_eq!(out[1], 100.0);
    assert!((out[2] - 30.0).abs() < 1e-9);
}
