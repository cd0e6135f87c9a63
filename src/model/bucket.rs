use std::collections::HashSet;

use crate::error::ConfigError;

pub const SCORE_MAX: f64 = 100.0;

/// Slack for composite scores that land just outside [0, 100] through
/// floating-point accumulation.
pub const CLAMP_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, PartialEq)]
pub struct Bucket {
    pub lo: f64,
    pub hi: f64,
    pub label: String,
}

/// N equal-width buckets over [0, 100]. Every interval is right-open
/// except the last one, which also holds 100.
#[derive(Debug, Clone)]
pub struct BucketScheme {
    buckets: Vec<Bucket>,
}

impl BucketScheme {
    pub fn new(n: usize) -> Result<Self, ConfigError> {
        if n == 0 {
            return Err(ConfigError::InvalidBucketCount(n));
        }
        let width = SCORE_MAX / n as f64;
        let mut edges: Vec<f64> = (0..=n).map(|i| i as f64 * width).collect();
        edges[n] = SCORE_MAX;

        let buckets: Vec<Bucket> = edges
            .windows(2)
            .map(|w| Bucket {
                lo: w[0],
                hi: w[1],
                label: format!("{}-{}", w[0] as i64, w[1] as i64),
            })
            .collect();

        // Labels name the output directories; two buckets must never share one.
        let mut seen = HashSet::with_capacity(n);
        for bucket in &buckets {
            if !seen.insert(bucket.label.as_str()) {
                return Err(ConfigError::DuplicateBucketLabel {
                    n,
                    label: bucket.label.clone(),
                });
            }
        }
        Ok(Self { buckets })
    }

    pub fn len(&self) -> usize {
        self.buckets.len()
    }

    pub fn buckets(&self) -> &[Bucket] {
        &self.buckets
    }

    pub fn label(&self, idx: usize) -> &str {
        &self.buckets[idx].label
    }

    /// Index of the bucket holding `score`, or `None` for NaN and scores
    /// outside [0, 100] beyond the clamp tolerance.
    pub fn assign(&self, score: f64) -> Option<usize> {
        let s = clamp_score(score)?;
        let last = self.buckets.len() - 1;
        self.buckets
            .iter()
            .enumerate()
            .position(|(i, b)| s >= b.lo && (s < b.hi || i == last))
    }
}

fn clamp_score(score: f64) -> Option<f64> {
    if score.is_nan() {
        return None;
    }
    if (-CLAMP_TOLERANCE..0.0).contains(&score) {
        return Some(0.0);
    }
    if score > SCORE_MAX && score <= SCORE_MAX + CLAMP_TOLERANCE {
        return Some(SCORE_MAX);
    }
    if (0.0..=SCORE_MAX).contains(&score) {
        Some(score)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/model/bucket.rs"]
mod tests;
