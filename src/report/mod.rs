pub mod json;
pub mod text;

use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct ScoreStats {
    pub n_scored: usize,
    pub median: f64,
    pub p10: f64,
    pub p90: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct BucketSummary {
    pub label: String,
    pub lo: f64,
    pub hi: f64,
    pub assigned: usize,
    pub copied: usize,
    pub skipped_filtered: usize,
    pub skipped_error: usize,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Totals {
    pub rows: usize,
    pub copied: usize,
    pub skipped_filtered: usize,
    pub skipped_no_bucket: usize,
    pub skipped_error: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct EffectiveConfig {
    pub scores_path: String,
    pub source_image_dir: String,
    pub output_root: String,
    pub labels: Vec<String>,
    pub label_weights: Vec<f64>,
    pub num_buckets: usize,
    pub transform: String,
    pub filtered_filename_prefixes: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryData {
    pub tool: String,
    pub version: String,
    pub config: EffectiveConfig,
    pub totals: Totals,
    pub scores: ScoreStats,
    pub buckets: Vec<BucketSummary>,
}

pub fn format_f64_6(v: f64) -> String {
    if v.is_finite() {
        format!("{:.6}", v)
    } else {
        "NA".to_string()
    }
}

/// Nearest-rank quantile over the finite values; NaN when there are none.
pub fn quantile_indexed(values: &[f64], p: f64) -> f64 {
    let mut sorted: Vec<f64> = values.iter().copied().filter(|v| v.is_finite()).collect();
    if sorted.is_empty() {
        return f64::NAN;
    }
    sorted.sort_by(f64::total_cmp);
    let n = sorted.len();
    let idx = ((n - 1) as f64 * p).ceil() as usize;
    sorted[idx]
}

pub fn median(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.5)
}

pub fn p10(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.10)
}

pub fn p90(values: &[f64]) -> f64 {
    quantile_indexed(values, 0.90)
}

pub fn score_stats(values: &[f64]) -> ScoreStats {
    ScoreStats {
        n_scored: values.iter().filter(|v| v.is_finite()).count(),
        median: median(values),
        p10: p10(values),
        p90: p90(values),
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/mod.rs"]
mod tests;
