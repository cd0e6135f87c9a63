use std::path::PathBuf;

use thiserror::Error;

use crate::input::InputError;

/// Fatal, pre-flight problems with the run configuration. Raised before any
/// row is processed and before the output tree is touched.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("number of label columns ({columns}) does not match number of weights ({weights})")]
    WeightCountMismatch { weights: usize, columns: usize },

    #[error("total label weight must be > 0 (got {0})")]
    NonPositiveTotalWeight(f64),

    #[error("label weight #{index} is not finite ({value})")]
    NonFiniteWeight { index: usize, value: f64 },

    #[error("bucket count must be >= 1 (got {0})")]
    InvalidBucketCount(usize),

    #[error("{n} buckets give duplicate bucket label {label:?}; use fewer buckets")]
    DuplicateBucketLabel { n: usize, label: String },

    #[error("gain k must be finite and > 0 (got {0})")]
    InvalidGain(f64),

    #[error("filtered filename prefix must not be empty")]
    EmptyFilterPrefix,

    #[error("missing required option: {0}")]
    Missing(&'static str),

    #[error(
        "output root {output} overlaps source image dir {source_dir}; refusing to rebuild it"
    )]
    OutputOverlapsSource { output: PathBuf, source_dir: PathBuf },

    #[error("output root {output} contains the score table {scores}; refusing to rebuild it")]
    OutputContainsScoreTable { output: PathBuf, scores: PathBuf },

    #[error("report dir {report_dir} is inside bucket directory {bucket_dir}")]
    ReportDirInBucket {
        report_dir: PathBuf,
        bucket_dir: PathBuf,
    },

    #[error("cannot read config file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    ParseFile {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Row-scoped materialization failures. Recorded and skipped, never fatal.
#[derive(Debug, Error)]
pub enum RowError {
    #[error("source image not found: {0}")]
    SourceMissing(PathBuf),

    #[error("unsafe filename (absolute or escapes its directory): {0}")]
    UnsafeFilename(String),

    #[error("copy {from} -> {to} failed: {source}")]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Anything that ends a run with a non-zero exit status.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("input error: {0}")]
    Input(#[from] InputError),

    #[error("cannot prepare output root {path}: {source}")]
    OutputRoot {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write report: {0}")]
    Report(#[source] std::io::Error),
}
