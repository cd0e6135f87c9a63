use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::ConfigError;
use crate::model::bucket::BucketScheme;
use crate::model::filter::FilenameFilter;
use crate::model::transform::ScoreTransform;
use crate::model::weights::LabelWeights;

pub const DEFAULT_NUM_BUCKETS: usize = 5;

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum PrefixList {
    One(String),
    Many(Vec<String>),
}

impl PrefixList {
    fn into_vec(self) -> Vec<String> {
        match self {
            PrefixList::One(p) => vec![p],
            PrefixList::Many(v) => v,
        }
    }
}

/// Unvalidated options, as read from a JSON config file or collected from
/// the command line.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigLayer {
    pub scores_path: Option<PathBuf>,
    pub source_image_dir: Option<PathBuf>,
    pub output_root: Option<PathBuf>,
    pub report_dir: Option<PathBuf>,
    pub label_weights: Option<Vec<f64>>,
    pub num_buckets: Option<usize>,
    pub gain_k: Option<f64>,
    pub filtered_filename_prefix: Option<PrefixList>,
}

impl ConfigLayer {
    /// Fields set in `self` win over `lower`.
    pub fn over(self, lower: ConfigLayer) -> ConfigLayer {
        ConfigLayer {
            scores_path: self.scores_path.or(lower.scores_path),
            source_image_dir: self.source_image_dir.or(lower.source_image_dir),
            output_root: self.output_root.or(lower.output_root),
            report_dir: self.report_dir.or(lower.report_dir),
            label_weights: self.label_weights.or(lower.label_weights),
            num_buckets: self.num_buckets.or(lower.num_buckets),
            gain_k: self.gain_k.or(lower.gain_k),
            filtered_filename_prefix: self
                .filtered_filename_prefix
                .or(lower.filtered_filename_prefix),
        }
    }
}

pub fn load_config_file(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let text = std::fs::read_to_string(path).map_err(|source| ConfigError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(|source| ConfigError::ParseFile {
        path: path.to_path_buf(),
        source,
    })
}

/// Validated, immutable run configuration.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub scores_path: PathBuf,
    pub source_image_dir: PathBuf,
    pub output_root: PathBuf,
    pub report_dir: PathBuf,
    /// `None` means uniform weights over whatever label columns the table has.
    pub weights: Option<LabelWeights>,
    pub buckets: BucketScheme,
    pub transform: ScoreTransform,
    pub filter: FilenameFilter,
}

impl RunConfig {
    pub fn from_layer(layer: ConfigLayer, no_gain: bool) -> Result<Self, ConfigError> {
        let scores_path = layer.scores_path.ok_or(ConfigError::Missing("scores_path"))?;
        let source_image_dir = layer
            .source_image_dir
            .ok_or(ConfigError::Missing("source_image_dir"))?;
        let output_root = layer.output_root.ok_or(ConfigError::Missing("output_root"))?;
        let report_dir = layer.report_dir.unwrap_or_else(|| output_root.clone());

        let weights = layer.label_weights.map(LabelWeights::new).transpose()?;
        let buckets = BucketScheme::new(layer.num_buckets.unwrap_or(DEFAULT_NUM_BUCKETS))?;
        let transform = if no_gain {
            ScoreTransform::Identity
        } else {
            ScoreTransform::from_gain_k(layer.gain_k)?
        };
        let filter = FilenameFilter::new(
            layer
                .filtered_filename_prefix
                .map(PrefixList::into_vec)
                .unwrap_or_default(),
        )?;

        check_output_overlap(&output_root, &source_image_dir, &scores_path)?;
        check_report_dir(&report_dir, &output_root, &buckets)?;

        Ok(Self {
            scores_path,
            source_image_dir,
            output_root,
            report_dir,
            weights,
            buckets,
            transform,
            filter,
        })
    }
}

/// The output root is wiped on every run, so it must not be (or contain)
/// the source image directory or the score table.
fn check_output_overlap(output: &Path, source: &Path, scores: &Path) -> Result<(), ConfigError> {
    let out = normalize(output);
    if normalize(source).starts_with(&out) {
        return Err(ConfigError::OutputOverlapsSource {
            output: output.to_path_buf(),
            source_dir: source.to_path_buf(),
        });
    }
    if normalize(scores).starts_with(&out) {
        return Err(ConfigError::OutputContainsScoreTable {
            output: output.to_path_buf(),
            scores: scores.to_path_buf(),
        });
    }
    Ok(())
}

/// Reports may live under the output root, but never inside a bucket.
fn check_report_dir(
    report_dir: &Path,
    output: &Path,
    buckets: &BucketScheme,
) -> Result<(), ConfigError> {
    let report = normalize(report_dir);
    let out = normalize(output);
    for bucket in buckets.buckets() {
        let bucket_dir = out.join(&bucket.label);
        if report.starts_with(&bucket_dir) {
            return Err(ConfigError::ReportDirInBucket {
                report_dir: report_dir.to_path_buf(),
                bucket_dir: output.join(&bucket.label),
            });
        }
    }
    Ok(())
}

/// Absolute path with the longest existing prefix canonicalized, so paths
/// that do not exist yet compare consistently with ones that do.
fn normalize(path: &Path) -> PathBuf {
    let abs = std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf());
    let mut existing = abs.as_path();
    let mut rest = Vec::new();
    loop {
        if let Ok(canon) = existing.canonicalize() {
            return rest.iter().rev().fold(canon, |acc, part| acc.join(part));
        }
        match (existing.parent(), existing.file_name()) {
            (Some(parent), Some(name)) => {
                rest.push(name.to_os_string());
                existing = parent;
            }
            _ => return abs,
        }
    }
}

#[cfg(test)]
#[path = "../tests/src_inline/config.rs"]
mod tests;
