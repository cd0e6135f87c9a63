use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{RowError, RunError};
use crate::model::bucket::BucketScheme;
use crate::model::filter::FilenameFilter;
use crate::model::rows::LabelScoreRow;

/// Example filenames kept per bucket for the report.
pub const MAX_EXAMPLES: usize = 5;

#[derive(Debug, Clone)]
pub struct MaterializeParams<'a> {
    pub source_dir: &'a Path,
    pub output_root: &'a Path,
    pub filter: &'a FilenameFilter,
}

#[derive(Debug)]
pub enum RowOutcome {
    Copied,
    SkippedFiltered,
    SkippedNoBucket,
    SkippedError(RowError),
}

impl RowOutcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            RowOutcome::Copied => "copied",
            RowOutcome::SkippedFiltered => "filtered",
            RowOutcome::SkippedNoBucket => "no_bucket",
            RowOutcome::SkippedError(_) => "error",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BucketTally {
    pub copied: usize,
    pub skipped_filtered: usize,
    pub skipped_error: usize,
    pub examples: Vec<String>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OutcomeCounts {
    pub copied: usize,
    pub skipped_filtered: usize,
    pub skipped_no_bucket: usize,
    pub skipped_error: usize,
}

impl OutcomeCounts {
    pub fn from_outcomes(outcomes: &[RowOutcome]) -> Self {
        let mut counts = Self::default();
        for outcome in outcomes {
            match outcome {
                RowOutcome::Copied => counts.copied += 1,
                RowOutcome::SkippedFiltered => counts.skipped_filtered += 1,
                RowOutcome::SkippedNoBucket => counts.skipped_no_bucket += 1,
                RowOutcome::SkippedError(_) => counts.skipped_error += 1,
            }
        }
        counts
    }
}

#[derive(Debug)]
pub struct Stage4Output {
    pub outcomes: Vec<RowOutcome>,
    pub tallies: Vec<BucketTally>,
    pub counts: OutcomeCounts,
}

pub fn run_stage4(
    rows: &[LabelScoreRow],
    assignments: &[Option<usize>],
    scheme: &BucketScheme,
    params: &MaterializeParams<'_>,
) -> Result<Stage4Output, RunError> {
    let bucket_dirs = prepare_output_root(params.output_root, scheme)?;

    let mut tallies = vec![BucketTally::default(); scheme.len()];
    let mut outcomes = Vec::with_capacity(rows.len());

    for (row, assignment) in rows.iter().zip(assignments) {
        let outcome = if params.filter.is_denied(&row.filename) {
            if let Some(b) = assignment {
                tallies[*b].skipped_filtered += 1;
            }
            tracing::debug!("filtered {}", row.filename);
            RowOutcome::SkippedFiltered
        } else if let Some(b) = *assignment {
            match copy_row(params.source_dir, &bucket_dirs[b], &row.filename) {
                Ok(()) => {
                    let tally = &mut tallies[b];
                    tally.copied += 1;
                    if tally.examples.len() < MAX_EXAMPLES {
                        tally.examples.push(row.filename.clone());
                    }
                    tracing::debug!("copied {} to {}", row.filename, scheme.label(b));
                    RowOutcome::Copied
                }
                Err(err) => {
                    tallies[b].skipped_error += 1;
                    tracing::warn!("could not copy {}: {}", row.filename, err);
                    RowOutcome::SkippedError(err)
                }
            }
        } else {
            tracing::debug!("no bucket for {}; skipping", row.filename);
            RowOutcome::SkippedNoBucket
        };
        outcomes.push(outcome);
    }

    let counts = OutcomeCounts::from_outcomes(&outcomes);
    tracing::info!(
        "materialized into {}: copied={}, filtered={}, no_bucket={}, errors={}",
        params.output_root.display(),
        counts.copied,
        counts.skipped_filtered,
        counts.skipped_no_bucket,
        counts.skipped_error
    );

    Ok(Stage4Output {
        outcomes,
        tallies,
        counts,
    })
}

/// Wipes and recreates the output root, then creates every bucket directory
/// so no copy runs before its destination exists.
fn prepare_output_root(root: &Path, scheme: &BucketScheme) -> Result<Vec<PathBuf>, RunError> {
    let fail = |source: std::io::Error| RunError::OutputRoot {
        path: root.to_path_buf(),
        source,
    };
    if root.exists() {
        fs::remove_dir_all(root).map_err(fail)?;
    }
    fs::create_dir_all(root).map_err(fail)?;

    let mut dirs = Vec::with_capacity(scheme.len());
    for bucket in scheme.buckets() {
        let dir = root.join(&bucket.label);
        fs::create_dir_all(&dir).map_err(fail)?;
        dirs.push(dir);
    }
    Ok(dirs)
}

fn copy_row(source_dir: &Path, bucket_dir: &Path, filename: &str) -> Result<(), RowError> {
    let rel = safe_relative(filename)?;
    let from = source_dir.join(rel);
    if !from.is_file() {
        return Err(RowError::SourceMissing(from));
    }
    let to = bucket_dir.join(rel);
    let copy_err = |source: std::io::Error| RowError::Copy {
        from: from.clone(),
        to: to.clone(),
        source,
    };
    if let Some(parent) = to.parent() {
        if parent != bucket_dir {
            fs::create_dir_all(parent).map_err(copy_err)?;
        }
    }
    fs::copy(&from, &to).map_err(copy_err)?;
    Ok(())
}

/// Accepts only plain relative paths, so a copy never lands outside its
/// bucket directory.
fn safe_relative(filename: &str) -> Result<&Path, RowError> {
    let path = Path::new(filename);
    let plain = path
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if !plain || path.file_name().is_none() {
        return Err(RowError::UnsafeFilename(filename.to_string()));
    }
    Ok(path)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage4_materialize.rs"]
mod tests;
