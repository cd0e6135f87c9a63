use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::model::bucket::BucketScheme;
use crate::model::filter::FilenameFilter;
use crate::model::rows::ScoreTable;
use crate::model::transform::ScoreTransform;
use crate::model::weights::LabelWeights;
use crate::pipeline::stage4_materialize::{RowOutcome, Stage4Output};
use crate::report::json::render_summary_json;
use crate::report::text::render_report_text;
use crate::report::{
    BucketSummary, EffectiveConfig, SummaryData, Totals, format_f64_6, score_stats,
};

pub const SCORES_FILE: &str = "scores.tsv";
pub const SUMMARY_FILE: &str = "summary.json";
pub const REPORT_FILE: &str = "report.txt";

#[derive(Debug, Clone)]
pub struct Stage5Input<'a> {
    pub table: &'a ScoreTable,
    pub transformed: &'a [Vec<f64>],
    pub composites: &'a [f64],
    pub assignments: &'a [Option<usize>],
    pub materialized: &'a Stage4Output,

    pub scheme: &'a BucketScheme,
    pub weights: &'a LabelWeights,
    pub transform: ScoreTransform,
    pub filter: &'a FilenameFilter,

    pub scores_path: &'a Path,
    pub source_image_dir: &'a Path,
    pub output_root: &'a Path,
}

pub fn build_summary(input: &Stage5Input<'_>) -> SummaryData {
    let mut assigned = vec![0usize; input.scheme.len()];
    for b in input.assignments.iter().flatten() {
        assigned[*b] += 1;
    }

    let buckets = input
        .scheme
        .buckets()
        .iter()
        .zip(&input.materialized.tallies)
        .zip(assigned)
        .map(|((bucket, tally), assigned)| BucketSummary {
            label: bucket.label.clone(),
            lo: bucket.lo,
            hi: bucket.hi,
            assigned,
            copied: tally.copied,
            skipped_filtered: tally.skipped_filtered,
            skipped_error: tally.skipped_error,
            examples: tally.examples.clone(),
        })
        .collect();

    let counts = input.materialized.counts;
    SummaryData {
        tool: env!("CARGO_PKG_NAME").to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        config: EffectiveConfig {
            scores_path: input.scores_path.display().to_string(),
            source_image_dir: input.source_image_dir.display().to_string(),
            output_root: input.output_root.display().to_string(),
            labels: input.table.labels.clone(),
            label_weights: input.weights.values().to_vec(),
            num_buckets: input.scheme.len(),
            transform: input.transform.describe(),
            filtered_filename_prefixes: input.filter.prefixes().to_vec(),
        },
        totals: Totals {
            rows: input.table.n_rows(),
            copied: counts.copied,
            skipped_filtered: counts.skipped_filtered,
            skipped_no_bucket: counts.skipped_no_bucket,
            skipped_error: counts.skipped_error,
        },
        scores: score_stats(input.composites),
        buckets,
    }
}

pub fn write_reports(input: &Stage5Input<'_>, out_dir: &Path) -> std::io::Result<SummaryData> {
    fs::create_dir_all(out_dir)?;

    write_scores_tsv(input, &out_dir.join(SCORES_FILE))?;

    let summary = build_summary(input);
    let json = render_summary_json(&summary).map_err(std::io::Error::other)?;
    fs::write(out_dir.join(SUMMARY_FILE), json)?;
    fs::write(out_dir.join(REPORT_FILE), render_report_text(&summary))?;

    tracing::info!("wrote reports to {}", out_dir.display());
    Ok(summary)
}

fn write_scores_tsv(input: &Stage5Input<'_>, path: &Path) -> std::io::Result<()> {
    let mut w = BufWriter::new(File::create(path)?);

    write!(w, "filename")?;
    for label in &input.table.labels {
        write!(w, "\t{label}")?;
    }
    writeln!(w, "\tscore\tbucket\toutcome\tdetail")?;

    for (i, row) in input.table.rows.iter().enumerate() {
        write!(w, "{}", row.filename)?;
        for &v in &input.transformed[i] {
            write!(w, "\t{}", format_f64_6(v))?;
        }
        let bucket = input.assignments[i]
            .map(|b| input.scheme.label(b))
            .unwrap_or("NA");
        let outcome = &input.materialized.outcomes[i];
        let detail = match outcome {
            RowOutcome::SkippedError(err) => err.to_string(),
            _ => String::new(),
        };
        writeln!(
            w,
            "\t{}\t{}\t{}\t{}",
            format_f64_6(input.composites[i]),
            bucket,
            outcome.as_str(),
            detail
        )?;
    }
    w.flush()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage5_report.rs"]
mod tests;
