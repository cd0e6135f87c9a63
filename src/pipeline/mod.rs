pub mod stage1_transform;
pub mod stage2_score;
pub mod stage3_bucket;
pub mod stage4_materialize;
pub mod stage5_report;

use crate::config::RunConfig;
use crate::error::RunError;
use crate::input::load_score_table;
use crate::model::weights::LabelWeights;
use crate::report::SummaryData;
use stage1_transform::run_stage1;
use stage2_score::{WeightedScorer, run_stage2};
use stage3_bucket::run_stage3;
use stage4_materialize::{MaterializeParams, run_stage4};
use stage5_report::{Stage5Input, write_reports};

/// Runs the whole triage. Every configuration check, including the
/// weight/label-column contract, happens before the output root is touched.
pub fn run_pipeline(config: &RunConfig) -> Result<SummaryData, RunError> {
    let table = load_score_table(&config.scores_path)?;

    let weights = match &config.weights {
        Some(w) => w.clone(),
        None => LabelWeights::uniform(table.n_labels())?,
    };
    let scorer = WeightedScorer::new(weights, &table.labels)?;

    let stage1 = run_stage1(&table, config.transform);
    let composites = run_stage2(&scorer, &stage1);
    let stage3 = run_stage3(&config.buckets, &composites);
    tracing::info!(
        "scored {} rows with {} ({} without a bucket)",
        table.n_rows(),
        config.transform.describe(),
        stage3.n_unassigned
    );

    let params = MaterializeParams {
        source_dir: &config.source_image_dir,
        output_root: &config.output_root,
        filter: &config.filter,
    };
    let stage4 = run_stage4(&table.rows, &stage3.assignments, &config.buckets, &params)?;

    let input = Stage5Input {
        table: &table,
        transformed: &stage1.scores,
        composites: &composites,
        assignments: &stage3.assignments,
        materialized: &stage4,
        scheme: &config.buckets,
        weights: scorer.weights(),
        transform: config.transform,
        filter: &config.filter,
        scores_path: &config.scores_path,
        source_image_dir: &config.source_image_dir,
        output_root: &config.output_root,
    };
    write_reports(&input, &config.report_dir).map_err(RunError::Report)
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/mod.rs"]
mod tests;
