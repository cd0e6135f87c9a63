use crate::error::ConfigError;
use crate::model::bucket::SCORE_MAX;
use crate::model::weights::LabelWeights;
use crate::pipeline::stage1_transform::Stage1Output;

/// Weighted average of per-label scores, scaled to [0, 100].
#[derive(Debug, Clone)]
pub struct WeightedScorer {
    weights: LabelWeights,
}

impl WeightedScorer {
    /// Checks the weight/column contract once, before any row is scored.
    pub fn new(weights: LabelWeights, labels: &[String]) -> Result<Self, ConfigError> {
        weights.check_columns(labels.len())?;
        Ok(Self { weights })
    }

    pub fn weights(&self) -> &LabelWeights {
        &self.weights
    }

    /// NaN when any label score is missing.
    pub fn score(&self, scores: &[f64]) -> f64 {
        let weighted_sum: f64 = self
            .weights
            .values()
            .iter()
            .zip(scores)
            .map(|(w, s)| w * s)
            .sum();
        SCORE_MAX * weighted_sum / self.weights.total()
    }
}

pub fn run_stage2(scorer: &WeightedScorer, transformed: &Stage1Output) -> Vec<f64> {
    transformed
        .scores
        .iter()
        .map(|row| scorer.score(row))
        .collect()
}

#[cfg(test)]
#[path = "../../tests/src_inline/pipeline/stage2_score.rs"]
mod tests;
