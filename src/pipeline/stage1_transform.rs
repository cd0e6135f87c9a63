use crate::model::rows::ScoreTable;
use crate::model::transform::ScoreTransform;

#[derive(Debug)]
pub struct Stage1Output {
    /// Transformed label scores, row-major, aligned with the table rows.
    pub scores: Vec<Vec<f64>>,
}

pub fn run_stage1(table: &ScoreTable, transform: ScoreTransform) -> Stage1Output {
    let scores = table
        .rows
        .iter()
        .map(|row| row.scores.iter().map(|&x| transform.apply(x)).collect())
        .collect();
    Stage1Output { scores }
}
