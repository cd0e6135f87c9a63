/// One image's raw label scores. Missing cells are stored as NaN.
#[derive(Debug, Clone)]
pub struct LabelScoreRow {
    pub filename: String,
    pub scores: Vec<f64>,
}

/// Inference results: shared label order plus one row per image, in table
/// order.
#[derive(Debug, Clone, Default)]
pub struct ScoreTable {
    pub labels: Vec<String>,
    pub rows: Vec<LabelScoreRow>,
}

impl ScoreTable {
    pub fn n_rows(&self) -> usize {
        self.rows.len()
    }

    pub fn n_labels(&self) -> usize {
        self.labels.len()
    }
}
