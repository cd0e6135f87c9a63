use std::path::Path;

use thiserror::Error;

pub mod open;
pub mod table;

use crate::model::rows::ScoreTable;
use table::parse_score_table;

#[derive(Debug, Error)]
pub enum InputError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("missing input: {0}")]
    MissingInput(String),
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("parse error: {0}")]
    Parse(#[from] csv::Error),
}

pub fn load_score_table(path: &Path) -> Result<ScoreTable, InputError> {
    if !path.is_file() {
        return Err(InputError::MissingInput(format!(
            "score table not found: {}",
            path.display()
        )));
    }
    let reader = open::open_maybe_gz(path)?;
    let table = parse_score_table(reader)?;

    tracing::info!(
        "loaded score table {}: rows={}, labels=[{}]",
        path.display(),
        table.n_rows(),
        table.labels.join(", ")
    );
    Ok(table)
}
