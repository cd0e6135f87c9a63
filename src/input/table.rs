use std::collections::HashSet;
use std::io::Read;

use csv::{ReaderBuilder, Trim};

use crate::input::InputError;
use crate::model::rows::{LabelScoreRow, ScoreTable};

pub const FILENAME_COLUMN: &str = "filename";

pub fn parse_score_table<R: Read>(reader: R) -> Result<ScoreTable, InputError> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    if headers.is_empty() {
        return Err(InputError::InvalidInput("score table header is empty".to_string()));
    }

    let filename_col = match headers
        .iter()
        .position(|h| h.eq_ignore_ascii_case(FILENAME_COLUMN))
    {
        Some(idx) => idx,
        None => {
            tracing::warn!(
                "score table has no '{}' column; using first column '{}' as key",
                FILENAME_COLUMN,
                &headers[0]
            );
            0
        }
    };

    let label_cols: Vec<usize> = (0..headers.len()).filter(|&i| i != filename_col).collect();
    if label_cols.is_empty() {
        return Err(InputError::InvalidInput(
            "score table has no label columns".to_string(),
        ));
    }
    let labels = label_cols.iter().map(|&i| headers[i].to_string()).collect();

    let mut seen: HashSet<String> = HashSet::new();
    let mut rows = Vec::new();
    for (idx, record) in reader.records().enumerate() {
        let record = record?;
        // header is line 1
        let line_no = idx + 2;

        let filename = record.get(filename_col).unwrap_or("").to_string();
        if filename.is_empty() {
            tracing::warn!("score row has empty filename; skipping (line {})", line_no);
            continue;
        }
        if seen.contains(&filename) {
            tracing::warn!(
                "duplicate filename in score table; keeping first (line {}, filename {})",
                line_no,
                filename
            );
            continue;
        }

        let scores = label_cols
            .iter()
            .map(|&i| parse_score(record.get(i).unwrap_or(""), &filename, &headers[i]))
            .collect();
        seen.insert(filename.clone());
        rows.push(LabelScoreRow { filename, scores });
    }

    Ok(ScoreTable { labels, rows })
}

fn parse_score(cell: &str, filename: &str, label: &str) -> f64 {
    if cell.is_empty() || cell.eq_ignore_ascii_case("nan") || cell.eq_ignore_ascii_case("na") {
        return f64::NAN;
    }
    match cell.parse::<f64>() {
        Ok(v) => v,
        Err(_) => {
            tracing::warn!(
                "unparsable score '{}' for label {} of {}; treating as missing",
                cell,
                label,
                filename
            );
            f64::NAN
        }
    }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
