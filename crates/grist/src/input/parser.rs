//! CSV loader: RFC4180 quoting, short-row padding, per-column type inference.

use std::collections::HashSet;
use std::path::Path;

use tracing::debug;

use crate::dataset::{Cell, Column, ColumnType, Dataset};
use crate::error::{EngineError, Result};

/// Parse delimited text into a typed [`Dataset`].
///
/// The first record is the header. Quoted fields may contain commas and
/// newlines. Rows shorter than the header are padded with nulls; rows longer
/// than the header are structurally invalid. Column types are decided once
/// here by inspecting every non-empty field in the column.
pub fn load_str(content: &str) -> Result<Dataset> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(content.as_bytes());

    let headers: Vec<String> = reader
        .headers()?
        .iter()
        .map(|s| s.to_string())
        .collect();

    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(EngineError::Parse("no header row found".to_string()));
    }

    // Duplicate header names would make column addressing ambiguous.
    let mut seen = HashSet::new();
    for name in &headers {
        if !seen.insert(name.as_str()) {
            return Err(EngineError::Parse(format!(
                "duplicate column name '{}' in header",
                name
            )));
        }
    }

    let expected = headers.len();
    let mut raw_rows: Vec<Vec<String>> = Vec::new();

    for (row_idx, record) in reader.records().enumerate() {
        let record = record?;
        if record.len() > expected {
            return Err(EngineError::Parse(format!(
                "row {} has {} fields, expected {}",
                row_idx + 1,
                record.len(),
                expected
            )));
        }

        let mut row: Vec<String> = record.iter().map(|s| s.to_string()).collect();
        // Pad missing trailing fields with empties; they become nulls below.
        while row.len() < expected {
            row.push(String::new());
        }
        raw_rows.push(row);
    }

    let columns = (0..expected)
        .map(|col_idx| {
            let fields: Vec<&str> = raw_rows.iter().map(|r| r[col_idx].as_str()).collect();
            let ty = infer_column_type(&fields);
            let values = fields
                .iter()
                .map(|raw| Cell::parse_as(raw, ty))
                .collect();
            Column::new(headers[col_idx].clone(), ty, values)
        })
        .collect();

    let dataset = Dataset::new(columns);
    debug!(
        rows = dataset.row_count(),
        columns = dataset.column_count(),
        "dataset loaded"
    );
    Ok(dataset)
}

/// Read a file synchronously and parse it. The façade prefers an async read;
/// this entry point exists for tests and direct library use.
pub fn load_path(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path).map_err(|e| EngineError::NotFound {
        path: path.to_path_buf(),
        source: e,
    })?;
    load_str(&content)
}

/// Decide a column's type from all of its non-empty fields.
///
/// All numeric-parseable ⇒ Number; else all boolean tokens ⇒ Bool; else Text.
/// A column with no non-empty fields defaults to Text.
fn infer_column_type(fields: &[&str]) -> ColumnType {
    let non_empty: Vec<&str> = fields.iter().copied().filter(|f| !f.is_empty()).collect();
    if non_empty.is_empty() {
        return ColumnType::Text;
    }

    if non_empty.iter().all(|f| f.trim().parse::<f64>().is_ok()) {
        return ColumnType::Number;
    }

    let is_bool_token = |f: &str| {
        let lower = f.trim().to_ascii_lowercase();
        lower == "true" || lower == "false"
    };
    if non_empty.iter().all(|f| is_bool_token(f)) {
        return ColumnType::Bool;
    }

    ColumnType::Text
}
