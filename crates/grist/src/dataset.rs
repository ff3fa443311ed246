//! Typed in-memory table produced by the loader for one invocation.

use serde::Serialize;

use crate::error::{EngineError, Result};

/// Inferred type of a column, decided once at load time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColumnType {
    /// Floating-point numbers (integers included).
    Number,
    /// Boolean values (`true`/`false`, case-insensitive in the source).
    Bool,
    /// Text/string values.
    Text,
}

impl ColumnType {
    /// Returns true if this type is numeric.
    pub fn is_numeric(&self) -> bool {
        matches!(self, ColumnType::Number)
    }
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Number => write!(f, "number"),
            ColumnType::Bool => write!(f, "bool"),
            ColumnType::Text => write!(f, "text"),
        }
    }
}

/// A single typed cell. Empty source fields become `Null` and are never
/// coerced to zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Cell {
    Number(f64),
    Bool(bool),
    Text(String),
    Null,
}

impl Cell {
    pub fn is_null(&self) -> bool {
        matches!(self, Cell::Null)
    }

    /// Numeric view of the cell; `None` for anything that is not a number.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Cell::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Textual representation used for lexicographic comparison, group keys
    /// and rendering. Nulls render as the empty string.
    pub fn render(&self) -> String {
        match self {
            Cell::Number(n) => crate::render::format_number(*n),
            Cell::Bool(b) => b.to_string(),
            Cell::Text(s) => s.clone(),
            Cell::Null => String::new(),
        }
    }

    /// Parse a raw field under an already-decided column type.
    ///
    /// The loader only calls this with the type it inferred from the full
    /// column, so the fallback to `Text` cannot fire for well-typed columns.
    pub fn parse_as(raw: &str, ty: ColumnType) -> Cell {
        if raw.is_empty() {
            return Cell::Null;
        }
        match ty {
            ColumnType::Number => raw
                .trim()
                .parse::<f64>()
                .map(Cell::Number)
                .unwrap_or_else(|_| Cell::Text(raw.to_string())),
            ColumnType::Bool => match raw.trim().to_ascii_lowercase().as_str() {
                "true" => Cell::Bool(true),
                "false" => Cell::Bool(false),
                _ => Cell::Text(raw.to_string()),
            },
            ColumnType::Text => Cell::Text(raw.to_string()),
        }
    }
}

/// A named, typed column stored columnar.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
    pub values: Vec<Cell>,
}

impl Column {
    pub fn new(name: impl Into<String>, ty: ColumnType, values: Vec<Cell>) -> Self {
        Self {
            name: name.into(),
            ty,
            values,
        }
    }

    /// All non-null numeric values, in row order.
    pub fn numeric_values(&self) -> Vec<f64> {
        self.values.iter().filter_map(Cell::as_number).collect()
    }
}

/// In-memory typed table: ordered columns of equal length.
///
/// Row order equals file order until an operation reorders it. Created by the
/// loader for one call and discarded after rendering.
#[derive(Debug, Clone, Serialize)]
pub struct Dataset {
    pub columns: Vec<Column>,
}

impl Dataset {
    pub fn new(columns: Vec<Column>) -> Self {
        debug_assert!(
            columns.windows(2).all(|w| w[0].values.len() == w[1].values.len()),
            "all columns must have the same length"
        );
        Self { columns }
    }

    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    pub fn row_count(&self) -> usize {
        self.columns.first().map_or(0, |c| c.values.len())
    }

    /// Column names in declaration order.
    pub fn header(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name == name)
    }

    /// Look up a column by name, failing with `ColumnNotFound`.
    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .ok_or_else(|| EngineError::ColumnNotFound(name.to_string()))
    }

    /// Cells of one row, in column order.
    pub fn row(&self, index: usize) -> Vec<&Cell> {
        self.columns.iter().map(|c| &c.values[index]).collect()
    }

    /// Build a new dataset containing the given rows, in the given order.
    /// Used by filter (subset, original order) and sort (permutation).
    pub fn select_rows(&self, indices: &[usize]) -> Dataset {
        let columns = self
            .columns
            .iter()
            .map(|c| {
                let values = indices.iter().map(|&i| c.values[i].clone()).collect();
                Column::new(c.name.clone(), c.ty, values)
            })
            .collect();
        Dataset::new(columns)
    }
}
