//! Predicate filtering over a single column.

use std::str::FromStr;

use serde::Serialize;

use crate::dataset::{Cell, ColumnType, Dataset};
use crate::error::{EngineError, Result};

/// Supported filter operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterOp {
    Eq,
    Ne,
    Gt,
    Gte,
    Lt,
    Lte,
    Contains,
}

impl FromStr for FilterOp {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "eq" => Ok(FilterOp::Eq),
            "ne" => Ok(FilterOp::Ne),
            "gt" => Ok(FilterOp::Gt),
            "gte" => Ok(FilterOp::Gte),
            "lt" => Ok(FilterOp::Lt),
            "lte" => Ok(FilterOp::Lte),
            "contains" => Ok(FilterOp::Contains),
            other => Err(EngineError::UnsupportedOperator(other.to_string())),
        }
    }
}

/// A value of `""` or `null` (case-insensitive) addresses null cells: they
/// satisfy only `eq`/`ne` against it and no other predicate.
fn is_null_query(value: &str) -> bool {
    value.is_empty() || value.eq_ignore_ascii_case("null")
}

/// Keep the rows whose cell in `column` satisfies `operator value`.
/// Row order is preserved.
pub fn filter(dataset: &Dataset, column: &str, operator: &str, value: &str) -> Result<Dataset> {
    let op = FilterOp::from_str(operator)?;
    let col = dataset.column(column)?;

    if op == FilterOp::Contains && col.ty != ColumnType::Text {
        return Err(EngineError::UnsupportedOperator(format!(
            "contains is only defined for text columns, '{}' is {}",
            column, col.ty
        )));
    }

    let null_query = is_null_query(value);
    // Numeric comparison only when both sides are numbers; otherwise the
    // comparison is lexicographic on the textual representation.
    let numeric_value = if col.ty == ColumnType::Number {
        value.trim().parse::<f64>().ok()
    } else {
        None
    };

    let kept: Vec<usize> = col
        .values
        .iter()
        .enumerate()
        .filter(|(_, cell)| matches_predicate(cell, op, value, null_query, numeric_value))
        .map(|(i, _)| i)
        .collect();

    Ok(dataset.select_rows(&kept))
}

fn matches_predicate(
    cell: &Cell,
    op: FilterOp,
    value: &str,
    null_query: bool,
    numeric_value: Option<f64>,
) -> bool {
    if null_query {
        return match op {
            FilterOp::Eq => cell.is_null(),
            FilterOp::Ne => !cell.is_null(),
            _ => false,
        };
    }
    if cell.is_null() {
        return false;
    }

    if let (Some(n), Some(q)) = (cell.as_number(), numeric_value) {
        return match op {
            FilterOp::Eq => n == q,
            FilterOp::Ne => n != q,
            FilterOp::Gt => n > q,
            FilterOp::Gte => n >= q,
            FilterOp::Lt => n < q,
            FilterOp::Lte => n <= q,
            FilterOp::Contains => unreachable!("contains rejected for numeric columns"),
        };
    }

    let text = cell.render();
    match op {
        FilterOp::Eq => text == value,
        FilterOp::Ne => text != value,
        FilterOp::Gt => text.as_str() > value,
        FilterOp::Gte => text.as_str() >= value,
        FilterOp::Lt => text.as_str() < value,
        FilterOp::Lte => text.as_str() <= value,
        FilterOp::Contains => text.contains(value),
    }
}
