//! Stable single-column sorting.

use std::cmp::Ordering;
use std::str::FromStr;

use serde::Serialize;

use crate::dataset::{Cell, Dataset};
use crate::error::{EngineError, Result};

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl FromStr for SortOrder {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "asc" | "ascending" => Ok(SortOrder::Asc),
            "desc" | "descending" => Ok(SortOrder::Desc),
            other => Err(EngineError::InvalidRequest(format!(
                "sort order must be 'asc' or 'desc', got '{}'",
                other
            ))),
        }
    }
}

/// Sort rows by one column. The sort is stable: rows with equal keys keep
/// their original relative order. Nulls sort after all non-null values
/// regardless of direction.
pub fn sort(dataset: &Dataset, column: &str, order: SortOrder) -> Result<Dataset> {
    let col = dataset.column(column)?;
    let numeric = col.ty.is_numeric();

    let mut indices: Vec<usize> = (0..dataset.row_count()).collect();
    indices.sort_by(|&a, &b| {
        compare_cells(&col.values[a], &col.values[b], numeric, order)
    });

    Ok(dataset.select_rows(&indices))
}

fn compare_cells(a: &Cell, b: &Cell, numeric: bool, order: SortOrder) -> Ordering {
    // Nulls last in both directions, so they are ordered outside the
    // direction-sensitive comparison.
    match (a.is_null(), b.is_null()) {
        (true, true) => return Ordering::Equal,
        (true, false) => return Ordering::Greater,
        (false, true) => return Ordering::Less,
        (false, false) => {}
    }

    let ord = if numeric {
        let (x, y) = (a.as_number().unwrap_or(f64::NAN), b.as_number().unwrap_or(f64::NAN));
        x.partial_cmp(&y).unwrap_or(Ordering::Equal)
    } else {
        a.render().cmp(&b.render())
    };

    match order {
        SortOrder::Asc => ord,
        SortOrder::Desc => ord.reverse(),
    }
}
