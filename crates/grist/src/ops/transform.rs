//! Column transforms: derive a new numeric column from an existing one.
//!
//! Transforms are non-destructive: the source column and all rows are left
//! untouched and the derived column is appended at the end.

use std::str::FromStr;

use serde::Serialize;

use crate::dataset::{Cell, Column, ColumnType, Dataset};
use crate::error::{EngineError, Result};
use crate::ops::stats;

/// Supported transform types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransformKind {
    /// Min-max scaling: (x−min)/(max−min); all zeros when max == min.
    Normalize,
    /// Z-score: (x−mean)/std; all zeros when std == 0.
    Standardize,
    /// Natural log; null for x ≤ 0.
    Log,
    Round,
    Abs,
}

impl TransformKind {
    fn name(&self) -> &'static str {
        match self {
            TransformKind::Normalize => "normalize",
            TransformKind::Standardize => "standardize",
            TransformKind::Log => "log",
            TransformKind::Round => "round",
            TransformKind::Abs => "abs",
        }
    }
}

impl FromStr for TransformKind {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "normalize" => Ok(TransformKind::Normalize),
            "standardize" => Ok(TransformKind::Standardize),
            "log" => Ok(TransformKind::Log),
            "round" => Ok(TransformKind::Round),
            "abs" => Ok(TransformKind::Abs),
            other => Err(EngineError::UnknownTransform(other.to_string())),
        }
    }
}

/// Append a derived numeric column computed from `column`.
///
/// Non-numeric and null source cells map to null in the derived column; a
/// per-cell domain error (log of a non-positive value) also maps to null
/// rather than failing the operation. Returns the widened dataset and the
/// name of the new column.
pub fn transform(
    dataset: &Dataset,
    column: &str,
    kind: &str,
    new_name: Option<&str>,
) -> Result<(Dataset, String)> {
    let kind = TransformKind::from_str(kind)?;
    let col = dataset.column(column)?;

    let numeric = col.numeric_values();
    if numeric.is_empty() {
        return Err(EngineError::NonNumericColumn(column.to_string()));
    }

    let name = match new_name {
        Some(n) => n.to_string(),
        None => format!("{}_{}", kind.name(), column),
    };
    if dataset.column_index(&name).is_some() {
        return Err(EngineError::DuplicateColumn(name));
    }

    let apply: Box<dyn Fn(f64) -> Option<f64>> = match kind {
        TransformKind::Normalize => {
            let min = numeric.iter().copied().fold(f64::INFINITY, f64::min);
            let max = numeric.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            let range = max - min;
            Box::new(move |x| {
                if range == 0.0 {
                    Some(0.0)
                } else {
                    Some((x - min) / range)
                }
            })
        }
        TransformKind::Standardize => {
            let mean = stats::mean(&numeric);
            let std = stats::sample_std(&numeric, mean);
            Box::new(move |x| {
                if std == 0.0 {
                    Some(0.0)
                } else {
                    Some((x - mean) / std)
                }
            })
        }
        TransformKind::Log => Box::new(|x| if x > 0.0 { Some(x.ln()) } else { None }),
        TransformKind::Round => Box::new(|x| Some(x.round())),
        TransformKind::Abs => Box::new(|x| Some(x.abs())),
    };

    let values: Vec<Cell> = col
        .values
        .iter()
        .map(|cell| match cell.as_number().and_then(&apply) {
            Some(v) => Cell::Number(v),
            None => Cell::Null,
        })
        .collect();

    let mut columns = dataset.columns.clone();
    columns.push(Column::new(name.clone(), ColumnType::Number, values));
    Ok((Dataset::new(columns), name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::load_str;

    fn derived(ds: &Dataset, name: &str) -> Vec<Cell> {
        ds.column(name).unwrap().values.clone()
    }

    #[test]
    fn test_normalize() {
        let ds = load_str("v\n0\n5\n10\n").unwrap();
        let (out, name) = transform(&ds, "v", "normalize", None).unwrap();
        assert_eq!(name, "normalize_v");
        assert_eq!(
            derived(&out, "normalize_v"),
            vec![Cell::Number(0.0), Cell::Number(0.5), Cell::Number(1.0)]
        );
        // Source column untouched, appended at the end.
        assert_eq!(out.header(), vec!["v", "normalize_v"]);
        assert_eq!(out.columns[0].values, ds.columns[0].values);
    }

    #[test]
    fn test_normalize_constant_column() {
        let ds = load_str("v\n7\n7\n").unwrap();
        let (out, _) = transform(&ds, "v", "normalize", None).unwrap();
        assert_eq!(
            derived(&out, "normalize_v"),
            vec![Cell::Number(0.0), Cell::Number(0.0)]
        );
    }

    #[test]
    fn test_standardize_zero_std() {
        let ds = load_str("v\n3\n3\n3\n").unwrap();
        let (out, _) = transform(&ds, "v", "standardize", None).unwrap();
        assert!(derived(&out, "standardize_v")
            .iter()
            .all(|c| *c == Cell::Number(0.0)));
    }

    #[test]
    fn test_log_non_positive_becomes_null() {
        let ds = load_str("v\n1\n0\n-5\n").unwrap();
        let (out, _) = transform(&ds, "v", "log", None).unwrap();
        assert_eq!(
            derived(&out, "log_v"),
            vec![Cell::Number(0.0), Cell::Null, Cell::Null]
        );
    }

    #[test]
    fn test_null_source_cell_stays_null() {
        let ds = load_str("v,pad\n2,a\n,b\n").unwrap();
        let (out, _) = transform(&ds, "v", "abs", None).unwrap();
        assert_eq!(derived(&out, "abs_v"), vec![Cell::Number(2.0), Cell::Null]);
    }

    #[test]
    fn test_round() {
        let ds = load_str("v\n1.4\n2.6\n").unwrap();
        let (out, _) = transform(&ds, "v", "round", None).unwrap();
        assert_eq!(
            derived(&out, "round_v"),
            vec![Cell::Number(1.0), Cell::Number(3.0)]
        );
    }

    #[test]
    fn test_custom_name_and_duplicate() {
        let ds = load_str("v\n1\n").unwrap();
        let (out, name) = transform(&ds, "v", "abs", Some("magnitude")).unwrap();
        assert_eq!(name, "magnitude");
        assert!(out.column("magnitude").is_ok());

        let err = transform(&ds, "v", "abs", Some("v")).unwrap_err();
        assert!(matches!(err, EngineError::DuplicateColumn(_)));
    }

    #[test]
    fn test_unknown_transform() {
        let ds = load_str("v\n1\n").unwrap();
        let err = transform(&ds, "v", "sqrt", None).unwrap_err();
        assert!(matches!(err, EngineError::UnknownTransform(_)));
    }

    #[test]
    fn test_non_numeric_source() {
        let ds = load_str("name\nAlice\n").unwrap();
        let err = transform(&ds, "name", "abs", None).unwrap_err();
        assert!(matches!(err, EngineError::NonNumericColumn(_)));
    }
}
