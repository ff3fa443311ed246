//! Outlier detection. IQR tail bounds are the baseline; a z-score method is
//! available behind the same interface.

use std::str::FromStr;

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{EngineError, Result};
use crate::ops::stats;

/// A flagged value and the row it came from.
#[derive(Debug, Clone, Serialize)]
pub struct Outlier {
    /// Zero-based row index in the dataset.
    pub row: usize,
    pub value: f64,
}

/// Detection method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OutlierMethod {
    /// Flag values strictly outside [Q1 − 1.5·IQR, Q3 + 1.5·IQR].
    #[default]
    Iqr,
    /// Flag values with |z| > 3, using the sample standard deviation.
    ZScore,
}

impl FromStr for OutlierMethod {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "iqr" => Ok(OutlierMethod::Iqr),
            "zscore" | "z-score" => Ok(OutlierMethod::ZScore),
            other => Err(EngineError::InvalidRequest(format!(
                "unknown outlier method '{}'",
                other
            ))),
        }
    }
}

/// Flag outlying values in a numeric column.
///
/// Insufficient data is not a failure: fewer than 4 numeric values (IQR) or
/// zero spread (z-score) yield an empty result. Nulls and non-numeric cells
/// are skipped; row indices refer to the original dataset.
pub fn outliers(dataset: &Dataset, column: &str, method: &str) -> Result<Vec<Outlier>> {
    let method = OutlierMethod::from_str(method)?;
    let col = dataset.column(column)?;

    let numeric = col.numeric_values();
    if numeric.is_empty() {
        return Err(EngineError::NonNumericColumn(column.to_string()));
    }

    let flag: Box<dyn Fn(f64) -> bool> = match method {
        OutlierMethod::Iqr => {
            // Quartiles need at least a handful of points to mean anything.
            if numeric.len() < 4 {
                return Ok(Vec::new());
            }
            let mut sorted = numeric.clone();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            let q1 = stats::quantile(&sorted, 0.25);
            let q3 = stats::quantile(&sorted, 0.75);
            let iqr = q3 - q1;
            let lower = q1 - 1.5 * iqr;
            let upper = q3 + 1.5 * iqr;
            Box::new(move |v| v < lower || v > upper)
        }
        OutlierMethod::ZScore => {
            let mean = stats::mean(&numeric);
            let std = stats::sample_std(&numeric, mean);
            if std == 0.0 {
                return Ok(Vec::new());
            }
            Box::new(move |v| ((v - mean) / std).abs() > 3.0)
        }
    };

    Ok(col
        .values
        .iter()
        .enumerate()
        .filter_map(|(row, cell)| {
            let v = cell.as_number()?;
            flag(v).then_some(Outlier { row, value: v })
        })
        .collect())
}
