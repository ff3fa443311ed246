//! Descriptive statistics: per-column and whole-dataset summaries.

use indexmap::IndexMap;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{EngineError, Result};

/// Summary for a numeric column.
#[derive(Debug, Clone, Serialize)]
pub struct NumericSummary {
    /// Number of non-null numeric values.
    pub count: usize,
    pub mean: f64,
    /// Sample standard deviation (n−1 in the denominator; 0 when count < 2).
    pub std: f64,
    pub min: f64,
    pub max: f64,
    pub q1: f64,
    pub median: f64,
    pub q3: f64,
}

/// Summary for a text or boolean column.
#[derive(Debug, Clone, Serialize)]
pub struct CategoricalSummary {
    /// Number of non-null values.
    pub count: usize,
    pub unique_count: usize,
    /// Most frequent value; first occurrence wins ties. `None` when the
    /// column is entirely null.
    pub most_frequent: Option<String>,
}

/// Per-column summary, tagged by the column's inferred type.
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum ColumnSummary {
    Numeric(NumericSummary),
    Categorical(CategoricalSummary),
}

/// Whole-dataset summary returned by [`describe`].
#[derive(Debug, Clone, Serialize)]
pub struct DescribeReport {
    pub rows: usize,
    /// One entry per header column, in header order.
    pub columns: IndexMap<String, ColumnSummary>,
}

/// Summarize every column of the dataset.
pub fn describe(dataset: &Dataset) -> DescribeReport {
    let mut columns = IndexMap::new();

    for col in &dataset.columns {
        let summary = if col.ty.is_numeric() {
            ColumnSummary::Numeric(numeric_summary(&col.numeric_values()))
        } else {
            let non_null: Vec<String> = col
                .values
                .iter()
                .filter(|c| !c.is_null())
                .map(|c| c.render())
                .collect();

            let mut counts: IndexMap<&str, usize> = IndexMap::new();
            for v in &non_null {
                *counts.entry(v.as_str()).or_insert(0) += 1;
            }
            // First occurrence wins ties, so only a strictly larger count
            // replaces the current best.
            let mut most_frequent: Option<(&str, usize)> = None;
            for (&v, &n) in &counts {
                if most_frequent.map_or(true, |(_, best)| n > best) {
                    most_frequent = Some((v, n));
                }
            }
            let most_frequent = most_frequent.map(|(v, _)| v.to_string());

            ColumnSummary::Categorical(CategoricalSummary {
                count: non_null.len(),
                unique_count: counts.len(),
                most_frequent,
            })
        };
        columns.insert(col.name.clone(), summary);
    }

    DescribeReport {
        rows: dataset.row_count(),
        columns,
    }
}

/// Numeric summary for a single column.
pub fn column_stats(dataset: &Dataset, column: &str) -> Result<NumericSummary> {
    let col = dataset.column(column)?;
    let values = col.numeric_values();
    if values.is_empty() {
        return Err(EngineError::NonNumericColumn(column.to_string()));
    }
    Ok(numeric_summary(&values))
}

fn numeric_summary(values: &[f64]) -> NumericSummary {
    let count = values.len();
    if count == 0 {
        return NumericSummary {
            count: 0,
            mean: 0.0,
            std: 0.0,
            min: 0.0,
            max: 0.0,
            q1: 0.0,
            median: 0.0,
            q3: 0.0,
        };
    }

    let mean = mean(values);
    let std = sample_std(values, mean);
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));

    NumericSummary {
        count,
        mean,
        std,
        min,
        max,
        q1: quantile(&sorted, 0.25),
        median: quantile(&sorted, 0.5),
        q3: quantile(&sorted, 0.75),
    }
}

pub(crate) fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n−1 denominator), 0 for fewer than 2 values.
pub(crate) fn sample_std(values: &[f64], mean: f64) -> f64 {
    if values.len() < 2 {
        return 0.0;
    }
    let ss: f64 = values.iter().map(|v| (v - mean).powi(2)).sum();
    (ss / (values.len() - 1) as f64).sqrt()
}

/// Quantile with linear interpolation at position p·(n−1) over a sorted
/// slice. The slice must be non-empty.
pub(crate) fn quantile(sorted: &[f64], p: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }
    let pos = p * (n - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return sorted[lo];
    }
    let frac = pos - lo as f64;
    sorted[lo] + (sorted[hi] - sorted[lo]) * frac
}
