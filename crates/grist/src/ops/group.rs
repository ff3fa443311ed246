//! Grouped aggregation: one aggregate value per distinct group key.

use std::str::FromStr;

use indexmap::IndexMap;
use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::{EngineError, Result};
use crate::ops::stats;

/// Supported aggregate functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AggregateFunc {
    Sum,
    Mean,
    Count,
    Min,
    Max,
    Median,
}

impl FromStr for AggregateFunc {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "sum" => Ok(AggregateFunc::Sum),
            "mean" => Ok(AggregateFunc::Mean),
            "count" => Ok(AggregateFunc::Count),
            "min" => Ok(AggregateFunc::Min),
            "max" => Ok(AggregateFunc::Max),
            "median" => Ok(AggregateFunc::Median),
            other => Err(EngineError::UnsupportedAggregate(other.to_string())),
        }
    }
}

/// Group rows by the distinct values of `group_column` and aggregate
/// `agg_column` within each group.
///
/// Groups are ordered by first occurrence. Null keys bucket under the empty
/// key. `count` is the group's row count; the other functions use the
/// group's numeric cells and skip non-numeric/null ones, failing only when a
/// group has no usable values at all.
pub fn group_by(
    dataset: &Dataset,
    group_column: &str,
    agg_column: &str,
    func: &str,
) -> Result<IndexMap<String, f64>> {
    let func = AggregateFunc::from_str(func)?;
    let keys = dataset.column(group_column)?;
    let values = dataset.column(agg_column)?;

    let mut groups: IndexMap<String, Vec<usize>> = IndexMap::new();
    for (i, key) in keys.values.iter().enumerate() {
        groups.entry(key.render()).or_default().push(i);
    }

    let mut result = IndexMap::with_capacity(groups.len());
    for (key, rows) in groups {
        let agg = match func {
            AggregateFunc::Count => rows.len() as f64,
            _ => {
                let numeric: Vec<f64> = rows
                    .iter()
                    .filter_map(|&i| values.values[i].as_number())
                    .collect();
                if numeric.is_empty() {
                    return Err(EngineError::NonNumericColumn(agg_column.to_string()));
                }
                aggregate(&numeric, func)
            }
        };
        result.insert(key, agg);
    }

    Ok(result)
}

fn aggregate(values: &[f64], func: AggregateFunc) -> f64 {
    match func {
        AggregateFunc::Sum => values.iter().sum(),
        AggregateFunc::Mean => stats::mean(values),
        AggregateFunc::Min => values.iter().copied().fold(f64::INFINITY, f64::min),
        AggregateFunc::Max => values.iter().copied().fold(f64::NEG_INFINITY, f64::max),
        AggregateFunc::Median => {
            let mut sorted = values.to_vec();
            sorted.sort_by(|a, b| a.partial_cmp(b).unwrap_or(std::cmp::Ordering::Equal));
            stats::quantile(&sorted, 0.5)
        }
        AggregateFunc::Count => values.len() as f64,
    }
}
