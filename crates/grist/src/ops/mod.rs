//! Engine operations: each consumes a [`Dataset`](crate::dataset::Dataset)
//! and produces a structured result or a typed error.

pub mod correlate;
pub mod filter;
pub mod group;
pub mod outliers;
pub mod sort;
pub mod stats;
pub mod transform;

pub use correlate::{correlation, PairCorrelation};
pub use filter::{filter, FilterOp};
pub use group::{group_by, AggregateFunc};
pub use outliers::{outliers, Outlier, OutlierMethod};
pub use sort::{sort, SortOrder};
pub use stats::{
    column_stats, describe, CategoricalSummary, ColumnSummary, DescribeReport, NumericSummary,
};
pub use transform::{transform, TransformKind};
