//! Operation requests: the structured input side of the engine boundary.

use serde::{Deserialize, Serialize};

/// One analysis request, keyed by operation name and carrying only the
/// parameters relevant to that operation. Constructed fresh per call.
///
/// Operator, aggregate, transform and method names travel as plain strings
/// and are validated inside the engine, so an unknown name surfaces as its
/// dedicated error kind instead of a deserialization failure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OperationRequest {
    /// Summarize every column.
    Describe { file: String },
    /// Numeric summary for one column.
    Statistics { file: String, column: String },
    /// Keep rows satisfying `column operator value`.
    Filter {
        file: String,
        column: String,
        operator: String,
        value: String,
    },
    /// Stable sort by one column.
    Sort {
        file: String,
        column: String,
        #[serde(default = "default_order")]
        order: String,
    },
    /// Group by one column, aggregate another.
    GroupBy {
        file: String,
        group_column: String,
        agg_column: String,
        func: String,
    },
    /// Pairwise Pearson correlation over the listed columns.
    Correlate { file: String, columns: Vec<String> },
    /// Append a derived numeric column.
    Transform {
        file: String,
        column: String,
        kind: String,
        #[serde(default)]
        new_name: Option<String>,
    },
    /// Flag outlying values in a numeric column.
    Outliers {
        file: String,
        column: String,
        #[serde(default = "default_method")]
        method: String,
    },
}

fn default_order() -> String {
    "asc".to_string()
}

fn default_method() -> String {
    "iqr".to_string()
}

impl OperationRequest {
    /// Operation name used in lifecycle notifications and logs.
    pub fn operation(&self) -> &'static str {
        match self {
            OperationRequest::Describe { .. } => "describe",
            OperationRequest::Statistics { .. } => "statistics",
            OperationRequest::Filter { .. } => "filter",
            OperationRequest::Sort { .. } => "sort",
            OperationRequest::GroupBy { .. } => "group_by",
            OperationRequest::Correlate { .. } => "correlate",
            OperationRequest::Transform { .. } => "transform",
            OperationRequest::Outliers { .. } => "outliers",
        }
    }

    /// Path parameter, relative to the engine's workspace root.
    pub fn file(&self) -> &str {
        match self {
            OperationRequest::Describe { file }
            | OperationRequest::Statistics { file, .. }
            | OperationRequest::Filter { file, .. }
            | OperationRequest::Sort { file, .. }
            | OperationRequest::GroupBy { file, .. }
            | OperationRequest::Correlate { file, .. }
            | OperationRequest::Transform { file, .. }
            | OperationRequest::Outliers { file, .. } => file,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tagged_deserialization() {
        let req: OperationRequest = serde_json::from_str(
            r#"{"operation":"filter","file":"data.csv","column":"age","operator":"gt","value":"30"}"#,
        )
        .unwrap();
        assert_eq!(req.operation(), "filter");
        assert_eq!(req.file(), "data.csv");
    }

    #[test]
    fn test_sort_order_defaults_to_asc() {
        let req: OperationRequest =
            serde_json::from_str(r#"{"operation":"sort","file":"d.csv","column":"v"}"#).unwrap();
        match req {
            OperationRequest::Sort { order, .. } => assert_eq!(order, "asc"),
            _ => panic!("expected sort"),
        }
    }

    #[test]
    fn test_outlier_method_defaults_to_iqr() {
        let req: OperationRequest =
            serde_json::from_str(r#"{"operation":"outliers","file":"d.csv","column":"v"}"#)
                .unwrap();
        match req {
            OperationRequest::Outliers { method, .. } => assert_eq!(method, "iqr"),
            _ => panic!("expected outliers"),
        }
    }
}
