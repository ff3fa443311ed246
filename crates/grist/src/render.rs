//! The single rendering seam: every structured result and every error is
//! turned into the textual contract here, nowhere else.

use crate::dataset::Dataset;
use crate::error::EngineError;
use crate::ops::{ColumnSummary, DescribeReport, NumericSummary, Outlier, PairCorrelation};

use indexmap::IndexMap;

/// How many rows a filter/sort/transform report shows.
const PREVIEW_ROWS: usize = 10;

/// Structured result of one operation. Never crosses the engine boundary
/// directly; [`render`] turns it into the report string.
#[derive(Debug)]
pub enum Report {
    Describe(DescribeReport),
    ColumnStats {
        column: String,
        summary: NumericSummary,
    },
    /// Filter and sort results: row count plus a bounded preview.
    Rows {
        verb: &'static str,
        dataset: Dataset,
    },
    Groups {
        group_column: String,
        agg_column: String,
        func: String,
        groups: IndexMap<String, f64>,
    },
    Correlation(Vec<PairCorrelation>),
    Transformed {
        new_column: String,
        dataset: Dataset,
    },
    Outliers {
        column: String,
        method: String,
        outliers: Vec<Outlier>,
    },
}

/// Render a successful result as its fixed human-readable report.
pub fn render(report: &Report) -> String {
    match report {
        Report::Describe(r) => render_describe(r),
        Report::ColumnStats { column, summary } => {
            format!("Statistics for '{}': {}", column, numeric_fields(summary))
        }
        Report::Rows { verb, dataset } => render_rows(verb, dataset),
        Report::Groups {
            group_column,
            agg_column,
            func,
            groups,
        } => {
            let mut out = format!(
                "{}({}) by '{}': {} group(s)\n",
                func,
                agg_column,
                group_column,
                groups.len()
            );
            for (key, value) in groups {
                let shown = if key.is_empty() { "(null)" } else { key.as_str() };
                out.push_str(&format!("  {}: {}\n", shown, format_number(*value)));
            }
            out
        }
        Report::Correlation(pairs) => {
            let mut out = String::new();
            for pair in pairs {
                let r = match pair.r {
                    Some(v) => format!("{:.4}", v),
                    None => "undefined".to_string(),
                };
                out.push_str(&format!("{} ~ {}: {}\n", pair.left, pair.right, r));
            }
            out
        }
        Report::Transformed { new_column, dataset } => {
            let mut out = format!(
                "Added column '{}' ({} rows, {} columns)\n",
                new_column,
                dataset.row_count(),
                dataset.column_count()
            );
            out.push_str(&preview(dataset));
            out
        }
        Report::Outliers {
            column,
            method,
            outliers,
        } => {
            if outliers.is_empty() {
                return format!("No outliers detected in '{}' ({})\n", column, method);
            }
            let mut out = format!(
                "Outliers in '{}' ({}): {} found\n",
                column,
                method,
                outliers.len()
            );
            for o in outliers {
                out.push_str(&format!("  row {}: {}\n", o.row, format_number(o.value)));
            }
            out
        }
    }
}

/// Render a failure. This string — `Error: ` followed by the message — is the
/// only failure channel across the engine boundary.
pub fn render_error(err: &EngineError) -> String {
    format!("Error: {}", err)
}

fn render_describe(report: &DescribeReport) -> String {
    let mut out = format!(
        "Dataset: {} rows, {} columns\n",
        report.rows,
        report.columns.len()
    );
    for (name, summary) in &report.columns {
        match summary {
            ColumnSummary::Numeric(s) => {
                out.push_str(&format!("  {}: {}\n", name, numeric_fields(s)));
            }
            ColumnSummary::Categorical(s) => {
                let mf = s.most_frequent.as_deref().unwrap_or("(null)");
                out.push_str(&format!(
                    "  {}: count={} unique={} most_frequent='{}'\n",
                    name, s.count, s.unique_count, mf
                ));
            }
        }
    }
    out
}

fn numeric_fields(s: &NumericSummary) -> String {
    format!(
        "count={} mean={} std={} min={} max={} q1={} median={} q3={}",
        s.count,
        format_number(s.mean),
        format_number(s.std),
        format_number(s.min),
        format_number(s.max),
        format_number(s.q1),
        format_number(s.median),
        format_number(s.q3)
    )
}

fn render_rows(verb: &str, dataset: &Dataset) -> String {
    let mut out = format!("{} result: {} rows\n", verb, dataset.row_count());
    out.push_str(&preview(dataset));
    out
}

fn preview(dataset: &Dataset) -> String {
    let shown = dataset.row_count().min(PREVIEW_ROWS);
    let mut out = dataset.header().join(", ");
    out.push('\n');
    for i in 0..shown {
        let line: Vec<String> = dataset.row(i).iter().map(|c| c.render()).collect();
        out.push_str(&line.join(", "));
        out.push('\n');
    }
    if shown < dataset.row_count() {
        out.push_str(&format!(
            "  ... ({} of {} rows shown)\n",
            shown,
            dataset.row_count()
        ));
    }
    out
}

/// Numbers render as integers when they are whole, otherwise with 4 decimal
/// places and trailing zeros trimmed. Keeps reports stable across runs.
pub fn format_number(v: f64) -> String {
    if !v.is_finite() {
        return v.to_string();
    }
    if v == v.trunc() && v.abs() < 1e15 {
        return format!("{}", v as i64);
    }
    let s = format!("{:.4}", v);
    s.trim_end_matches('0').trim_end_matches('.').to_string()
}
