//! CLI argument definitions using clap.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use grist::OperationRequest;

/// Grist: tabular data analysis for delimited files
#[derive(Parser)]
#[command(name = "grist")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root that file arguments resolve against
    #[arg(long, global = true, default_value = ".")]
    pub root: PathBuf,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Summarize every column of a dataset
    Describe {
        /// Path to the data file (CSV)
        file: String,
    },

    /// Numeric summary for a single column
    Stats {
        file: String,
        column: String,
    },

    /// Keep rows matching a predicate
    Filter {
        file: String,
        column: String,
        /// One of: eq, ne, gt, gte, lt, lte, contains
        operator: String,
        value: String,
    },

    /// Stable sort by one column
    Sort {
        file: String,
        column: String,
        /// asc or desc
        #[arg(long, default_value = "asc")]
        order: String,
    },

    /// Group by one column and aggregate another
    Group {
        file: String,
        group_column: String,
        agg_column: String,
        /// One of: sum, mean, count, min, max, median
        #[arg(long, default_value = "sum")]
        func: String,
    },

    /// Pairwise Pearson correlation over numeric columns
    Correlate {
        file: String,
        /// Two or more column names
        #[arg(required = true, num_args = 2..)]
        columns: Vec<String>,
    },

    /// Append a derived numeric column
    Transform {
        file: String,
        column: String,
        /// One of: normalize, standardize, log, round, abs
        kind: String,
        /// Name for the derived column (default: <kind>_<column>)
        #[arg(long)]
        new_name: Option<String>,
    },

    /// Flag outlying values in a numeric column
    Outliers {
        file: String,
        column: String,
        /// iqr or zscore
        #[arg(long, default_value = "iqr")]
        method: String,
    },
}

impl Commands {
    /// Turn the parsed subcommand into an engine request.
    pub fn into_request(self) -> OperationRequest {
        match self {
            Commands::Describe { file } => OperationRequest::Describe { file },
            Commands::Stats { file, column } => OperationRequest::Statistics { file, column },
            Commands::Filter {
                file,
                column,
                operator,
                value,
            } => OperationRequest::Filter {
                file,
                column,
                operator,
                value,
            },
            Commands::Sort { file, column, order } => OperationRequest::Sort {
                file,
                column,
                order,
            },
            Commands::Group {
                file,
                group_column,
                agg_column,
                func,
            } => OperationRequest::GroupBy {
                file,
                group_column,
                agg_column,
                func,
            },
            Commands::Correlate { file, columns } => {
                OperationRequest::Correlate { file, columns }
            }
            Commands::Transform {
                file,
                column,
                kind,
                new_name,
            } => OperationRequest::Transform {
                file,
                column,
                kind,
                new_name,
            },
            Commands::Outliers {
                file,
                column,
                method,
            } => OperationRequest::Outliers {
                file,
                column,
                method,
            },
        }
    }
}
