//! Grist: tabular data analysis engine for delimited datasets.
//!
//! Grist loads delimited text into an in-memory typed table and answers one
//! analysis request over it: descriptive statistics, predicate filtering,
//! stable sorting, grouped aggregation, pairwise correlation, column
//! transforms, or IQR outlier detection.
//!
//! # Core Principles
//!
//! - **Stateless**: each call is a pure function of file content and request;
//!   nothing is cached between invocations
//! - **Typed once**: column types are inferred at load time, never re-parsed
//! - **One boundary**: callers always get a rendered string; failures are
//!   `Error: <message>`, never a raised fault
//!
//! # Example
//!
//! ```no_run
//! use grist::{Engine, OperationRequest};
//!
//! # async fn demo() {
//! let engine = Engine::new("/data");
//! let report = engine
//!     .execute(OperationRequest::Describe { file: "metrics.csv".into() })
//!     .await;
//! println!("{report}");
//! # }
//! ```

pub mod dataset;
pub mod error;
pub mod input;
pub mod ops;
pub mod render;
pub mod request;

mod engine;

pub use crate::engine::{Engine, ToolEvent, ToolPhase};
pub use dataset::{Cell, Column, ColumnType, Dataset};
pub use error::{EngineError, Result};
pub use render::Report;
pub use request::OperationRequest;
