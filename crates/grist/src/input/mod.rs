//! Input parsing and load-time type inference.

mod parser;

pub use parser::{load_path, load_str};
