//! Record output formatting.
//!
//! Records collected by a run are rendered as delimited text. The header is
//! the union of all field names in first-seen order, so records with
//! different field sets share one table.

pub mod csv;

pub use csv::{to_csv, TabularSerializer};
