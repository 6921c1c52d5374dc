//! Variables module
//!
//! Path resolution over JSON payloads and `{{apiId.path}}` template
//! substitution for chained requests.

pub mod path;
pub mod substitution;

pub use path::{resolve, value_to_string, Resolved};
pub use substitution::{contains_broadcast, substitute, substitute_str, Placeholder};
