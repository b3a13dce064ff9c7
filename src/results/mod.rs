//! Result Transformation Module
//!
//! Turns the primary search response and the merged facet tree into the document
//! returned to clients.
//!
//! ## Hit Shapes
//! - **`system:user`**: `userID` moves to the identifier key.
//! - **`compose:record`**: `values` becomes an ordered `{name, label, value}` list limited
//!   to the module's configured fields, `customValues` holds the first element of every
//!   exposed array value, and `_id` moves to the identifier key.
//! - **`compose:namespace` / `compose:module`**: `_id` moves to the identifier key.
//!
//! Hits of any other type are dropped; `resourceType` is always stripped.

pub mod transformer;
pub mod types;

pub use transformer::{normalize_hit, transform};
pub use types::{NormalizedHit, NormalizedResult, RecordValue, ResourceKind, ResultTotal};

#[cfg(test)]
mod tests;
