//! Aggregation Merging Module
//!
//! Combines the aggregation trees of up to three independently issued queries into the
//! namespace and module facets returned to clients.
//!
//! ## Sources
//! - **Primary**: the hit query; its buckets are used when no facet-only query ran.
//! - **Facet-only**: the text query without the client's facet selections.
//! - **Namespace facets**: an untexted query whose `namespaces` sub-trees replace all
//!   others, so namespace facets are always complete.
//!
//! Any of the three may be missing after a failure; merging uses what is left.
//!
//! ## Submodules
//! - **`merger`**: Tree merging and facet tallying.
//! - **`types`**: `FacetSummary` and `FacetEntry`.

pub mod merger;
pub mod types;

pub use merger::{merge_trees, summarize};
pub use types::{FacetEntry, FacetSummary};
