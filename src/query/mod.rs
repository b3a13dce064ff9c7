//! Query Composition Module
//!
//! Translates an inbound [`SearchRequest`] and the requester's `AccessScope` into the
//! backend search body.
//!
//! ## Query Shape
//! Every composed query carries:
//! - an index prefix selector (private for authenticated principals),
//! - an optional `simple_query_string` full-text clause,
//! - role-based `filter`/`must_not` clauses for authenticated principals,
//! - the fixed two-level aggregation tree (resource type → resource name, modules,
//!   namespaces), so any query can double as a facet query.
//!
//! ## Submodules
//! - **`types`**: The request DTO, clause model and aggregation tree.
//! - **`composer`**: Builders for the primary, facet-only and namespace-facet queries.

pub mod composer;
pub mod types;

pub use composer::{compose, compose_facet_query, compose_namespace_facet_query};
pub use types::{BackendQuery, Clause, SearchRequest, TermsAggregation};
