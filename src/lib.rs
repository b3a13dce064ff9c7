//! Discovery Search Gateway Library
//!
//! Accepts free-text and facet queries over HTTP, runs them as access-scoped queries
//! against an Elasticsearch-compatible backend, merges the aggregation trees of the
//! issued queries into namespace and module facets, and reshapes the matched documents
//! using field metadata from the content API.
//!
//! ## Modules
//! Request flow is `gateway` → `access` → `query` → `backend` → `aggregation` →
//! `content` → `results`.
//!
//! - **`access`**: Bearer token verification and the principal/role scope.
//! - **`aggregation`**: Merging bucket trees and tallying facets.
//! - **`backend`**: The `_search` client, executor and failure classification.
//! - **`config`**: Environment settings and behavior profile.
//! - **`content`**: Content API client and per-module field projections.
//! - **`gateway`**: Per-request pipeline, HTTP handlers and router.
//! - **`query`**: Composition of backend query bodies.
//! - **`results`**: Normalization of hits into the client schema.

pub mod access;
pub mod aggregation;
pub mod backend;
pub mod config;
pub mod content;
pub mod gateway;
pub mod query;
pub mod results;

#[cfg(test)]
pub(crate) mod testing;
