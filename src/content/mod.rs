//! Content Metadata Module
//!
//! Fetches namespace and module listings from the content API and turns module
//! metadata into per-module field projections.
//!
//! ## Overview
//! A module can designate which record fields the discovery UI shows, in
//! `meta.discovery.private.result[0].fields`. Those lists are collected once per search
//! request into a [`ProjectionIndex`] keyed by `"{namespaceID}-{moduleID}"`. Modules
//! without a list fall back to the first few values of each record.
//!
//! Content API failures never abort a search: they are logged, recorded in
//! [`ContentMetadata::failures`] and the affected modules simply have no projection.
//!
//! ## Submodules
//! - **`client`**: The `ContentApi` trait and its reqwest implementation.
//! - **`projector`**: Metadata fetching, `ProjectionIndex` and facet labels.
//! - **`types`**: Listing envelopes and module metadata DTOs.
//! - **`error`**: `MetadataError`.

pub mod client;
pub mod error;
pub mod projector;
pub mod types;

pub use client::{ContentApi, CortezaApiClient};
pub use error::MetadataError;
pub use projector::{ContentMetadata, FacetLabels, ProjectionIndex, fetch_metadata};
pub use types::{ModuleRecord, NamespaceRecord};
