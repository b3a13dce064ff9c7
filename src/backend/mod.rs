//! Search Backend Module
//!
//! Executes composed queries against the document-search backend and classifies what
//! comes back.
//!
//! ## Failure Classes
//! - **Transport**: no response at all (network error, timeout).
//! - **Backend**: a response carrying an error envelope; reason, type and status are kept.
//! - **Decode**: a response whose body is not the expected JSON.
//!
//! Nothing is retried at this layer.
//!
//! ## Submodules
//! - **`client`**: The `SearchBackend` transport trait and its reqwest implementation.
//! - **`executor`**: Request options, failure classification and raw dumps.
//! - **`types`**: The decoded response envelope (hits and aggregation buckets).
//! - **`error`**: `SearchError`.

pub mod client;
pub mod error;
pub mod executor;
pub mod types;

pub use client::{BackendReply, ElasticClient, SearchBackend, SearchCall};
pub use error::SearchError;
pub use executor::{DiagnosticSink, ExecuteOptions, SearchExecutor, TracingSink};
pub use types::{BucketNode, RawHit, SearchResponse};
