//! HTTP Gateway Module
//!
//! Wires the search stages together and exposes them over HTTP.
//!
//! ## Endpoints
//! - **`GET /`**: search; query parameters `q`, `size`, `dump` and repeated
//!   `moduleAggs` / `namespaceAggs`. Always answers 200 with a best-effort body whose
//!   `degraded` list names failed sources, or 504 when the request timeout elapses.
//! - **`GET /healthcheck`**: `healthy` when the search backend answers a ping,
//!   `unhealthy` with status 500 otherwise.
//!
//! ## Submodules
//! - **`pipeline`**: `SearchPipeline`, the per-request orchestration.
//! - **`handlers`**: Axum handlers, shared state and the router.
//! - **`types`**: Source outcomes and the per-request report.

pub mod handlers;
pub mod pipeline;
pub mod types;

pub use handlers::{AppState, router};
pub use pipeline::SearchPipeline;
pub use types::{PipelineReport, SearchOutcome, SourceOutcome, SourceStatus};
