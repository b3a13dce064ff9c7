use crate::backend::SearchError;
use crate::results::NormalizedResult;

use serde::Serialize;
use std::fmt;

/// What became of one of the per-request searches.
#[derive(Debug, Clone)]
pub enum SourceOutcome<T> {
    Ready(T),
    /// Not issued for this request.
    Skipped,
    Failed(SearchError),
}

impl<T> SourceOutcome<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            SourceOutcome::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn status(&self) -> SourceStatus {
        match self {
            SourceOutcome::Ready(_) => SourceStatus::Ready,
            SourceOutcome::Skipped => SourceStatus::Skipped,
            SourceOutcome::Failed(e) => SourceStatus::Failed(e.clone()),
        }
    }
}

impl<T> From<Result<T, SearchError>> for SourceOutcome<T> {
    fn from(result: Result<T, SearchError>) -> Self {
        match result {
            Ok(value) => SourceOutcome::Ready(value),
            Err(e) => SourceOutcome::Failed(e),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceStatus {
    Ready,
    Skipped,
    Failed(SearchError),
}

impl SourceStatus {
    pub fn is_failed(&self) -> bool {
        matches!(self, SourceStatus::Failed(_))
    }
}

/// Names of the searches issued per request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchSource {
    Primary,
    Facet,
    NamespaceFacet,
}

impl fmt::Display for SearchSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SearchSource::Primary => "primary search",
            SearchSource::Facet => "facet search",
            SearchSource::NamespaceFacet => "namespace facet search",
        };
        f.write_str(name)
    }
}

/// Per-source outcome of one pipeline run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineReport {
    pub primary: SourceStatus,
    pub facet: SourceStatus,
    pub namespace_facet: SourceStatus,
    pub metadata_failures: Vec<String>,
}

impl PipelineReport {
    /// One line per failed source, in a stable order.
    pub fn degraded(&self) -> Vec<String> {
        let searches = [
            (SearchSource::Primary, &self.primary),
            (SearchSource::Facet, &self.facet),
            (SearchSource::NamespaceFacet, &self.namespace_facet),
        ];

        let mut lines: Vec<String> = searches
            .into_iter()
            .filter_map(|(source, status)| match status {
                SourceStatus::Failed(e) => Some(format!("{}: {}", source, e)),
                _ => None,
            })
            .collect();

        lines.extend(
            self.metadata_failures
                .iter()
                .map(|failure| format!("content metadata: {}", failure)),
        );
        lines
    }

    pub fn is_degraded(&self) -> bool {
        self.primary.is_failed()
            || self.facet.is_failed()
            || self.namespace_facet.is_failed()
            || !self.metadata_failures.is_empty()
    }
}

/// Result of one pipeline run.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub result: NormalizedResult,
    pub report: PipelineReport,
}

/// JSON body of non-200 search responses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}
