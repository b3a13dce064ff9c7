use super::types::{PipelineReport, SearchOutcome, SearchSource, SourceOutcome};
use crate::access::AccessScope;
use crate::aggregation::merge_trees;
use crate::backend::{ExecuteOptions, SearchError, SearchExecutor, SearchResponse};
use crate::config::Profile;
use crate::content::{ContentApi, fetch_metadata};
use crate::query::{
    BackendQuery, SearchRequest, compose, compose_facet_query, compose_namespace_facet_query,
};
use crate::results::transform;

use std::sync::Arc;

/// Runs one search request end to end: compose, execute, merge, transform.
pub struct SearchPipeline {
    executor: SearchExecutor,
    content: Arc<dyn ContentApi>,
    profile: Profile,
}

impl SearchPipeline {
    pub fn new(executor: SearchExecutor, content: Arc<dyn ContentApi>, profile: Profile) -> Self {
        Self {
            executor,
            content,
            profile,
        }
    }

    pub async fn ping(&self) -> Result<(), SearchError> {
        self.executor.ping().await
    }

    /// Issues the primary, facet and namespace-facet searches and the metadata fetch
    /// concurrently. A failing source is logged and left out; the rest still
    /// produce a result.
    pub async fn run(
        &self,
        request: &SearchRequest,
        scope: &AccessScope,
        caller_token: Option<&str>,
    ) -> SearchOutcome {
        let options = ExecuteOptions {
            size: request.size,
            dump_raw: request.dump_raw,
        };

        let primary_query = compose(request, scope, &self.profile);
        let facet_query = request
            .has_text()
            .then(|| compose_facet_query(request, scope, &self.profile));
        let namespace_query = compose_namespace_facet_query(scope, &self.profile);

        let (primary, facet, namespace_facet, metadata) = tokio::join!(
            self.search(SearchSource::Primary, Some(&primary_query), options),
            self.search(SearchSource::Facet, facet_query.as_ref(), options),
            self.search(SearchSource::NamespaceFacet, Some(&namespace_query), options),
            fetch_metadata(self.content.as_ref(), caller_token),
        );

        let tree = merge_trees(primary.ready(), facet.ready(), namespace_facet.ready());
        let mut result = transform(
            primary.ready(),
            &tree,
            &metadata,
            request.no_hits(),
            &self.profile,
        );

        let report = PipelineReport {
            primary: primary.status(),
            facet: facet.status(),
            namespace_facet: namespace_facet.status(),
            metadata_failures: metadata.failures.iter().map(ToString::to_string).collect(),
        };
        result.degraded = report.degraded();

        tracing::info!(
            principal = scope.principal_id,
            query = %request.query,
            hits = result.total_hits,
            total = result.total.value,
            degraded = report.is_degraded(),
            "search served"
        );

        SearchOutcome { result, report }
    }

    async fn search(
        &self,
        source: SearchSource,
        query: Option<&BackendQuery>,
        options: ExecuteOptions,
    ) -> SourceOutcome<SearchResponse> {
        let Some(query) = query else {
            return SourceOutcome::Skipped;
        };

        let outcome = SourceOutcome::from(self.executor.execute(query, options).await);
        if let SourceOutcome::Failed(e) = &outcome {
            tracing::error!(kind = e.kind(), "Could not execute {}: {}", source, e);
        }
        outcome
    }
}
