use super::client::ContentApi;
use super::error::MetadataError;
use super::types::ModuleRecord;

use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use std::fmt;

/// Lookup key of a module's projection.
pub fn projection_key(namespace_id: u64, module_id: u64) -> String {
    format!("{}-{}", namespace_id, module_id)
}

/// Ordered record fields to expose, per `(namespaceID, moduleID)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProjectionIndex {
    entries: HashMap<String, Vec<String>>,
}

impl ProjectionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a projection. Duplicate field names are dropped keeping the first
    /// occurrence; a key that is already configured keeps its first projection.
    pub fn insert(&mut self, namespace_id: u64, module_id: u64, fields: Vec<String>) {
        let mut seen = HashSet::new();
        let fields: Vec<String> = fields
            .into_iter()
            .filter(|f| seen.insert(f.clone()))
            .collect();
        if fields.is_empty() {
            return;
        }

        self.entries
            .entry(projection_key(namespace_id, module_id))
            .or_insert(fields);
    }

    pub fn get(&self, namespace_id: u64, module_id: u64) -> Option<&[String]> {
        self.entries
            .get(&projection_key(namespace_id, module_id))
            .map(Vec::as_slice)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Display labels for facet entries: namespace name → slug, module name → handle.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FacetLabels {
    pub namespaces: HashMap<String, String>,
    pub modules: HashMap<String, String>,
}

/// A metadata lookup that failed and was skipped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MetadataFailure {
    /// What was being fetched, e.g. `namespaces` or `namespace 12 modules`.
    pub scope: String,
    pub error: MetadataError,
}

impl fmt::Display for MetadataFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.scope, self.error)
    }
}

/// Everything fetched from the content API for one search request.
#[derive(Debug, Clone, Default)]
pub struct ContentMetadata {
    pub projections: ProjectionIndex,
    pub labels: FacetLabels,
    pub failures: Vec<MetadataFailure>,
}

/// Lists namespaces, then every namespace's modules concurrently, and collects
/// projections and labels. Failures are logged and recorded; whatever could be
/// fetched is still returned.
pub async fn fetch_metadata(api: &dyn ContentApi, caller: Option<&str>) -> ContentMetadata {
    let mut metadata = ContentMetadata::default();

    let namespaces = match api.namespaces(caller).await {
        Ok(namespaces) => namespaces,
        Err(error) => {
            tracing::error!("Failed to list namespaces: {}", error);
            metadata.failures.push(MetadataFailure {
                scope: "namespaces".to_string(),
                error,
            });
            return metadata;
        }
    };

    for ns in &namespaces {
        metadata
            .labels
            .namespaces
            .insert(ns.name.clone(), ns.slug.clone());
    }

    let listings = join_all(
        namespaces
            .iter()
            .map(|ns| async move { (ns.namespace_id, api.modules(ns.namespace_id, caller).await) }),
    )
    .await;

    for (namespace_id, listing) in listings {
        match listing {
            Ok(modules) => collect_modules(&mut metadata, namespace_id, &modules),
            Err(error) => {
                tracing::error!("Failed to list modules of namespace {}: {}", namespace_id, error);
                metadata.failures.push(MetadataFailure {
                    scope: format!("namespace {} modules", namespace_id),
                    error,
                });
            }
        }
    }

    tracing::debug!(
        namespaces = namespaces.len(),
        projections = metadata.projections.len(),
        failures = metadata.failures.len(),
        "content metadata fetched"
    );

    metadata
}

fn collect_modules(metadata: &mut ContentMetadata, namespace_id: u64, modules: &[ModuleRecord]) {
    for module in modules {
        metadata
            .labels
            .modules
            .insert(module.name.clone(), module.handle.clone());

        match module.private_fields() {
            Ok(Some(fields)) => metadata
                .projections
                .insert(namespace_id, module.module_id, fields),
            Ok(None) => {}
            Err(error) => {
                tracing::warn!("Failed to read meta of module {}: {}", module.module_id, error);
                metadata.failures.push(MetadataFailure {
                    scope: format!("module {} meta", module.module_id),
                    error,
                });
            }
        }
    }
}
