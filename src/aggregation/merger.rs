use super::types::{FacetEntry, FacetSummary};
use crate::backend::{BucketNode, SearchResponse};
use crate::content::FacetLabels;
use crate::query::types::{AGG_MODULES, AGG_NAMESPACES, AGG_RESOURCE_NAME};
use crate::results::ResourceKind;

use std::collections::{BTreeMap, HashMap};

/// Builds the facet-bearing bucket tree from whichever responses are available.
///
/// The facet-only response is preferred over the primary one. When the
/// namespace-facet response is present it is authoritative for every `namespaces`
/// sub-tree: matching buckets get its sub-tree, buckets it does not know lose theirs,
/// and resource types only it returned are grafted with just their namespaces.
pub fn merge_trees(
    primary: Option<&SearchResponse>,
    facet: Option<&SearchResponse>,
    namespace_facet: Option<&SearchResponse>,
) -> Vec<BucketNode> {
    let mut tree: Vec<BucketNode> = facet
        .or(primary)
        .map(|response| response.resource_buckets().to_vec())
        .unwrap_or_default();

    let Some(namespace_facet) = namespace_facet else {
        return tree;
    };

    let grafts: HashMap<&str, &BucketNode> = namespace_facet
        .resource_buckets()
        .iter()
        .map(|bucket| (bucket.key.as_str(), bucket))
        .collect();

    for bucket in tree.iter_mut() {
        match grafts.get(bucket.key.as_str()) {
            Some(source) => {
                bucket.children.insert(
                    AGG_NAMESPACES.to_string(),
                    source.children(AGG_NAMESPACES).to_vec(),
                );
            }
            None => {
                bucket.children.remove(AGG_NAMESPACES);
            }
        }
    }

    for source in namespace_facet.resource_buckets() {
        if tree.iter().any(|bucket| bucket.key == source.key) {
            continue;
        }
        tree.push(
            BucketNode::new(source.key.clone(), source.doc_count)
                .with_children(AGG_NAMESPACES, source.children(AGG_NAMESPACES).to_vec()),
        );
    }

    tree
}

/// Tallies namespace and module hits across the merged tree.
///
/// Every sub-aggregation counts disjoint documents, so a name's contributions from
/// different buckets are summed. The user bucket is never part of the facets.
pub fn summarize(tree: &[BucketNode], labels: &FacetLabels) -> Vec<FacetSummary> {
    let mut namespaces: BTreeMap<String, u64> = BTreeMap::new();
    let mut modules: BTreeMap<String, u64> = BTreeMap::new();

    for bucket in tree {
        let kind = ResourceKind::parse(&bucket.key);
        if kind == Some(ResourceKind::User) {
            continue;
        }

        let own_names = match kind {
            Some(ResourceKind::Namespace) => Some(&mut namespaces),
            Some(ResourceKind::Module) => Some(&mut modules),
            _ => None,
        };
        if let Some(tally) = own_names {
            add_buckets(tally, bucket.children(AGG_RESOURCE_NAME));
        }

        add_buckets(&mut namespaces, bucket.children(AGG_NAMESPACES));
        add_buckets(&mut modules, bucket.children(AGG_MODULES));
    }

    vec![
        facet(ResourceKind::Namespace, namespaces, &labels.namespaces),
        facet(ResourceKind::Module, modules, &labels.modules),
    ]
}

fn add_buckets(tally: &mut BTreeMap<String, u64>, buckets: &[BucketNode]) {
    for bucket in buckets {
        *tally.entry(bucket.key.clone()).or_insert(0) += bucket.doc_count;
    }
}

fn facet(
    kind: ResourceKind,
    tally: BTreeMap<String, u64>,
    labels: &HashMap<String, String>,
) -> FacetSummary {
    // BTreeMap iteration keeps entries sorted by name
    let resource_name: Vec<FacetEntry> = tally
        .into_iter()
        .map(|(name, hits)| FacetEntry {
            label: labels.get(&name).cloned().unwrap_or_default(),
            name,
            hits,
        })
        .collect();

    FacetSummary {
        resource: kind.as_str().to_string(),
        name: kind.display_name().to_string(),
        hits: resource_name.iter().map(|e| e.hits).sum(),
        resource_name,
    }
}
