use super::types::{
    NormalizedHit, NormalizedResult, RecordDocument, RecordValue, ResourceKind, ResultTotal,
};
use crate::aggregation::summarize;
use crate::backend::{BucketNode, RawHit, SearchResponse};
use crate::config::{IdentifierKey, Profile, ValueLabels};
use crate::content::{ContentMetadata, ProjectionIndex};

use serde_json::{Map, Value};

/// Builds the client response from the primary hits and the merged facet tree.
///
/// A missing primary response (failed or skipped) yields an empty `eq` total with no
/// hits; facets are still computed from whatever tree could be merged.
pub fn transform(
    primary: Option<&SearchResponse>,
    tree: &[BucketNode],
    metadata: &ContentMetadata,
    no_hits: bool,
    profile: &Profile,
) -> NormalizedResult {
    let total = primary
        .map(|response| ResultTotal {
            value: response.hits.total.value,
            op: response.hits.total.relation.clone(),
        })
        .unwrap_or_default();

    let mut hits = Vec::new();
    if !no_hits {
        if let Some(response) = primary {
            hits = response
                .hits
                .hits
                .iter()
                .filter_map(|hit| normalize_hit(hit, &metadata.projections, profile))
                .collect();
        }
    }

    NormalizedResult {
        total,
        total_hits: hits.len(),
        hits,
        aggregations: summarize(tree, &metadata.labels),
        degraded: Vec::new(),
    }
}

/// Reshapes one hit by resource type. Unknown types and malformed documents yield `None`.
pub fn normalize_hit(
    hit: &RawHit,
    projections: &ProjectionIndex,
    profile: &Profile,
) -> Option<NormalizedHit> {
    let Value::Object(mut doc) = hit.source.clone() else {
        tracing::debug!(id = %hit.id, "Dropping hit without an object source");
        return None;
    };

    let resource_type = match doc.remove("resourceType") {
        Some(Value::String(resource_type)) => resource_type,
        _ => return None,
    };
    let Some(kind) = ResourceKind::parse(&resource_type) else {
        tracing::debug!(id = %hit.id, resource_type = %resource_type, "Dropping hit of unknown type");
        return None;
    };

    let key = profile.identifier_key;
    match kind {
        ResourceKind::User => promote_identifier(&mut doc, "userID", &hit.id, key),
        ResourceKind::Record => {
            let record: RecordDocument = match serde_json::from_value(Value::Object(doc.clone())) {
                Ok(record) => record,
                Err(e) => {
                    tracing::warn!(id = %hit.id, "Dropping undecodable record: {}", e);
                    return None;
                }
            };
            let (values, custom_values) = expose_values(&record, projections, profile);
            doc.insert("values".to_string(), Value::Array(values));
            doc.insert("customValues".to_string(), Value::Object(custom_values));
            doc.remove("valueLabels");
            promote_identifier(&mut doc, "_id", &hit.id, key);
        }
        ResourceKind::Namespace | ResourceKind::Module => {
            promote_identifier(&mut doc, "_id", &hit.id, key)
        }
    }

    Some(NormalizedHit {
        resource_type,
        value: doc,
    })
}

/// Moves the identifier stored under `from` to the configured key. Documents that
/// lack it get the hit's `_id`.
fn promote_identifier(doc: &mut Map<String, Value>, from: &str, hit_id: &str, key: IdentifierKey) {
    let id = match doc.remove(from) {
        Some(id) => id,
        None if !hit_id.is_empty() => Value::String(hit_id.to_string()),
        None => Value::Null,
    };
    doc.insert(key.as_str().to_string(), id);
}

/// Selects the record values to expose: the module's projection in order, or the
/// first `fallback_fields` stored values when none is configured.
fn expose_values(
    record: &RecordDocument,
    projections: &ProjectionIndex,
    profile: &Profile,
) -> (Vec<Value>, Map<String, Value>) {
    let exposed: Vec<(&str, Value)> = match projections.get(
        record.namespace.namespace_id,
        record.module.module_id,
    ) {
        Some(fields) => fields
            .iter()
            .map(|name| {
                let value = record.values.get(name).cloned().unwrap_or(Value::Null);
                (name.as_str(), value)
            })
            .collect(),
        None => record
            .values
            .iter()
            .take(profile.fallback_fields)
            .map(|(name, value)| (name.as_str(), value.clone()))
            .collect(),
    };

    let mut custom_values = Map::new();
    let mut values = Vec::with_capacity(exposed.len());
    for (name, value) in exposed {
        if let Some(first) = value.as_array().and_then(|items| items.first()) {
            custom_values.insert(name.to_string(), first.clone());
        }

        let label = match profile.value_labels {
            ValueLabels::Include => Some(label_of(record, name)),
            ValueLabels::Omit => None,
        };
        let entry = RecordValue {
            name: name.to_string(),
            label,
            value,
        };
        match serde_json::to_value(entry) {
            Ok(entry) => values.push(entry),
            Err(e) => tracing::warn!("Failed to encode record value {}: {}", name, e),
        }
    }

    (values, custom_values)
}

fn label_of(record: &RecordDocument, name: &str) -> String {
    match record.value_labels.get(name) {
        Some(Value::String(label)) => label.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}
