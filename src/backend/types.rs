use crate::query::types::AGG_RESOURCE;

use serde::Deserialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/// Decoded `_search` response envelope.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub took: u64,
    #[serde(default)]
    pub timed_out: bool,
    #[serde(default)]
    pub hits: HitsEnvelope,
    #[serde(default)]
    pub aggregations: BTreeMap<String, BucketList>,
}

impl SearchResponse {
    /// Buckets of the top-level resource-type aggregation.
    pub fn resource_buckets(&self) -> &[BucketNode] {
        self.aggregations
            .get(AGG_RESOURCE)
            .map(|list| list.buckets.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct HitsEnvelope {
    #[serde(default)]
    pub total: HitsTotal,
    #[serde(default)]
    pub hits: Vec<RawHit>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct HitsTotal {
    #[serde(default)]
    pub value: u64,
    /// `eq` or `gte`.
    #[serde(default = "default_relation")]
    pub relation: String,
}

fn default_relation() -> String {
    "eq".to_string()
}

impl Default for HitsTotal {
    fn default() -> Self {
        Self {
            value: 0,
            relation: default_relation(),
        }
    }
}

/// A single matched document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawHit {
    #[serde(rename = "_index", default)]
    pub index: String,
    #[serde(rename = "_id", default)]
    pub id: String,
    #[serde(rename = "_source", default)]
    pub source: Value,
}

impl RawHit {
    pub fn from_source(source: Value) -> Self {
        Self {
            source,
            ..Self::default()
        }
    }

    pub fn resource_type(&self) -> Option<&str> {
        self.source.get("resourceType").and_then(Value::as_str)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct BucketList {
    #[serde(default)]
    pub buckets: Vec<BucketNode>,
}

/// One terms-aggregation bucket and its named sub-aggregations.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(try_from = "RawBucket")]
pub struct BucketNode {
    pub key: String,
    pub doc_count: u64,
    pub children: BTreeMap<String, Vec<BucketNode>>,
}

impl BucketNode {
    pub fn new(key: impl Into<String>, doc_count: u64) -> Self {
        Self {
            key: key.into(),
            doc_count,
            children: BTreeMap::new(),
        }
    }

    pub fn with_children(mut self, name: &str, buckets: Vec<BucketNode>) -> Self {
        self.children.insert(name.to_string(), buckets);
        self
    }

    pub fn children(&self, name: &str) -> &[BucketNode] {
        self.children.get(name).map(Vec::as_slice).unwrap_or(&[])
    }
}

#[derive(Deserialize)]
struct RawBucket {
    key: Value,
    #[serde(default)]
    doc_count: u64,
    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl TryFrom<RawBucket> for BucketNode {
    type Error = String;

    fn try_from(raw: RawBucket) -> Result<Self, Self::Error> {
        let key = match raw.key {
            Value::String(s) => s,
            other => other.to_string(),
        };

        let mut children = BTreeMap::new();
        for (name, value) in raw.rest {
            // sub-aggregations are the objects carrying a bucket list
            let Some(Value::Array(items)) = value.get("buckets") else {
                continue;
            };
            let buckets = items
                .iter()
                .map(|item| BucketNode::deserialize(item).map_err(|e| e.to_string()))
                .collect::<Result<Vec<_>, _>>()?;
            children.insert(name, buckets);
        }

        Ok(Self {
            key,
            doc_count: raw.doc_count,
            children,
        })
    }
}
