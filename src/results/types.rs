use crate::aggregation::FacetSummary;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Resource types the gateway knows how to normalize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    User,
    Record,
    Namespace,
    Module,
}

impl ResourceKind {
    pub fn parse(resource_type: &str) -> Option<Self> {
        match resource_type {
            "system:user" => Some(ResourceKind::User),
            "compose:record" => Some(ResourceKind::Record),
            "compose:namespace" => Some(ResourceKind::Namespace),
            "compose:module" => Some(ResourceKind::Module),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ResourceKind::User => "system:user",
            ResourceKind::Record => "compose:record",
            ResourceKind::Namespace => "compose:namespace",
            ResourceKind::Module => "compose:module",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ResourceKind::User => "User",
            ResourceKind::Record => "Record",
            ResourceKind::Namespace => "Namespace",
            ResourceKind::Module => "Module",
        }
    }
}

/// The response document returned to search clients.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedResult {
    pub total: ResultTotal,
    pub hits: Vec<NormalizedHit>,
    /// Number of hits actually returned.
    pub total_hits: usize,
    pub aggregations: Vec<FacetSummary>,
    /// Sources that failed while building this result.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub degraded: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResultTotal {
    pub value: u64,
    /// `eq` or `gte`.
    pub op: String,
}

impl Default for ResultTotal {
    fn default() -> Self {
        Self {
            value: 0,
            op: "eq".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NormalizedHit {
    #[serde(rename = "type")]
    pub resource_type: String,
    pub value: Map<String, Value>,
}

/// One exposed record value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RecordValue {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub value: Value,
}

/// The parts of an indexed record the transformer needs.
///
/// Every field tolerates both a missing key and an explicit `null`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RecordDocument {
    #[serde(default, deserialize_with = "null_as_default")]
    pub module: ModuleRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub namespace: NamespaceRef,
    #[serde(default, deserialize_with = "null_as_default")]
    pub values: Map<String, Value>,
    #[serde(rename = "valueLabels", default, deserialize_with = "null_as_default")]
    pub value_labels: Map<String, Value>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleRef {
    #[serde(
        rename = "moduleId",
        default,
        deserialize_with = "crate::content::types::id_from_string_or_number"
    )]
    pub module_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub handle: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NamespaceRef {
    #[serde(
        rename = "namespaceId",
        default,
        deserialize_with = "crate::content::types::id_from_string_or_number"
    )]
    pub namespace_id: u64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub handle: String,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}
