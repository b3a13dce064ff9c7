use super::error::MetadataError;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// `{"response": {"set": [...]}}` listing envelope of the content API.
#[derive(Debug, Clone, Deserialize)]
pub struct SetEnvelope<T> {
    #[serde(default = "SetBody::empty")]
    pub response: SetBody<T>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SetBody<T> {
    #[serde(default = "Vec::new")]
    pub set: Vec<T>,
}

impl<T> SetBody<T> {
    fn empty() -> Self {
        Self { set: Vec::new() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NamespaceRecord {
    #[serde(rename = "namespaceID", deserialize_with = "id_from_string_or_number")]
    pub namespace_id: u64,
    #[serde(default)]
    pub slug: String,
    #[serde(default)]
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ModuleRecord {
    #[serde(rename = "moduleID", deserialize_with = "id_from_string_or_number")]
    pub module_id: u64,
    #[serde(
        rename = "namespaceID",
        default,
        deserialize_with = "id_from_string_or_number"
    )]
    pub namespace_id: u64,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub name: String,
    /// Free-form module metadata; an object or a JSON-encoded string.
    #[serde(default)]
    pub meta: Value,
}

impl ModuleRecord {
    /// Fields listed in `discovery.private.result[0].fields`, if any.
    pub fn private_fields(&self) -> Result<Option<Vec<String>>, MetadataError> {
        let meta: ModuleMeta = match &self.meta {
            Value::Null => return Ok(None),
            Value::String(raw) if raw.trim().is_empty() => return Ok(None),
            Value::String(raw) => {
                serde_json::from_str(raw).map_err(|e| MetadataError::Decode(e.to_string()))?
            }
            other => ModuleMeta::deserialize(other)
                .map_err(|e| MetadataError::Decode(e.to_string()))?,
        };

        Ok(meta
            .discovery
            .private
            .result
            .into_iter()
            .next()
            .map(|r| r.fields)
            .filter(|fields| !fields.is_empty()))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ModuleMeta {
    #[serde(default)]
    pub discovery: DiscoveryMeta,
}

/// Field lists configured for the discovery UI; only the private scope is used.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryMeta {
    #[serde(default)]
    pub private: DiscoveryScope,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryScope {
    #[serde(default)]
    pub result: Vec<DiscoveryResult>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DiscoveryResult {
    #[serde(default)]
    pub fields: Vec<String>,
}

/// Accepts ids encoded either as JSON strings (the API default) or numbers. `null`
/// and the empty string decode as `0`.
pub fn id_from_string_or_number<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawId {
        Number(u64),
        Text(String),
    }

    match Option::<RawId>::deserialize(deserializer)? {
        None => Ok(0),
        Some(RawId::Number(n)) => Ok(n),
        Some(RawId::Text(s)) if s.is_empty() => Ok(0),
        Some(RawId::Text(s)) => s.parse().map_err(serde::de::Error::custom),
    }
}
