use std::str::FromStr;

/// Index prefix for documents restricted by role-based security.
pub const PRIVATE_INDEX_PREFIX: &str = "corteza-private-";
/// Index prefix for documents visible without authentication.
pub const PUBLIC_INDEX_PREFIX: &str = "corteza-public-";

/// Number of record values exposed when a module has no configured projection.
pub const DEFAULT_FALLBACK_FIELDS: usize = 5;
/// Wider fallback used by later releases of the discovery UI.
pub const EXTENDED_FALLBACK_FIELDS: usize = 7;

/// Which index prefix anonymous requests read.
///
/// Later releases read the private prefix for everyone (the public indexes were
/// never populated), which is why `Private` is the default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnonymousIndex {
    #[default]
    Private,
    Public,
}

impl AnonymousIndex {
    pub fn prefix(self) -> &'static str {
        match self {
            AnonymousIndex::Private => PRIVATE_INDEX_PREFIX,
            AnonymousIndex::Public => PUBLIC_INDEX_PREFIX,
        }
    }
}

impl FromStr for AnonymousIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "private" => Ok(AnonymousIndex::Private),
            "public" => Ok(AnonymousIndex::Public),
            other => Err(format!("unknown anonymous index policy: {}", other)),
        }
    }
}

/// Whether record values carry their display label next to the raw value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ValueLabels {
    #[default]
    Include,
    Omit,
}

impl FromStr for ValueLabels {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "include" => Ok(ValueLabels::Include),
            "false" | "0" | "omit" => Ok(ValueLabels::Omit),
            other => Err(format!("unknown value label setting: {}", other)),
        }
    }
}

/// Output key that receives a document's identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IdentifierKey {
    #[default]
    Id,
    /// JSON-LD style `@id`.
    JsonLd,
}

impl IdentifierKey {
    pub fn as_str(self) -> &'static str {
        match self {
            IdentifierKey::Id => "id",
            IdentifierKey::JsonLd => "@id",
        }
    }
}

impl FromStr for IdentifierKey {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "id" => Ok(IdentifierKey::Id),
            "@id" => Ok(IdentifierKey::JsonLd),
            other => Err(format!("unknown identifier key: {}", other)),
        }
    }
}

/// Behavior switches for query composition and result shaping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub anonymous_index: AnonymousIndex,
    pub value_labels: ValueLabels,
    pub fallback_fields: usize,
    pub identifier_key: IdentifierKey,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            anonymous_index: AnonymousIndex::default(),
            value_labels: ValueLabels::default(),
            fallback_fields: DEFAULT_FALLBACK_FIELDS,
            identifier_key: IdentifierKey::default(),
        }
    }
}

impl Profile {
    /// The behavior of the first public release: public index for anonymous readers,
    /// labelled values, five fallback fields and JSON-LD identifiers.
    pub fn legacy() -> Self {
        Self {
            anonymous_index: AnonymousIndex::Public,
            value_labels: ValueLabels::Include,
            fallback_fields: DEFAULT_FALLBACK_FIELDS,
            identifier_key: IdentifierKey::JsonLd,
        }
    }
}
