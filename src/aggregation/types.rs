use serde::Serialize;

/// Facet over one tracked resource category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetSummary {
    /// Resource type the facet lists, e.g. `compose:namespace`.
    pub resource: String,
    /// Display name of the category, e.g. `Namespace`.
    pub name: String,
    /// Sum of all entry hits.
    pub hits: u64,
    /// Entries sorted by name.
    pub resource_name: Vec<FacetEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FacetEntry {
    pub name: String,
    pub label: String,
    pub hits: u64,
}
