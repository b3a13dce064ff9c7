use serde::{Serialize, Serializer};
use serde_json::{Map, Value, json};

/// Result size used when the client does not ask for one.
pub const DEFAULT_RESULT_SIZE: usize = 999;
/// Bucket cap of every terms aggregation.
pub const AGGREGATION_BUCKET_CAP: usize = 999;

pub const AGG_RESOURCE: &str = "resource";
pub const AGG_RESOURCE_NAME: &str = "resourceName";
pub const AGG_MODULES: &str = "modules";
pub const AGG_NAMESPACES: &str = "namespaces";

pub const FIELD_RESOURCE_TYPE: &str = "resourceType.keyword";
pub const FIELD_RESOURCE_NAME: &str = "name.keyword";
pub const FIELD_MODULE_NAME: &str = "module.name.keyword";
pub const FIELD_NAMESPACE_NAME: &str = "namespace.name.keyword";
pub const FIELD_ALLOWED_ROLES: &str = "security.allowedRoles";
pub const FIELD_DENIED_ROLES: &str = "security.deniedRoles";

pub const PARAM_QUERY: &str = "q";
pub const PARAM_SIZE: &str = "size";
pub const PARAM_DUMP: &str = "dump";
pub const PARAM_MODULE_AGGS: &str = "moduleAggs";
pub const PARAM_NAMESPACE_AGGS: &str = "namespaceAggs";

/// A search as requested by an HTTP client.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchRequest {
    pub query: String,
    /// `0` means "backend default".
    pub size: usize,
    pub namespace_facets: Vec<String>,
    pub module_facets: Vec<String>,
    pub dump_raw: bool,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            ..Self::default()
        }
    }

    /// Builds a request from decoded query-string pairs. Repeated `moduleAggs` and
    /// `namespaceAggs` are collected in order; an unparseable `size` counts as unset.
    pub fn from_params(params: &[(String, String)]) -> Self {
        let mut req = Self::default();

        for (key, value) in params {
            match key.as_str() {
                PARAM_QUERY => req.query = value.clone(),
                PARAM_SIZE => req.size = value.trim().parse().unwrap_or(0),
                PARAM_DUMP => req.dump_raw = !value.is_empty(),
                PARAM_MODULE_AGGS if !value.is_empty() => req.module_facets.push(value.clone()),
                PARAM_NAMESPACE_AGGS if !value.is_empty() => {
                    req.namespace_facets.push(value.clone())
                }
                _ => {}
            }
        }

        req
    }

    pub fn has_text(&self) -> bool {
        !self.query.trim().is_empty()
    }

    /// True when the client sent neither text nor facet selections; only facets are
    /// returned in that case.
    pub fn no_hits(&self) -> bool {
        !self.has_text() && self.module_facets.is_empty() && self.namespace_facets.is_empty()
    }

    pub fn effective_size(&self) -> usize {
        if self.size == 0 {
            DEFAULT_RESULT_SIZE
        } else {
            self.size
        }
    }
}

/// One clause of the backend `bool` query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Clause {
    /// Restricts matches to indexes whose name starts with the prefix.
    IndexPrefix(String),
    SimpleQueryString(String),
    Terms { field: String, values: Vec<String> },
}

impl Clause {
    pub fn terms(field: &str, values: Vec<String>) -> Self {
        Clause::Terms {
            field: field.to_string(),
            values,
        }
    }

    pub fn to_json(&self) -> Value {
        match self {
            Clause::IndexPrefix(prefix) => json!({"prefix": {"_index": {"value": prefix}}}),
            Clause::SimpleQueryString(query) => json!({"simple_query_string": {"query": query}}),
            Clause::Terms { field, values } => {
                let mut inner = Map::new();
                inner.insert(field.clone(), json!(values));
                json!({ "terms": inner })
            }
        }
    }
}

impl Serialize for Clause {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_json().serialize(serializer)
    }
}

/// A named terms aggregation with optional nested aggregations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TermsAggregation {
    pub name: String,
    pub field: String,
    pub size: usize,
    pub children: Vec<TermsAggregation>,
}

impl TermsAggregation {
    pub fn new(name: &str, field: &str) -> Self {
        Self {
            name: name.to_string(),
            field: field.to_string(),
            size: AGGREGATION_BUCKET_CAP,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: TermsAggregation) -> Self {
        self.children.push(child);
        self
    }

    /// The aggregation body, without its name.
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        body.insert(
            "terms".to_string(),
            json!({"field": self.field, "size": self.size}),
        );
        if !self.children.is_empty() {
            body.insert("aggs".to_string(), aggregations_json(&self.children));
        }
        Value::Object(body)
    }

    /// The fixed resource-type tree attached to every query.
    pub fn resource_tree() -> Self {
        TermsAggregation::new(AGG_RESOURCE, FIELD_RESOURCE_TYPE)
            .with_child(TermsAggregation::new(AGG_RESOURCE_NAME, FIELD_RESOURCE_NAME))
            .with_child(TermsAggregation::new(AGG_MODULES, FIELD_MODULE_NAME))
            .with_child(TermsAggregation::new(AGG_NAMESPACES, FIELD_NAMESPACE_NAME))
    }
}

fn aggregations_json(aggs: &[TermsAggregation]) -> Value {
    let mut map = Map::new();
    for agg in aggs {
        map.insert(agg.name.clone(), agg.to_json());
    }
    Value::Object(map)
}

/// A fully composed backend search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendQuery {
    /// Free text as sent by the client, kept for logging.
    pub text: String,
    pub index_prefix: String,
    pub must: Vec<Clause>,
    pub filter: Vec<Clause>,
    pub must_not: Vec<Clause>,
    pub aggregations: Vec<TermsAggregation>,
}

impl BackendQuery {
    /// Encodes the query as a `_search` request body.
    pub fn to_body(&self) -> Value {
        let mut bool_query = Map::new();
        bool_query.insert("must".to_string(), json!(self.must));
        if !self.filter.is_empty() {
            bool_query.insert("filter".to_string(), json!(self.filter));
        }
        if !self.must_not.is_empty() {
            bool_query.insert("must_not".to_string(), json!(self.must_not));
        }

        let mut body = Map::new();
        body.insert("query".to_string(), json!({ "bool": bool_query }));
        if !self.aggregations.is_empty() {
            body.insert("aggs".to_string(), aggregations_json(&self.aggregations));
        }
        Value::Object(body)
    }
}
