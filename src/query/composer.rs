use super::types::*;
use crate::access::AccessScope;
use crate::config::Profile;
use crate::config::profile::PRIVATE_INDEX_PREFIX;

/// Composes the primary query: text, security filters and the client's facet
/// selections.
pub fn compose(request: &SearchRequest, scope: &AccessScope, profile: &Profile) -> BackendQuery {
    let mut query = compose_scoped(&request.query, scope, profile);

    if !request.namespace_facets.is_empty() {
        query.filter.push(Clause::terms(
            FIELD_NAMESPACE_NAME,
            request.namespace_facets.clone(),
        ));
    }
    if !request.module_facets.is_empty() {
        query
            .filter
            .push(Clause::terms(FIELD_MODULE_NAME, request.module_facets.clone()));
    }

    query
}

/// Composes the facet-only query issued alongside a text search. Facet selections are
/// left out so the facet lists show every option for the text.
pub fn compose_facet_query(
    request: &SearchRequest,
    scope: &AccessScope,
    profile: &Profile,
) -> BackendQuery {
    compose_scoped(&request.query, scope, profile)
}

/// Composes the namespace-facet query: no text, no selections, only security.
pub fn compose_namespace_facet_query(scope: &AccessScope, profile: &Profile) -> BackendQuery {
    compose_scoped("", scope, profile)
}

fn compose_scoped(text: &str, scope: &AccessScope, profile: &Profile) -> BackendQuery {
    let index_prefix = if scope.is_anonymous() {
        profile.anonymous_index.prefix()
    } else {
        PRIVATE_INDEX_PREFIX
    };

    let mut query = BackendQuery {
        text: text.to_string(),
        index_prefix: index_prefix.to_string(),
        must: vec![Clause::IndexPrefix(index_prefix.to_string())],
        filter: Vec::new(),
        must_not: Vec::new(),
        aggregations: vec![TermsAggregation::resource_tree()],
    };

    if !text.trim().is_empty() {
        query.must.push(Clause::SimpleQueryString(text.to_string()));
    }

    if !scope.is_anonymous() {
        // documents must allow at least one of the roles and deny none of them
        query
            .filter
            .push(Clause::terms(FIELD_ALLOWED_ROLES, scope.role_list()));
        query
            .must_not
            .push(Clause::terms(FIELD_DENIED_ROLES, scope.role_list()));
    }

    query
}
