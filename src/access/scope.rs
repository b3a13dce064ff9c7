use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::collections::BTreeSet;

/// Claim holding the principal identifier.
pub const CLAIM_SUBJECT: &str = "sub";
/// Claim holding the space-delimited role identifiers.
pub const CLAIM_ROLES: &str = "roles";

/// Verified token claims, kept as an open JSON object.
///
/// Only string-typed `sub` and `roles` values are honoured; other shapes are ignored
/// rather than rejected.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Claims(pub Map<String, Value>);

impl Claims {
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.0.get(name).and_then(Value::as_str)
    }
}

/// Identity and authorization scope of the requester.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccessScope {
    /// `0` means anonymous.
    pub principal_id: u64,
    pub roles: BTreeSet<String>,
}

impl AccessScope {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// Derives the scope from optional claims. Never fails: anything unparseable
    /// degrades to the anonymous principal or an empty role set.
    pub fn from_claims(claims: Option<&Claims>) -> Self {
        let Some(claims) = claims else {
            return Self::anonymous();
        };

        let principal_id = claims
            .get_str(CLAIM_SUBJECT)
            .and_then(|sub| sub.trim().parse::<u64>().ok())
            .unwrap_or(0);

        let roles = claims
            .get_str(CLAIM_ROLES)
            .map(|roles| roles.split_whitespace().map(str::to_string).collect())
            .unwrap_or_default();

        Self {
            principal_id,
            roles,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        self.principal_id == 0
    }

    pub fn role_list(&self) -> Vec<String> {
        self.roles.iter().cloned().collect()
    }
}
