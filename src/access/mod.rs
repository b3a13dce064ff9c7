//! Access Scoping Module
//!
//! Turns the claims carried by an inbound request into the [`AccessScope`] used to
//! restrict what the search backend may return.
//!
//! ## Overview
//! Authentication is never enforced here: a missing, malformed or unverifiable token
//! simply produces an anonymous scope. The document-level security filter built from
//! the scope (see `query::composer`) is what keeps private documents private.
//!
//! ## Submodules
//! - **`scope`**: `Claims` and the pure claim → `AccessScope` derivation.
//! - **`claims`**: The axum extractor that verifies a bearer JWT and exposes its claims.

pub mod claims;
pub mod scope;

pub use claims::{ClaimsVerifier, RequestClaims};
pub use scope::{AccessScope, Claims};
