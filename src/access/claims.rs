use super::scope::Claims;

use axum::async_trait;
use axum::extract::{FromRef, FromRequestParts};
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use std::convert::Infallible;
use std::sync::Arc;

/// Verifies bearer tokens issued by the content server.
///
/// Without a secret nothing can be verified and every request is anonymous.
#[derive(Clone)]
pub struct ClaimsVerifier {
    key: Option<DecodingKey>,
    validation: Validation,
}

impl ClaimsVerifier {
    pub fn new(secret: Option<&[u8]>) -> Self {
        Self::with_algorithm(secret, Algorithm::HS512)
    }

    pub fn with_algorithm(secret: Option<&[u8]>, algorithm: Algorithm) -> Self {
        let mut validation = Validation::new(algorithm);
        validation.validate_aud = false;

        Self {
            key: secret.map(DecodingKey::from_secret),
            validation,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.key.is_some()
    }

    /// Returns the token's claims, or `None` when the token cannot be verified.
    pub fn verify(&self, token: &str) -> Option<Claims> {
        let key = self.key.as_ref()?;
        match decode::<Claims>(token, key, &self.validation) {
            Ok(data) => Some(data.claims),
            Err(e) => {
                tracing::debug!("Rejected bearer token: {}", e);
                None
            }
        }
    }
}

/// Claims attached to the current request, if any.
///
/// The raw token is kept only when it verified, so it can be forwarded to the
/// content API on behalf of the caller.
#[derive(Debug, Clone, Default)]
pub struct RequestClaims {
    pub claims: Option<Claims>,
    pub token: Option<String>,
}

impl RequestClaims {
    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn from_header(verifier: &ClaimsVerifier, header: Option<&str>) -> Self {
        let Some(token) = header.and_then(|h| h.strip_prefix("Bearer ")).map(str::trim) else {
            return Self::anonymous();
        };

        match verifier.verify(token) {
            Some(claims) => Self {
                claims: Some(claims),
                token: Some(token.to_string()),
            },
            None => Self::anonymous(),
        }
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for RequestClaims
where
    Arc<ClaimsVerifier>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let verifier = Arc::<ClaimsVerifier>::from_ref(state);
        let header = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok());

        Ok(RequestClaims::from_header(&verifier, header))
    }
}
