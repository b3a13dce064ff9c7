use super::error::MetadataError;
use super::types::{ModuleRecord, NamespaceRecord, SetEnvelope};

use async_trait::async_trait;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Tokens are refreshed this long before they expire.
const TOKEN_EXPIRY_MARGIN: Duration = Duration::from_secs(30);

/// Read access to namespace and module listings of the content server.
///
/// `caller` is the requester's verified bearer token; when absent the implementation
/// falls back to its own service credentials.
#[async_trait]
pub trait ContentApi: Send + Sync {
    async fn namespaces(&self, caller: Option<&str>)
    -> Result<Vec<NamespaceRecord>, MetadataError>;

    async fn modules(
        &self,
        namespace_id: u64,
        caller: Option<&str>,
    ) -> Result<Vec<ModuleRecord>, MetadataError>;
}

struct CachedToken {
    value: String,
    expires_at: Instant,
}

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

/// reqwest client for the Corteza compose API, authenticated with OAuth2 client
/// credentials.
pub struct CortezaApiClient {
    http_client: reqwest::Client,
    api_url: String,
    auth_url: String,
    client_key: String,
    client_secret: String,
    token: Mutex<Option<CachedToken>>,
}

impl CortezaApiClient {
    pub fn new(
        api_url: &str,
        auth_url: &str,
        client_key: &str,
        client_secret: &str,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http_client,
            api_url: api_url.trim_end_matches('/').to_string(),
            auth_url: auth_url.trim_end_matches('/').to_string(),
            client_key: client_key.to_string(),
            client_secret: client_secret.to_string(),
            token: Mutex::new(None),
        })
    }

    async fn service_token(&self) -> Result<String, MetadataError> {
        let mut cached = self.token.lock().await;
        if let Some(token) = cached.as_ref() {
            if Instant::now() + TOKEN_EXPIRY_MARGIN < token.expires_at {
                return Ok(token.value.clone());
            }
        }

        let response = self
            .http_client
            .post(format!("{}/oauth2/token", self.auth_url))
            .basic_auth(&self.client_key, Some(&self.client_secret))
            .form(&[("grant_type", "client_credentials"), ("scope", "profile api")])
            .send()
            .await
            .map_err(|e| MetadataError::Auth(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MetadataError::Auth(format!(
                "token endpoint responded with {}",
                response.status()
            )));
        }

        let token: TokenResponse = response
            .json()
            .await
            .map_err(|e| MetadataError::Auth(e.to_string()))?;

        let lifetime = Duration::from_secs(token.expires_in.unwrap_or(3600));
        tracing::debug!("Obtained content api token valid for {:?}", lifetime);
        *cached = Some(CachedToken {
            value: token.access_token.clone(),
            expires_at: Instant::now() + lifetime,
        });

        Ok(token.access_token)
    }

    async fn get_set<T: DeserializeOwned>(
        &self,
        path: &str,
        caller: Option<&str>,
    ) -> Result<Vec<T>, MetadataError> {
        let token = match caller {
            Some(token) => token.to_string(),
            None => self.service_token().await?,
        };

        let response = self
            .http_client
            .get(format!("{}{}", self.api_url, path))
            .bearer_auth(token)
            .send()
            .await
            .map_err(|e| MetadataError::Transport(e.to_string()))?;

        if !response.status().is_success() {
            return Err(MetadataError::Status(response.status().as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| MetadataError::Transport(e.to_string()))?;
        let envelope: SetEnvelope<T> =
            serde_json::from_str(&body).map_err(|e| MetadataError::Decode(e.to_string()))?;

        Ok(envelope.response.set)
    }
}

#[async_trait]
impl ContentApi for CortezaApiClient {
    async fn namespaces(
        &self,
        caller: Option<&str>,
    ) -> Result<Vec<NamespaceRecord>, MetadataError> {
        self.get_set("/compose/namespace/", caller).await
    }

    async fn modules(
        &self,
        namespace_id: u64,
        caller: Option<&str>,
    ) -> Result<Vec<ModuleRecord>, MetadataError> {
        self.get_set(&format!("/compose/namespace/{}/module/", namespace_id), caller)
            .await
    }
}
