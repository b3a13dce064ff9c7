use super::profile::{DEFAULT_FALLBACK_FIELDS, Profile};

use anyhow::{Context, Result, bail};
use std::net::SocketAddr;
use std::time::Duration;

pub const ENV_HTTP_ADDR: &str = "HTTP_ADDR";
pub const ENV_ES_ADDRESS: &str = "ES_ADDRESS";
pub const ENV_BASE_URL: &str = "CORTEZA_SERVER_BASE_URL";
pub const ENV_API_URL: &str = "CORTEZA_SERVER_API_URL";
pub const ENV_AUTH_URL: &str = "CORTEZA_SERVER_AUTH_URL";
pub const ENV_JWT_SECRET: &str = "CORTEZA_SERVER_JWT_SECRET";
pub const ENV_CLIENT_KEY: &str = "CORTEZA_SERVER_CLIENT_KEY";
pub const ENV_CLIENT_SECRET: &str = "CORTEZA_SERVER_CLIENT_SECRET";
pub const ENV_REQUEST_TIMEOUT_MS: &str = "REQUEST_TIMEOUT_MS";
pub const ENV_ANONYMOUS_INDEX: &str = "DISCOVERY_ANONYMOUS_INDEX";
pub const ENV_VALUE_LABELS: &str = "DISCOVERY_VALUE_LABELS";
pub const ENV_FALLBACK_FIELDS: &str = "DISCOVERY_FALLBACK_FIELDS";
pub const ENV_ID_KEY: &str = "DISCOVERY_ID_KEY";

const DEFAULT_HTTP_ADDR: &str = "127.0.0.1:3101";
const DEFAULT_ES_ADDRESS: &str = "http://localhost:9200";
const DEFAULT_BASE_URL: &str = "http://server:80";
const DEFAULT_REQUEST_TIMEOUT_MS: u64 = 30_000;

/// Runtime settings of the gateway process.
#[derive(Debug, Clone)]
pub struct Config {
    pub http_addr: SocketAddr,
    /// Search backend addresses; requests go to the first one.
    pub es_addresses: Vec<String>,
    pub api_url: String,
    pub auth_url: String,
    pub jwt_secret: Option<Vec<u8>>,
    pub client_key: String,
    pub client_secret: String,
    pub request_timeout: Duration,
    pub profile: Profile,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let base_url = get(ENV_BASE_URL).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url = base_url.trim_end_matches('/').to_string();

        let http_addr = get(ENV_HTTP_ADDR)
            .unwrap_or_else(|| DEFAULT_HTTP_ADDR.to_string())
            .parse()
            .with_context(|| format!("invalid {}", ENV_HTTP_ADDR))?;

        let es_addresses: Vec<String> = get(ENV_ES_ADDRESS)
            .unwrap_or_else(|| DEFAULT_ES_ADDRESS.to_string())
            .split_whitespace()
            .map(|a| a.trim_end_matches('/').to_string())
            .collect();
        if es_addresses.is_empty() {
            bail!("no search backend address configured ({})", ENV_ES_ADDRESS);
        }

        let api_url = get(ENV_API_URL).unwrap_or_else(|| format!("{}/api", base_url));
        let auth_url = get(ENV_AUTH_URL).unwrap_or_else(|| format!("{}/auth", base_url));

        let client_key = get(ENV_CLIENT_KEY)
            .with_context(|| format!("client key ({}) is empty or missing", ENV_CLIENT_KEY))?;
        let client_secret = get(ENV_CLIENT_SECRET).with_context(|| {
            format!("client secret ({}) is empty or missing", ENV_CLIENT_SECRET)
        })?;

        let request_timeout = match get(ENV_REQUEST_TIMEOUT_MS) {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("invalid {}", ENV_REQUEST_TIMEOUT_MS))?,
            None => DEFAULT_REQUEST_TIMEOUT_MS,
        };
        if request_timeout == 0 {
            bail!("{} must be greater than zero", ENV_REQUEST_TIMEOUT_MS);
        }

        let mut profile = Profile::default();
        if let Some(raw) = get(ENV_ANONYMOUS_INDEX) {
            profile.anonymous_index = raw.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(raw) = get(ENV_VALUE_LABELS) {
            profile.value_labels = raw.parse().map_err(anyhow::Error::msg)?;
        }
        if let Some(raw) = get(ENV_FALLBACK_FIELDS) {
            let fields: usize = raw
                .trim()
                .parse()
                .with_context(|| format!("invalid {}", ENV_FALLBACK_FIELDS))?;
            profile.fallback_fields = if fields == 0 {
                DEFAULT_FALLBACK_FIELDS
            } else {
                fields
            };
        }
        if let Some(raw) = get(ENV_ID_KEY) {
            profile.identifier_key = raw.parse().map_err(anyhow::Error::msg)?;
        }

        Ok(Self {
            http_addr,
            es_addresses,
            api_url: api_url.trim_end_matches('/').to_string(),
            auth_url: auth_url.trim_end_matches('/').to_string(),
            jwt_secret: get(ENV_JWT_SECRET).map(String::into_bytes),
            client_key,
            client_secret,
            request_timeout: Duration::from_millis(request_timeout),
            profile,
        })
    }

    pub fn es_address(&self) -> &str {
        // from_lookup guarantees at least one address
        &self.es_addresses[0]
    }
}
