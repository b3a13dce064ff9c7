use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// A `_search` call as handed to the transport.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchCall {
    pub body: Value,
    pub size: usize,
    pub track_total_hits: bool,
    /// `_source` sub-trees the backend should leave out.
    pub source_excludes: Vec<String>,
    pub pretty: bool,
}

impl SearchCall {
    pub fn query_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("track_total_hits", self.track_total_hits.to_string()),
            ("size", self.size.to_string()),
        ];
        if !self.source_excludes.is_empty() {
            params.push(("_source_excludes", self.source_excludes.join(",")));
        }
        if self.pretty {
            params.push(("pretty", "true".to_string()));
        }
        params
    }
}

/// Raw status and body of a backend reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendReply {
    pub status: u16,
    pub body: String,
}

impl BackendReply {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Transport to the document-search backend.
///
/// An `Err` means no reply was obtained at all; error statuses come back as `Ok`
/// replies and are classified by the executor.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    async fn search(&self, call: &SearchCall) -> Result<BackendReply>;

    async fn ping(&self) -> Result<BackendReply>;
}

/// HTTP transport for an Elasticsearch-compatible backend.
pub struct ElasticClient {
    http_client: reqwest::Client,
    base_url: String,
}

impl ElasticClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http_client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl SearchBackend for ElasticClient {
    async fn search(&self, call: &SearchCall) -> Result<BackendReply> {
        let response = self
            .http_client
            .post(format!("{}/_search", self.base_url))
            .query(&call.query_params())
            .json(&call.body)
            .send()
            .await?;

        let status = response.status().as_u16();
        let body = response.text().await?;
        Ok(BackendReply { status, body })
    }

    async fn ping(&self) -> Result<BackendReply> {
        let response = self
            .http_client
            .head(format!("{}/", self.base_url))
            .send()
            .await?;

        Ok(BackendReply {
            status: response.status().as_u16(),
            body: String::new(),
        })
    }
}
