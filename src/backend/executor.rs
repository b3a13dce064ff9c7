use super::client::{BackendReply, SearchBackend, SearchCall};
use super::error::SearchError;
use super::types::SearchResponse;
use crate::query::BackendQuery;
use crate::query::types::DEFAULT_RESULT_SIZE;

use serde::Deserialize;
use serde_json::Value;
use std::sync::Arc;
use std::time::Instant;

/// Document field holding the allow/deny role lists.
pub const SECURITY_FIELD: &str = "security";

/// Per-call execution options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExecuteOptions {
    /// `0` falls back to [`DEFAULT_RESULT_SIZE`].
    pub size: usize,
    pub dump_raw: bool,
}

impl ExecuteOptions {
    pub fn effective_size(&self) -> usize {
        if self.size == 0 {
            DEFAULT_RESULT_SIZE
        } else {
            self.size
        }
    }
}

/// Receives raw response bodies when a client asks for a dump.
pub trait DiagnosticSink: Send + Sync {
    fn emit(&self, body: &str);
}

/// Writes dumps to the log.
pub struct TracingSink;

impl DiagnosticSink for TracingSink {
    fn emit(&self, body: &str) {
        tracing::info!(target: "discovery_searcher::dump", "{}", body);
    }
}

/// Issues composed queries and classifies the outcome.
pub struct SearchExecutor {
    backend: Arc<dyn SearchBackend>,
    sink: Arc<dyn DiagnosticSink>,
}

impl SearchExecutor {
    pub fn new(backend: Arc<dyn SearchBackend>, sink: Arc<dyn DiagnosticSink>) -> Self {
        Self { backend, sink }
    }

    pub async fn execute(
        &self,
        query: &BackendQuery,
        options: ExecuteOptions,
    ) -> Result<SearchResponse, SearchError> {
        let call = SearchCall {
            body: query.to_body(),
            size: options.effective_size(),
            track_total_hits: true,
            source_excludes: if options.dump_raw {
                vec![SECURITY_FIELD.to_string()]
            } else {
                Vec::new()
            },
            pretty: options.dump_raw,
        };

        let started = Instant::now();
        let reply = self
            .backend
            .search(&call)
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        classify_error(&reply)?;

        if options.dump_raw {
            self.sink.emit(&redact_security(&reply.body));
        }

        let response: SearchResponse =
            serde_json::from_str(&reply.body).map_err(|e| SearchError::Decode(e.to_string()))?;

        tracing::debug!(
            query = %query.text,
            index_prefix = %query.index_prefix,
            status = reply.status,
            took = response.took,
            latency_ms = started.elapsed().as_millis() as u64,
            timed_out = response.timed_out,
            hits = response.hits.total.value,
            hits_relation = %response.hits.total.relation,
            "search completed"
        );

        Ok(response)
    }

    pub async fn ping(&self) -> Result<(), SearchError> {
        let reply = self
            .backend
            .ping()
            .await
            .map_err(|e| SearchError::Transport(e.to_string()))?;

        if reply.is_success() {
            Ok(())
        } else {
            Err(SearchError::Backend {
                status: reply.status,
                reason: "ping failed".to_string(),
                kind: "unavailable".to_string(),
            })
        }
    }
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed {
        #[serde(rename = "type", default)]
        kind: String,
        #[serde(default)]
        reason: String,
    },
    Plain(String),
}

/// Turns a non-2xx reply into a backend error, or a decode error when the error
/// body itself is unreadable.
fn classify_error(reply: &BackendReply) -> Result<(), SearchError> {
    if reply.is_success() {
        return Ok(());
    }

    let envelope: ErrorEnvelope = serde_json::from_str(&reply.body)
        .map_err(|e| SearchError::Decode(format!("error response (status {}): {}", reply.status, e)))?;

    let (kind, reason) = match envelope.error {
        ErrorBody::Detailed { kind, reason } => (kind, reason),
        ErrorBody::Plain(reason) => (String::new(), reason),
    };

    Err(SearchError::Backend {
        status: reply.status,
        reason,
        kind,
    })
}

/// Removes the `security` sub-tree from every hit source. Bodies that are not JSON
/// are returned untouched.
pub fn redact_security(body: &str) -> String {
    let Ok(mut value) = serde_json::from_str::<Value>(body) else {
        return body.to_string();
    };

    if let Some(hits) = value
        .pointer_mut("/hits/hits")
        .and_then(Value::as_array_mut)
    {
        for hit in hits {
            if let Some(source) = hit.get_mut("_source").and_then(Value::as_object_mut) {
                source.remove(SECURITY_FIELD);
            }
        }
    }

    serde_json::to_string_pretty(&value).unwrap_or_else(|_| body.to_string())
}
