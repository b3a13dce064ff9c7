use thiserror::Error;

/// Ways a single backend search can fail. None of them are retried here.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SearchError {
    /// No response was obtained (connect error, timeout, reset).
    #[error("failed to get response from search backend: {0}")]
    Transport(String),

    /// The backend answered with an error envelope.
    #[error("search backend responded with an error: {reason} (type: {kind}, status: {status})")]
    Backend {
        status: u16,
        reason: String,
        kind: String,
    },

    /// The response body was not the expected JSON.
    #[error("could not parse response body: {0}")]
    Decode(String),
}

impl SearchError {
    pub fn kind(&self) -> &'static str {
        match self {
            SearchError::Transport(_) => "transport",
            SearchError::Backend { .. } => "backend",
            SearchError::Decode(_) => "decode",
        }
    }
}
