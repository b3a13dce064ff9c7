use thiserror::Error;

/// Failures talking to the content API. Never fatal to a search.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MetadataError {
    #[error("failed to send content api request: {0}")]
    Transport(String),

    #[error("content api request resulted in an unexpected status: {0}")]
    Status(u16),

    #[error("failed to decode content api response: {0}")]
    Decode(String),

    #[error("failed to obtain content api access token: {0}")]
    Auth(String),
}
