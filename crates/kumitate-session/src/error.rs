//! Session error types.

use std::io;

use thiserror::Error;

use kumitate_doc::DocError;
use kumitate_types::PageId;

/// Persistence collaborator errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No page stored under this ID.
    #[error("page not found: {0}")]
    NotFound(PageId),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Backend-specific failure (network, quota, ...). Always retryable.
    #[error("store failure: {0}")]
    Failure(String),
}

impl StoreError {
    pub fn failure(msg: impl Into<String>) -> Self {
        Self::Failure(msg.into())
    }
}

/// Generation collaborator errors.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum GenerateError {
    /// Too many requests; try again later.
    #[error("rate limited: {0}")]
    RateLimited(String),

    /// Usage quota used up for the current period.
    #[error("quota exhausted: {0}")]
    QuotaExhausted(String),

    /// Service not configured or unreachable.
    #[error("generator not available: {0}")]
    Unavailable(String),

    /// Response could not be turned into blocks.
    #[error("malformed generator response: {0}")]
    Malformed(String),
}

impl GenerateError {
    /// Whether waiting and retrying the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        matches!(self, Self::RateLimited(_) | Self::QuotaExhausted(_))
    }
}

/// Configuration loading errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] io::Error),

    #[error("invalid config: {0}")]
    Ron(#[from] ron::error::SpannedError),
}

/// Anything a session operation can fail with.
#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Doc(#[from] DocError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl SessionError {
    /// Failures of an external collaborator, which never affect the document.
    pub fn is_collaborator(&self) -> bool {
        matches!(self, Self::Store(_) | Self::Generate(_))
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
