use std::time::Duration;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use thiserror::Error;

/// Parameters of a single completion round trip.
#[derive(Clone, Debug, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub completion_count: u8,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProviderError {
    #[error("Authentication failed: {0}")]
    Authentication(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    #[error("Quota exceeded: {0}")]
    QuotaExceeded(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider unavailable: {0}")]
    Unavailable(String),

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),

    #[error("Provider did not respond within {0:?}")]
    Timeout(Duration),
}

impl ProviderError {
    /// Transient faults worth another attempt.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ProviderError::RateLimited(_)
                | ProviderError::Network(_)
                | ProviderError::Unavailable(_)
                | ProviderError::Timeout(_)
        )
    }
}

#[cfg_attr(test, automock)]
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Returns the raw text of the first completion.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ProviderError>;
}
