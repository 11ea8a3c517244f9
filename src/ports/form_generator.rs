//! Form generator port - drafts a form from a natural-language prompt.
//!
//! Implementations return the provider's raw completion text. Turning that
//! text into elements is the ingestion boundary's job, not the provider's.

use async_trait::async_trait;
use thiserror::Error;

/// Produces raw completion text for a form-drafting prompt.
#[async_trait]
pub trait FormGenerator: Send + Sync {
    /// Generate a form description for `prompt`.
    ///
    /// The returned text is expected (but not trusted) to contain a JSON
    /// object of the shape `{title?, description?, fields: [...]}`.
    async fn generate(&self, prompt: &str) -> Result<String, UpstreamError>;

    /// Provider name for logging.
    fn provider_name(&self) -> &str;
}

/// Failures of an external dependency.
///
/// The variants let callers tell "try again later" apart from
/// "the provider returned something unusable".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// Quota or billing limit reached on the provider account.
    #[error("quota exceeded: {0}")]
    QuotaExceeded(String),

    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Provider rejected our credentials.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Provider is unreachable or returned a server error.
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    /// Request timed out.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },

    /// Provider answered, but the answer could not be used.
    #[error("malformed response: {0}")]
    Malformed(String),
}

impl UpstreamError {
    /// Returns true if the same request might succeed later.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            UpstreamError::RateLimited { .. }
                | UpstreamError::Unavailable(_)
                | UpstreamError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_generator_is_object_safe() {
        fn _accepts_dyn(_generator: &dyn FormGenerator) {}
    }

    #[test]
    fn malformed_and_quota_are_not_retryable() {
        assert!(!UpstreamError::Malformed("x".to_string()).is_retryable());
        assert!(!UpstreamError::QuotaExceeded("x".to_string()).is_retryable());
        assert!(UpstreamError::Timeout { timeout_secs: 30 }.is_retryable());
    }
}
