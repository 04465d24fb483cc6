use std::fmt;

use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// A failure from one provider attempt.
#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("Rate limited")]
    RateLimited,

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Provider returned an empty response")]
    EmptyResponse,

    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ProviderError {
    pub fn api(status: u16, message: impl Into<String>) -> Self {
        Self::Api {
            status,
            message: message.into(),
        }
    }

    /// Rate limits are worth retrying on the same provider before falling
    /// through; everything else goes straight to the next provider.
    pub fn is_rate_limit(&self) -> bool {
        matches!(self, Self::RateLimited)
    }
}

/// Record of one provider's final failure, kept for the aggregate error.
#[derive(Debug)]
pub struct ProviderFailure {
    pub provider: &'static str,
    pub error: ProviderError,
}

impl fmt::Display for ProviderFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("No LLM provider is configured (set OPENAI_API_KEY or GEMINI_API_KEY)")]
    NoProviderConfigured,

    #[error("All providers failed: [{}]", format_failures(.0))]
    AllProvidersFailed(Vec<ProviderFailure>),
}

fn format_failures(failures: &[ProviderFailure]) -> String {
    failures
        .iter()
        .map(|f| f.to_string())
        .collect::<Vec<_>>()
        .join("; ")
}
