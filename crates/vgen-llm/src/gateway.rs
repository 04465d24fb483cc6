//! Ordered provider fallback with bounded retry.

use std::time::Duration;

use tracing::{debug, info, warn};

use crate::error::{GatewayError, GatewayResult, ProviderFailure};
use crate::provider::{GenerationRequest, TextProvider};

/// Retry behaviour for rate-limited calls on a single provider.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Base delay, doubled each attempt.
    pub base_delay: Duration,
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(8),
        }
    }
}

impl RetryPolicy {
    fn delay_for_attempt(&self, attempt: u32) -> Duration {
        self.base_delay
            .saturating_mul(2u32.pow(attempt))
            .min(self.max_delay)
    }
}

/// Walks providers in order until one succeeds.
///
/// Unconfigured providers are skipped silently. Rate limits get a short
/// exponential backoff on the same provider; any other error falls through
/// to the next provider immediately.
pub struct Gateway {
    providers: Vec<Box<dyn TextProvider>>,
    retry: RetryPolicy,
}

impl Gateway {
    pub fn new(providers: Vec<Box<dyn TextProvider>>) -> Self {
        Self {
            providers,
            retry: RetryPolicy::default(),
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    /// Names of providers that have credentials.
    pub fn configured_providers(&self) -> Vec<&'static str> {
        self.providers
            .iter()
            .filter(|p| p.is_configured())
            .map(|p| p.name())
            .collect()
    }

    pub async fn generate(&self, request: &GenerationRequest) -> GatewayResult<String> {
        let mut failures = Vec::new();
        let mut any_configured = false;

        for provider in &self.providers {
            if !provider.is_configured() {
                debug!(provider = provider.name(), "skipping unconfigured provider");
                continue;
            }
            any_configured = true;

            match self.generate_with_retry(provider.as_ref(), request).await {
                Ok(text) => {
                    info!(provider = provider.name(), model = %request.model, "generation succeeded");
                    return Ok(text);
                }
                Err(error) => {
                    warn!(provider = provider.name(), %error, "provider failed, falling through");
                    failures.push(ProviderFailure {
                        provider: provider.name(),
                        error,
                    });
                }
            }
        }

        if !any_configured {
            return Err(GatewayError::NoProviderConfigured);
        }
        Err(GatewayError::AllProvidersFailed(failures))
    }

    async fn generate_with_retry(
        &self,
        provider: &dyn TextProvider,
        request: &GenerationRequest,
    ) -> Result<String, crate::error::ProviderError> {
        let mut attempt = 0;
        loop {
            match provider.generate(request).await {
                Ok(text) => return Ok(text),
                Err(error) if error.is_rate_limit() && attempt < self.retry.max_retries => {
                    let delay = self.retry.delay_for_attempt(attempt);
                    debug!(
                        provider = provider.name(),
                        attempt,
                        delay_ms = delay.as_millis() as u64,
                        "rate limited, backing off"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(error) => return Err(error),
            }
        }
    }
}
