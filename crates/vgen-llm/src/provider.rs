//! Provider abstraction and model name mapping.

use async_trait::async_trait;

use crate::error::ProviderError;

/// One text generation call, provider-agnostic.
///
/// `model` always uses OpenAI naming; providers that speak a different
/// model catalogue translate via [`map_model`].
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    pub system: String,
    pub user: String,
    pub model: String,
    pub max_tokens: u32,
}

/// A text generation backend.
#[async_trait]
pub trait TextProvider: Send + Sync {
    /// Stable name used in logs and failure reports.
    fn name(&self) -> &'static str;

    /// Whether credentials are present. Unconfigured providers are skipped
    /// by the gateway without counting as failures.
    fn is_configured(&self) -> bool;

    async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError>;
}

/// OpenAI model names mapped onto the closest Gemini equivalent.
pub const OPENAI_TO_GEMINI: &[(&str, &str)] = &[
    ("gpt-3.5-turbo", "gemini-2.0-flash"),
    ("gpt-4o-mini", "gemini-2.0-flash"),
    ("gpt-4o", "gemini-1.5-pro"),
    ("gpt-4", "gemini-1.5-pro"),
];

/// Translate an OpenAI model name for Gemini. Unknown names fall back to
/// the flash model rather than failing the request.
pub fn map_model(openai_model: &str) -> &'static str {
    OPENAI_TO_GEMINI
        .iter()
        .find(|(from, _)| *from == openai_model)
        .map(|(_, to)| *to)
        .unwrap_or("gemini-2.0-flash")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_mapping() {
        assert_eq!(map_model("gpt-3.5-turbo"), "gemini-2.0-flash");
        assert_eq!(map_model("gpt-4o-mini"), "gemini-2.0-flash");
        assert_eq!(map_model("gpt-4o"), "gemini-1.5-pro");
        assert_eq!(map_model("gpt-4"), "gemini-1.5-pro");
        assert_eq!(map_model("gpt-99"), "gemini-2.0-flash");
    }
}
