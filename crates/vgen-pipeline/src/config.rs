//! Pipeline configuration.

use std::path::PathBuf;

use crate::error::{PipelineError, PipelineResult};

/// Runtime configuration, normally loaded from the environment.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Root directory for the artifact cache.
    pub cache_dir: PathBuf,
    pub cache_enabled: bool,
    pub openai_api_key: Option<String>,
    pub gemini_api_key: Option<String>,
    /// Provider fallback order, e.g. `["openai", "gemini"]`.
    pub provider_order: Vec<String>,
    /// Rate-limit retries per provider before falling through.
    pub llm_max_retries: u32,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            cache_dir: PathBuf::from(".content_cache"),
            cache_enabled: true,
            openai_api_key: None,
            gemini_api_key: None,
            provider_order: vec!["openai".to_string(), "gemini".to_string()],
            llm_max_retries: 2,
        }
    }
}

impl PipelineConfig {
    /// Load configuration from environment variables, falling back to
    /// defaults for anything unset.
    pub fn from_env() -> PipelineResult<Self> {
        let defaults = Self::default();

        let provider_order = match std::env::var("VGEN_PROVIDER_ORDER") {
            Ok(raw) => raw
                .split(',')
                .map(|s| s.trim().to_lowercase())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => defaults.provider_order,
        };
        for provider in &provider_order {
            if provider != "openai" && provider != "gemini" {
                return Err(PipelineError::Configuration(format!(
                    "Unknown provider '{provider}' in VGEN_PROVIDER_ORDER (expected openai, gemini)"
                )));
            }
        }

        Ok(Self {
            cache_dir: std::env::var("VGEN_CACHE_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.cache_dir),
            cache_enabled: std::env::var("VGEN_CACHE_ENABLED")
                .map(|v| v != "false" && v != "0")
                .unwrap_or(defaults.cache_enabled),
            openai_api_key: std::env::var("OPENAI_API_KEY").ok().filter(|k| !k.is_empty()),
            gemini_api_key: std::env::var("GEMINI_API_KEY").ok().filter(|k| !k.is_empty()),
            provider_order,
            llm_max_retries: std::env::var("VGEN_LLM_MAX_RETRIES")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(defaults.llm_max_retries),
        })
    }
}
