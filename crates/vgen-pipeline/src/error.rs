use thiserror::Error;

use vgen_llm::GatewayError;
use vgen_models::preset::UnknownPresetError;

pub type PipelineResult<T> = Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Preset(#[from] UnknownPresetError),

    #[error("Invalid request: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("Generation failed: {0}")]
    Generation(#[from] GatewayError),

    #[error("Cache error: {0}")]
    Cache(#[from] vgen_cache::CacheError),
}

impl PipelineError {
    /// Whether the client can fix this by changing the request. Tier and
    /// output names arrive as typed enums, so their parse errors are
    /// rejected at the serde/clap boundary before reaching the pipeline.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::Preset(_) | Self::Validation(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_error_classification() {
        let err = PipelineError::Preset(UnknownPresetError("nope".to_string()));
        assert!(err.is_client_error());
        let err = PipelineError::Configuration("no providers".to_string());
        assert!(!err.is_client_error());
    }
}
