//! Application state.

use std::sync::Arc;

use vgen_pipeline::{ContentGenerator, PipelineConfig, PipelineResult};

use crate::config::ApiConfig;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub generator: Arc<ContentGenerator>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> PipelineResult<Self> {
        let pipeline_config = PipelineConfig::from_env()?;
        Ok(Self {
            config,
            generator: Arc::new(ContentGenerator::from_config(&pipeline_config)),
        })
    }

    /// Build state around an existing generator, used by tests.
    pub fn with_generator(config: ApiConfig, generator: ContentGenerator) -> Self {
        Self {
            config,
            generator: Arc::new(generator),
        }
    }
}
