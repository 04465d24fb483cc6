//! Generation request payload shared by the API and CLI.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::output::OutputType;
use crate::tier::CostTier;

/// One content generation request.
///
/// `theme` defaults to the preset's weekly rotation when absent, and
/// `shorts_count` is clamped downstream to what the script can support.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, Validate)]
pub struct GenerateRequest {
    /// Preset registry key, e.g. `"devotional"`.
    #[validate(length(min = 1, message = "preset must not be empty"))]
    pub preset: String,

    #[serde(default)]
    pub output: OutputType,

    #[serde(default)]
    pub tier: CostTier,

    /// Explicit topic override; `None` uses the ISO-week rotation.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<String>,

    /// How many shorts to derive from the long script.
    #[serde(default = "default_shorts_count")]
    #[validate(range(min = 1, max = 8, message = "shorts_count must be between 1 and 8"))]
    pub shorts_count: u32,

    /// Estimate cost and API calls without contacting any provider.
    #[serde(default)]
    pub dry_run: bool,
}

fn default_shorts_count() -> u32 {
    3
}

impl GenerateRequest {
    pub fn new(preset: impl Into<String>) -> Self {
        Self {
            preset: preset.into(),
            output: OutputType::default(),
            tier: CostTier::default(),
            theme: None,
            shorts_count: default_shorts_count(),
            dry_run: false,
        }
    }
}
