//! Generation result wire shapes.

use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use vgen_models::{CostTier, OutputType, PlatformCues, Section, ShortSegment};
use vgen_script::{CostEstimate, DryRunEstimate};

/// A generated (or cache-served) long-form script plus its packaging.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct LongScript {
    pub sections: Vec<Section>,
    pub full_script: String,
    /// Up to 3 title options.
    pub titles: Vec<String>,
    /// Up to 3 thumbnail text options.
    pub thumbnail_texts: Vec<String>,
    pub duration_minutes: u32,
    pub word_count: usize,
    /// True when served from the cache instead of a provider.
    #[serde(default)]
    pub cached: bool,
}

/// Everything one generation request produced.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct GenerateResult {
    pub preset: String,
    pub theme: String,
    pub tier: CostTier,
    pub output: OutputType,
    pub generated_at: DateTime<Utc>,
    pub dry_run: bool,

    /// Present when the request asked for long-form output.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub long: Option<LongScript>,

    /// Derived shorts; empty for long-only requests.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub shorts: Vec<ShortSegment>,

    /// Packaging guidance for each target platform; absent on dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub platform_cues: Option<PlatformCues>,

    /// Present only on dry runs.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub estimate: Option<CostEstimate>,

    /// Shorts portion of a dry run, when shorts were requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shorts_estimate: Option<DryRunEstimate>,
}
