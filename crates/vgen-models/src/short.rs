//! Derived short-form segment models.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// A short-form (~60 s) segment derived from one section of a long-form
/// script. Produced entirely locally; never costs an API call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ShortSegment {
    /// Segment title (taken from the source section title).
    pub title: String,

    /// First sentence of the source content, capped at ~150 chars.
    pub hook: String,

    /// ~120 words following the hook, approximating 60 s of narration.
    pub body: String,

    /// Fixed per-preset closing line.
    pub cta: String,

    /// Hook truncated to at most 60 chars (plus ellipsis when cut).
    pub caption_text: String,

    /// Three b-roll search keywords cycled from the preset pool.
    pub broll_keywords: Vec<String>,

    /// Title of the section this short was derived from.
    pub source_section: String,

    /// Word count of hook + body + cta.
    pub estimated_words: usize,
}
