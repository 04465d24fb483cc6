//! Parsed script sections.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Structural header labels that mark non-content blocks of a script.
///
/// `SECTION N` headers are the content blocks; everything here is scaffolding
/// (opener, promise, summary, call to action) that shorts derivation skips.
pub const STRUCTURAL_LABELS: &[&str] = &["HOOK", "PROMISE", "RECAP", "CTA"];

/// One named block of a parsed long-form script, in source order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Section {
    /// The trimmed header line, e.g. `"SECTION 1: Tool One"` or `"HOOK"`.
    pub title: String,
    /// Body lines following the header, joined with single spaces.
    pub content: String,
}

impl Section {
    pub fn new(title: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
        }
    }

    /// Whether the title starts with a structural label (HOOK/PROMISE/RECAP/CTA).
    pub fn is_structural(&self) -> bool {
        STRUCTURAL_LABELS
            .iter()
            .any(|label| self.title.starts_with(label))
    }

    /// Whitespace-separated word count of the content.
    pub fn word_count(&self) -> usize {
        self.content.split_whitespace().count()
    }
}
