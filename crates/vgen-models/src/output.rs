//! Output format selection.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// What a generation request should produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputType {
    /// One long-form script only.
    Long,
    /// Short-form segments derived from the long-form script.
    Shorts,
    /// Both the long-form script and the derived shorts.
    #[default]
    Both,
}

impl OutputType {
    pub const ALL: &'static [OutputType] =
        &[OutputType::Long, OutputType::Shorts, OutputType::Both];

    /// Whether the long-form script is part of the response.
    pub fn wants_long(&self) -> bool {
        matches!(self, OutputType::Long | OutputType::Both)
    }

    /// Whether derived shorts are part of the response.
    ///
    /// Shorts always require the long-form script internally; this only
    /// controls what the caller gets back.
    pub fn wants_shorts(&self) -> bool {
        matches!(self, OutputType::Shorts | OutputType::Both)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            OutputType::Long => "long",
            OutputType::Shorts => "shorts",
            OutputType::Both => "both",
        }
    }
}

impl fmt::Display for OutputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for OutputType {
    type Err = UnknownOutputTypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "long" => Ok(OutputType::Long),
            "shorts" => Ok(OutputType::Shorts),
            "both" => Ok(OutputType::Both),
            _ => Err(UnknownOutputTypeError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown output type '{0}'. Valid options: long, shorts, both")]
pub struct UnknownOutputTypeError(pub String);
