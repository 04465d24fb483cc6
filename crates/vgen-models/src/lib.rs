//! Shared data models for the vgen content pipeline.
//!
//! This crate provides Serde-serializable types for:
//! - Content niche presets and the static preset registry
//! - Cost tiers and output formats
//! - Parsed script sections and derived short segments
//! - Generation request shapes

pub mod output;
pub mod preset;
pub mod request;
pub mod section;
pub mod short;
pub mod tier;

// Re-export common types
pub use output::{OutputType, UnknownOutputTypeError};
pub use preset::{get_preset, list_presets, PlatformCues, Preset, UnknownPresetError};
pub use request::GenerateRequest;
pub use section::{Section, STRUCTURAL_LABELS};
pub use short::ShortSegment;
pub use tier::{CostTier, UnknownTierError};
