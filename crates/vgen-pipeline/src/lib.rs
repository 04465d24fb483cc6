//! The content generation pipeline.
//!
//! Wires the cache, the LLM gateway, and the local derivation steps into
//! one entry point: [`ContentGenerator::generate`].

pub mod config;
pub mod error;
pub mod generator;
pub mod result;

pub use config::PipelineConfig;
pub use error::{PipelineError, PipelineResult};
pub use generator::ContentGenerator;
pub use result::{GenerateResult, LongScript};
