//! LLM provider clients and the fallback gateway.
//!
//! Each provider implements [`TextProvider`]; the [`Gateway`] walks an
//! ordered provider list, skipping unconfigured ones and falling through on
//! failure, so a single provider outage never stops generation.

pub mod error;
pub mod gateway;
pub mod gemini;
pub mod openai;
pub mod provider;

pub use error::{GatewayError, GatewayResult, ProviderError, ProviderFailure};
pub use gateway::{Gateway, RetryPolicy};
pub use gemini::GeminiProvider;
pub use openai::OpenAiProvider;
pub use provider::{map_model, GenerationRequest, TextProvider, OPENAI_TO_GEMINI};
