//! API cost estimation for dry runs.
//!
//! Estimates are word-count driven: narration length comes from the
//! preset's target duration and the tier's words-per-minute pace, then
//! converts to tokens at the usual ~0.75 words per token.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use vgen_models::{CostTier, OutputType, Preset};

/// Average words per token for English prose.
const WORDS_PER_TOKEN: f64 = 0.75;
/// Fixed prompt overhead added to each call's input.
const PROMPT_OVERHEAD_TOKENS: u64 = 500;
/// Typical output size of a 3-title response.
const TITLES_OUTPUT_TOKENS: u64 = 200;
/// Typical output size of a 3-option thumbnail text response.
const THUMBNAILS_OUTPUT_TOKENS: u64 = 150;

/// USD per 1000 tokens as (model, input rate, output rate).
/// Unknown models are billed at the most expensive tier.
const PRICING_PER_1K: &[(&str, f64, f64)] = &[
    ("gpt-3.5-turbo", 0.0015, 0.002),
    ("gpt-4o-mini", 0.000_15, 0.0006),
    ("gpt-4o", 0.0025, 0.01),
    ("gpt-4", 0.03, 0.06),
];

const FALLBACK_RATES: (f64, f64) = (0.03, 0.06);

/// Cost of one planned API operation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct OperationCost {
    pub operation: String,
    pub api_calls: u32,
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub cost_usd: f64,
}

/// Full dry-run estimate for a generation request.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CostEstimate {
    pub model: String,
    pub operations: Vec<OperationCost>,
    pub total_estimated_api_calls: u32,
    pub total_cost_usd: f64,
}

/// Convert a word count to tokens, rounding up.
pub fn words_to_tokens(words: u64) -> u64 {
    (words as f64 / WORDS_PER_TOKEN).ceil() as u64
}

fn rates_for(model: &str) -> (f64, f64) {
    PRICING_PER_1K
        .iter()
        .find(|(m, _, _)| *m == model)
        .map(|(_, input, output)| (*input, *output))
        .unwrap_or(FALLBACK_RATES)
}

pub struct CostEstimator;

impl CostEstimator {
    /// Estimate cost and call count for a request without making any calls.
    ///
    /// Long-form output costs three calls (script, titles, thumbnail text);
    /// shorts derivation is local and always free.
    pub fn estimate(preset: &Preset, tier: CostTier, output: OutputType) -> CostEstimate {
        let model = tier.script_model();
        let mut operations = Vec::new();

        if output.wants_long() {
            let script_words =
                u64::from(preset.duration_minutes) * u64::from(tier.words_per_minute());
            operations.push(Self::operation(
                "long_form_script",
                model,
                PROMPT_OVERHEAD_TOKENS,
                words_to_tokens(script_words),
            ));
            operations.push(Self::operation(
                "titles",
                model,
                PROMPT_OVERHEAD_TOKENS,
                TITLES_OUTPUT_TOKENS,
            ));
            operations.push(Self::operation(
                "thumbnail_text",
                model,
                PROMPT_OVERHEAD_TOKENS,
                THUMBNAILS_OUTPUT_TOKENS,
            ));
        }

        if output.wants_shorts() {
            operations.push(OperationCost {
                operation: "shorts_derivation".to_string(),
                api_calls: 0,
                input_tokens: 0,
                output_tokens: 0,
                cost_usd: 0.0,
            });
        }

        let total_estimated_api_calls = operations.iter().map(|op| op.api_calls).sum();
        let total_cost_usd = operations.iter().map(|op| op.cost_usd).sum();

        CostEstimate {
            model: model.to_string(),
            operations,
            total_estimated_api_calls,
            total_cost_usd,
        }
    }

    fn operation(
        name: &str,
        model: &str,
        input_tokens: u64,
        output_tokens: u64,
    ) -> OperationCost {
        let (input_rate, output_rate) = rates_for(model);
        let cost_usd = input_tokens as f64 / 1000.0 * input_rate
            + output_tokens as f64 / 1000.0 * output_rate;
        OperationCost {
            operation: name.to_string(),
            api_calls: 1,
            input_tokens,
            output_tokens,
            cost_usd,
        }
    }
}
