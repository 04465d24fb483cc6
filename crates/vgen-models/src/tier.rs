//! Cost/quality tier definitions.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Cost tier selecting which model and service quality to target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema, Default)]
#[serde(rename_all = "snake_case")]
pub enum CostTier {
    /// Free-tier services and the cheapest script model.
    #[default]
    Free,
    /// Budget models with slightly better output quality.
    LowCost,
    /// Highest quality models.
    #[serde(alias = "hq")]
    Quality,
}

impl CostTier {
    /// All available tiers.
    pub const ALL: &'static [CostTier] = &[CostTier::Free, CostTier::LowCost, CostTier::Quality];

    /// Script model requested for this tier (OpenAI naming; the gateway
    /// translates when falling back to another provider family).
    pub fn script_model(&self) -> &'static str {
        match self {
            CostTier::Free => "gpt-3.5-turbo",
            CostTier::LowCost => "gpt-4o-mini",
            CostTier::Quality => "gpt-4o",
        }
    }

    /// Token budget for a single long-form script call.
    pub fn max_tokens(&self) -> u32 {
        match self {
            CostTier::Free => 2000,
            CostTier::LowCost => 3000,
            CostTier::Quality => 4000,
        }
    }

    /// Approximate narration pace used for word targets.
    pub fn words_per_minute(&self) -> u32 {
        match self {
            CostTier::Free => 130,
            CostTier::LowCost => 140,
            CostTier::Quality => 150,
        }
    }

    /// Human-readable tier description for the API surface.
    pub fn description(&self) -> &'static str {
        match self {
            CostTier::Free => "100% free tier services, gpt-3.5-turbo",
            CostTier::LowCost => "Low cost, gpt-4o-mini",
            CostTier::Quality => "Higher quality, gpt-4o",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CostTier::Free => "free",
            CostTier::LowCost => "low_cost",
            CostTier::Quality => "quality",
        }
    }
}

impl fmt::Display for CostTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CostTier {
    type Err = UnknownTierError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "free" => Ok(CostTier::Free),
            "low_cost" => Ok(CostTier::LowCost),
            // "hq" is the legacy CLI spelling
            "quality" | "hq" => Ok(CostTier::Quality),
            _ => Err(UnknownTierError(s.to_string())),
        }
    }
}

#[derive(Debug, Error)]
#[error("Unknown cost tier '{0}'. Valid options: free, low_cost, quality")]
pub struct UnknownTierError(pub String);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tier_from_str() {
        assert_eq!("free".parse::<CostTier>().unwrap(), CostTier::Free);
        assert_eq!("low_cost".parse::<CostTier>().unwrap(), CostTier::LowCost);
        assert_eq!("quality".parse::<CostTier>().unwrap(), CostTier::Quality);
        assert_eq!("hq".parse::<CostTier>().unwrap(), CostTier::Quality);
        assert!("premium".parse::<CostTier>().is_err());
    }

    #[test]
    fn test_tier_pace_increases_with_quality() {
        assert!(CostTier::Free.words_per_minute() < CostTier::LowCost.words_per_minute());
        assert!(CostTier::LowCost.words_per_minute() < CostTier::Quality.words_per_minute());
    }

    #[test]
    fn test_tier_serde_round_trip() {
        let json = serde_json::to_string(&CostTier::LowCost).unwrap();
        assert_eq!(json, "\"low_cost\"");
        let tier: CostTier = serde_json::from_str("\"hq\"").unwrap();
        assert_eq!(tier, CostTier::Quality);
    }
}
