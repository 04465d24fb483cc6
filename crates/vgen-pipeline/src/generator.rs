//! The content generator.
//!
//! One `generate` call resolves the preset and theme, serves the long-form
//! script from cache or a provider, and derives shorts locally. Cache keys
//! hash every parameter that affects output, so a tier or theme change is
//! a different entry.

use chrono::{DateTime, Datelike, Utc};
use sha2::{Digest, Sha256};
use tracing::{debug, info};
use validator::Validate;

use vgen_cache::{CacheKey, CacheStore, KeyBuilder};
use vgen_llm::{Gateway, GeminiProvider, GenerationRequest, OpenAiProvider, RetryPolicy, TextProvider};
use vgen_models::{get_preset, GenerateRequest, Preset};
use vgen_models::{CostTier, ShortSegment};
use vgen_script::{derive_shorts, estimate_dry_run, parse_sections, CostEstimator};

use crate::config::PipelineConfig;
use crate::error::PipelineResult;
use crate::result::{GenerateResult, LongScript};

const SCRIPTS_NAMESPACE: &str = "scripts";
const SHORTS_NAMESPACE: &str = "shorts";
const MAX_TITLE_OPTIONS: usize = 3;

pub struct ContentGenerator {
    cache: CacheStore,
    gateway: Gateway,
}

impl ContentGenerator {
    pub fn new(cache: CacheStore, gateway: Gateway) -> Self {
        Self { cache, gateway }
    }

    /// Build a generator from configuration, wiring providers in the
    /// configured fallback order.
    pub fn from_config(config: &PipelineConfig) -> Self {
        let providers: Vec<Box<dyn TextProvider>> = config
            .provider_order
            .iter()
            .filter_map(|name| -> Option<Box<dyn TextProvider>> {
                match name.as_str() {
                    "openai" => Some(Box::new(OpenAiProvider::new(
                        config.openai_api_key.clone(),
                    ))),
                    "gemini" => Some(Box::new(GeminiProvider::new(
                        config.gemini_api_key.clone(),
                    ))),
                    _ => None,
                }
            })
            .collect();
        let gateway = Gateway::new(providers).with_retry_policy(RetryPolicy {
            max_retries: config.llm_max_retries,
            ..RetryPolicy::default()
        });
        Self::new(
            CacheStore::new(&config.cache_dir, config.cache_enabled),
            gateway,
        )
    }

    pub fn cache(&self) -> &CacheStore {
        &self.cache
    }

    pub async fn generate(&self, request: &GenerateRequest) -> PipelineResult<GenerateResult> {
        request.validate()?;
        let preset = get_preset(&request.preset)?;
        let theme = request
            .theme
            .clone()
            .unwrap_or_else(|| theme_for_date(preset, Utc::now()));

        info!(
            preset = %preset.name,
            %theme,
            tier = %request.tier,
            output = %request.output,
            dry_run = request.dry_run,
            "generation requested"
        );

        if request.dry_run {
            let estimate = CostEstimator::estimate(preset, request.tier, request.output);
            let shorts_estimate = request
                .output
                .wants_shorts()
                .then(|| estimate_dry_run(request.shorts_count));
            return Ok(GenerateResult {
                preset: preset.name.clone(),
                theme,
                tier: request.tier,
                output: request.output,
                generated_at: Utc::now(),
                dry_run: true,
                long: None,
                shorts: Vec::new(),
                platform_cues: None,
                estimate: Some(estimate),
                shorts_estimate,
            });
        }

        // Shorts always derive from a long script, so the long form is
        // produced (or fetched) regardless of the requested output.
        let long = self.long_script(preset, &theme, request.tier).await?;

        let shorts = if request.output.wants_shorts() {
            self.shorts(preset, &theme, request.tier, request.shorts_count, &long)
        } else {
            Vec::new()
        };

        Ok(GenerateResult {
            preset: preset.name.clone(),
            theme,
            tier: request.tier,
            output: request.output,
            generated_at: Utc::now(),
            dry_run: false,
            long: request.output.wants_long().then_some(long),
            shorts,
            platform_cues: Some(preset.platform_cues.clone()),
            estimate: None,
            shorts_estimate: None,
        })
    }

    async fn long_script(
        &self,
        preset: &Preset,
        theme: &str,
        tier: CostTier,
    ) -> PipelineResult<LongScript> {
        let key = long_cache_key(preset, theme, tier);
        if let Some(mut hit) = self.cache.get::<LongScript>(SCRIPTS_NAMESPACE, &key) {
            hit.cached = true;
            return Ok(hit);
        }

        let system = &preset.long_form_system_prompt;
        let user = preset
            .long_form_user_template
            .replace("{theme}", theme)
            .replace("{duration_minutes}", &preset.duration_minutes.to_string())
            .replace("{words_per_minute}", &tier.words_per_minute().to_string());

        let full_script = self
            .gateway
            .generate(&GenerationRequest {
                system: system.clone(),
                user,
                model: tier.script_model().to_string(),
                max_tokens: tier.max_tokens(),
            })
            .await
            .map_err(map_gateway_error)?;

        let titles = self
            .packaging_options(preset, theme, tier, &preset.title_prompt_template)
            .await?;
        let thumbnail_texts = self
            .packaging_options(preset, theme, tier, &preset.thumbnail_prompt_template)
            .await?;

        let sections = parse_sections(&full_script);
        let word_count = full_script.split_whitespace().count();
        debug!(sections = sections.len(), word_count, "long script generated");

        let long = LongScript {
            sections,
            full_script,
            titles,
            thumbnail_texts,
            duration_minutes: preset.duration_minutes,
            word_count,
            cached: false,
        };
        self.cache.set(SCRIPTS_NAMESPACE, &key, &long);
        Ok(long)
    }

    async fn packaging_options(
        &self,
        preset: &Preset,
        theme: &str,
        tier: CostTier,
        template: &str,
    ) -> PipelineResult<Vec<String>> {
        let text = self
            .gateway
            .generate(&GenerationRequest {
                system: preset.long_form_system_prompt.clone(),
                user: template.replace("{theme}", theme),
                model: tier.script_model().to_string(),
                max_tokens: 500,
            })
            .await
            .map_err(map_gateway_error)?;
        Ok(parse_numbered_list(&text, MAX_TITLE_OPTIONS))
    }

    fn shorts(
        &self,
        preset: &Preset,
        theme: &str,
        tier: CostTier,
        count: u32,
        long: &LongScript,
    ) -> Vec<ShortSegment> {
        let key = shorts_cache_key(preset, theme, tier, count, &long.full_script);
        if let Some(hit) = self.cache.get::<Vec<ShortSegment>>(SHORTS_NAMESPACE, &key) {
            return hit;
        }
        let shorts = derive_shorts(&long.sections, preset, count);
        self.cache.set(SHORTS_NAMESPACE, &key, &shorts);
        shorts
    }
}

/// Missing credentials are an operator problem, not an upstream outage.
fn map_gateway_error(err: vgen_llm::GatewayError) -> crate::error::PipelineError {
    match err {
        vgen_llm::GatewayError::NoProviderConfigured => {
            crate::error::PipelineError::Configuration(err.to_string())
        }
        other => crate::error::PipelineError::Generation(other),
    }
}

/// Pick this week's theme from the preset rotation (ISO week number modulo
/// rotation length), so every run in a given week agrees on the topic.
pub fn theme_for_date(preset: &Preset, date: DateTime<Utc>) -> String {
    let week = date.iso_week().week() as usize;
    preset.default_themes[week % preset.default_themes.len()].clone()
}

fn long_cache_key(preset: &Preset, theme: &str, tier: CostTier) -> CacheKey {
    KeyBuilder::new()
        .param("preset", &preset.name)
        .param("theme", theme)
        .param("output", "long")
        .param("tier", tier.as_str())
        .param("duration", preset.duration_minutes)
        .build()
}

fn shorts_cache_key(
    preset: &Preset,
    theme: &str,
    tier: CostTier,
    count: u32,
    full_script: &str,
) -> CacheKey {
    KeyBuilder::new()
        .param("preset", &preset.name)
        .param("theme", theme)
        .param("output", "shorts")
        .param("tier", tier.as_str())
        .param("shorts_count", count)
        .param("script_hash", script_hash(full_script))
        .build()
}

/// Short fingerprint of a script, so shorts invalidate when it changes.
fn script_hash(script: &str) -> String {
    let digest = format!("{:x}", Sha256::digest(script.as_bytes()));
    digest[..16].to_string()
}

/// Extract up to `cap` items from a `1. ...` / `2) ...` numbered response.
/// Unnumbered non-empty lines are kept verbatim.
fn parse_numbered_list(text: &str, cap: usize) -> Vec<String> {
    text.lines()
        .filter_map(|line| {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                return None;
            }
            let digits = trimmed.chars().take_while(|c| c.is_ascii_digit()).count();
            let item = if digits > 0 {
                let rest = &trimmed[digits..];
                match rest.strip_prefix(['.', ')']) {
                    Some(stripped) => stripped.trim(),
                    None => trimmed,
                }
            } else {
                trimmed
            };
            (!item.is_empty()).then(|| item.to_string())
        })
        .take(cap)
        .collect()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    use async_trait::async_trait;
    use chrono::TimeZone;

    use super::*;
    use vgen_llm::ProviderError;
    use vgen_models::OutputType;

    const STUB_SCRIPT: &str = "\
HOOK (0-30 s):
Everything you know about weekly content is wrong.

PROMISE:
By the end you will have a system that runs itself.

SECTION 1: The Rotation
A weekly theme rotation removes the hardest decision from your calendar.
You define twelve themes once and the calendar picks one for you every
single week without fail, which keeps the channel consistent and frees
you to focus entirely on execution quality instead of idea generation.

SECTION 2: The Derivation
Every long video becomes several shorts without another model call.
Sections are scored by substance, sampled evenly across the script, and
cut into hook, body, and call to action so the vertical feed gets native
content rather than lazy crops of the widescreen original.

SECTION 3: The Cache
Nothing is ever generated twice. Requests hash their parameters and the
result lands on disk, so reruns in the same week are free and instant,
and a corrupted entry silently falls back to regeneration.

RECAP:
Rotation, derivation, cache. Three parts, one system.

CTA:
Subscribe and watch the next video for the full setup.
";

    struct ScriptedProvider {
        calls: Arc<AtomicU32>,
    }

    #[async_trait]
    impl TextProvider for ScriptedProvider {
        fn name(&self) -> &'static str {
            "scripted"
        }

        fn is_configured(&self) -> bool {
            true
        }

        async fn generate(&self, request: &GenerationRequest) -> Result<String, ProviderError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if request.user.contains("thumbnail") {
                Ok("1. BIG RESULT\n2. NO EFFORT\n3. WATCH NOW".to_string())
            } else if request.user.contains("titles") {
                Ok("1. The System That Works\n2. Set and Forget Content\n3. One Hour a Week"
                    .to_string())
            } else {
                Ok(STUB_SCRIPT.to_string())
            }
        }
    }

    fn generator(dir: &std::path::Path) -> (ContentGenerator, Arc<AtomicU32>) {
        let calls = Arc::new(AtomicU32::new(0));
        let gateway = Gateway::new(vec![Box::new(ScriptedProvider {
            calls: Arc::clone(&calls),
        })]);
        (
            ContentGenerator::new(CacheStore::new(dir, true), gateway),
            calls,
        )
    }

    fn request() -> GenerateRequest {
        let mut req = GenerateRequest::new("finance_ai_saas");
        req.theme = Some("Test Theme".to_string());
        req
    }

    #[tokio::test]
    async fn test_both_output_makes_three_calls() {
        let dir = tempfile::tempdir().unwrap();
        let (generator, calls) = generator(dir.path());

        let result = generator.generate(&request()).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        let long = result.long.unwrap();
        assert!(!long.cached);
        assert_eq!(long.sections.len(), 7);
        assert_eq!(long.titles.len(), 3);
        assert_eq!(long.thumbnail_texts.len(), 3);
        assert_eq!(result.shorts.len(), 3);
    }

    #[tokio::test]
    async fn test_second_run_is_served_from_cache() {
        let dir = tempfile::tempdir().unwrap();
        let (generator, calls) = generator(dir.path());

        let first = generator.generate(&request()).await.unwrap();
        let second = generator.generate(&request()).await.unwrap();

        // No additional provider calls for the rerun
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(second.long.as_ref().unwrap().cached);
        assert_eq!(
            first.long.unwrap().full_script,
            second.long.unwrap().full_script
        );
        assert_eq!(first.shorts, second.shorts);
    }

    #[tokio::test]
    async fn test_shorts_only_hides_long_but_still_generates_it() {
        let dir = tempfile::tempdir().unwrap();
        let (generator, calls) = generator(dir.path());

        let mut req = request();
        req.output = OutputType::Shorts;
        let result = generator.generate(&req).await.unwrap();

        assert!(result.long.is_none());
        assert_eq!(result.shorts.len(), 3);
        // The underlying script was generated and cached for later reuse
        assert_eq!(calls.load(Ordering::SeqCst), 3);

        req.output = OutputType::Long;
        let long_run = generator.generate(&req).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 3);
        assert!(long_run.long.unwrap().cached);
    }

    #[tokio::test]
    async fn test_dry_run_makes_no_calls() {
        let dir = tempfile::tempdir().unwrap();
        let (generator, calls) = generator(dir.path());

        let mut req = request();
        req.dry_run = true;
        let result = generator.generate(&req).await.unwrap();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(result.dry_run);
        assert!(result.long.is_none());
        assert!(result.shorts.is_empty());
        assert_eq!(result.estimate.unwrap().total_estimated_api_calls, 3);

        let shorts_estimate = result.shorts_estimate.unwrap();
        assert_eq!(shorts_estimate.api_calls_required, 0);
        assert_eq!(shorts_estimate.shorts_count, 3);
    }

    #[tokio::test]
    async fn test_long_only_dry_run_has_no_shorts_estimate() {
        let dir = tempfile::tempdir().unwrap();
        let (generator, _calls) = generator(dir.path());

        let mut req = request();
        req.dry_run = true;
        req.output = OutputType::Long;
        let result = generator.generate(&req).await.unwrap();
        assert!(result.shorts_estimate.is_none());
    }

    #[tokio::test]
    async fn test_tier_change_misses_the_cache() {
        let dir = tempfile::tempdir().unwrap();
        let (generator, calls) = generator(dir.path());

        generator.generate(&request()).await.unwrap();
        let mut req = request();
        req.tier = CostTier::Quality;
        generator.generate(&req).await.unwrap();
        assert_eq!(calls.load(Ordering::SeqCst), 6);
    }

    #[tokio::test]
    async fn test_missing_credentials_is_configuration_error() {
        let dir = tempfile::tempdir().unwrap();
        let generator =
            ContentGenerator::new(CacheStore::new(dir.path(), true), Gateway::new(Vec::new()));
        let err = generator.generate(&request()).await.unwrap_err();
        assert!(matches!(
            err,
            crate::error::PipelineError::Configuration(_)
        ));
    }

    #[tokio::test]
    async fn test_unknown_preset_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let (generator, _calls) = generator(dir.path());

        let mut req = request();
        req.preset = "no_such_preset".to_string();
        let err = generator.generate(&req).await.unwrap_err();
        assert!(err.is_client_error());
    }

    #[test]
    fn test_theme_rotation_by_iso_week() {
        let preset = get_preset("devotional").unwrap();
        // 2026-01-08 falls in ISO week 2
        let date = Utc.with_ymd_and_hms(2026, 1, 8, 12, 0, 0).unwrap();
        assert_eq!(theme_for_date(preset, date), preset.default_themes[2 % 12]);
        // One week later moves one theme forward
        let next = Utc.with_ymd_and_hms(2026, 1, 15, 12, 0, 0).unwrap();
        assert_eq!(theme_for_date(preset, next), preset.default_themes[3 % 12]);
    }

    #[test]
    fn test_parse_numbered_list() {
        let text = "1. First title\n2) Second title\n\n3. Third title\n4. Extra";
        assert_eq!(
            parse_numbered_list(text, 3),
            vec!["First title", "Second title", "Third title"]
        );
        // Unnumbered lines pass through, year-like prefixes survive
        assert_eq!(
            parse_numbered_list("Plain line\n2024 best tools", 3),
            vec!["Plain line", "2024 best tools"]
        );
    }

    #[test]
    fn test_script_hash_is_stable_fingerprint() {
        let a = script_hash("HOOK: hello");
        let b = script_hash("HOOK: hello");
        let c = script_hash("HOOK: goodbye");
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert_eq!(a.len(), 16);
    }
}
