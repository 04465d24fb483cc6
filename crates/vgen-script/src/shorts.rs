//! Rule-based shorts derivation.
//!
//! Shorts are cut deterministically from an already-generated long-form
//! script: no model calls, no randomness. Candidate sections are the
//! substantive ones (not HOOK/PROMISE/RECAP/CTA), picked evenly across the
//! script so a 3-short run samples the beginning, middle, and end.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing::debug;

use vgen_models::{Preset, Section, ShortSegment};

/// Sections below this word count are never worth a short.
const MIN_SECTION_WORDS: usize = 30;
/// Relaxed floor used when the strict filter leaves too few candidates.
const RELAXED_MIN_WORDS: usize = 20;
/// Hard bounds on how many shorts one script yields.
const MIN_SHORTS: usize = 1;
const MAX_SHORTS: usize = 8;

const HOOK_SENTENCE_WINDOW: usize = 200;
const HOOK_FALLBACK_CHARS: usize = 150;
const BODY_WORD_LIMIT: usize = 120;
const BODY_FALLBACK_CHARS: usize = 500;
const CAPTION_MAX_CHARS: usize = 60;
const BROLL_PER_SHORT: usize = 3;

/// What a shorts-only dry run would cost: nothing, derivation is local.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct DryRunEstimate {
    pub shorts_count: usize,
    pub api_calls_required: usize,
}

/// Derive up to `count` shorts from parsed script sections.
///
/// Returns fewer than `count` when the script does not have enough
/// substantive sections, and an empty vec when it has none at all.
pub fn derive_shorts(sections: &[Section], preset: &Preset, count: u32) -> Vec<ShortSegment> {
    let mut candidates: Vec<&Section> = sections
        .iter()
        .filter(|s| !s.is_structural() && s.word_count() >= MIN_SECTION_WORDS)
        .collect();

    let requested = (count as usize).clamp(MIN_SHORTS, MAX_SHORTS);
    if candidates.len() < requested {
        candidates = sections
            .iter()
            .filter(|s| !s.is_structural() && s.word_count() >= RELAXED_MIN_WORDS)
            .collect();
    }
    if candidates.is_empty() {
        debug!("no substantive sections, deriving zero shorts");
        return Vec::new();
    }

    let take = requested.min(candidates.len());
    debug!(requested, available = candidates.len(), take, "deriving shorts");

    (0..take)
        .map(|i| {
            let section = candidates[i * candidates.len() / take];
            build_short(section, preset, i)
        })
        .collect()
}

/// Estimate a shorts run before any script exists. Derivation is local,
/// so the call count is always zero; the produced count may still come in
/// lower if the eventual script lacks enough substantive sections.
pub fn estimate_dry_run(count: u32) -> DryRunEstimate {
    DryRunEstimate {
        shorts_count: (count as usize).clamp(MIN_SHORTS, MAX_SHORTS),
        api_calls_required: 0,
    }
}

fn build_short(section: &Section, preset: &Preset, index: usize) -> ShortSegment {
    let content = section.content.trim();
    let hook = extract_hook(content);
    let remainder = content[hook.len()..].trim_start();
    let body = extract_body(remainder);
    let cta = preset.shorts_cta.clone();

    let caption_text = if hook.chars().count() <= CAPTION_MAX_CHARS {
        hook.clone()
    } else {
        let truncated: String = hook.chars().take(CAPTION_MAX_CHARS - 3).collect();
        format!("{}...", truncated.trim_end())
    };

    let pool = &preset.broll_keywords;
    let broll_keywords: Vec<String> = (0..BROLL_PER_SHORT)
        .map(|j| pool[(index * BROLL_PER_SHORT + j) % pool.len()].clone())
        .collect();

    let estimated_words = word_count(&hook) + word_count(&body) + word_count(&cta);

    ShortSegment {
        title: short_title(section, index),
        hook,
        body,
        cta,
        caption_text,
        broll_keywords,
        source_section: section.title.clone(),
        estimated_words,
    }
}

/// First sentence if it ends within the opening window, otherwise a
/// fixed-length prefix cut at a char boundary.
fn extract_hook(content: &str) -> String {
    let window: String = content.chars().take(HOOK_SENTENCE_WINDOW).collect();
    if let Some(pos) = window.find(['.', '!', '?']) {
        return window[..=pos].trim().to_string();
    }
    content
        .chars()
        .take(HOOK_FALLBACK_CHARS)
        .collect::<String>()
        .trim()
        .to_string()
}

fn extract_body(remainder: &str) -> String {
    let words: Vec<&str> = remainder.split_whitespace().collect();
    if !words.is_empty() {
        words[..words.len().min(BODY_WORD_LIMIT)].join(" ")
    } else {
        remainder.chars().take(BODY_FALLBACK_CHARS).collect()
    }
}

/// Section title with the `SECTION N:` prefix stripped, or a positional
/// fallback when nothing readable remains.
fn short_title(section: &Section, index: usize) -> String {
    let title = section.title.trim();
    let cleaned = title
        .split_once(':')
        .map(|(_, rest)| rest.trim())
        .filter(|rest| !rest.is_empty())
        .unwrap_or(title);
    if cleaned.is_empty() || cleaned.eq_ignore_ascii_case("script") {
        format!("Short {}", index + 1)
    } else {
        cleaned.to_string()
    }
}

fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use vgen_models::get_preset;

    fn long_section(n: usize, words: usize) -> Section {
        let content = (0..words)
            .map(|i| format!("word{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        Section::new(
            format!("SECTION {n}: Topic {n}"),
            format!("This is the point of section {n}. {content}"),
        )
    }

    fn sample_sections() -> Vec<Section> {
        vec![
            Section::new("HOOK:", "A bold claim that stops the scroll right now."),
            Section::new("PROMISE:", "Here is what you will learn in this video."),
            long_section(1, 80),
            long_section(2, 80),
            long_section(3, 80),
            long_section(4, 80),
            Section::new("RECAP:", "Quick summary of everything we covered."),
            Section::new("CTA:", "Subscribe for more and watch the next one."),
        ]
    }

    #[test]
    fn test_requested_count_honoured() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let shorts = derive_shorts(&sample_sections(), preset, 3);
        assert_eq!(shorts.len(), 3);
    }

    #[test]
    fn test_structural_sections_never_selected() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let shorts = derive_shorts(&sample_sections(), preset, 4);
        for short in &shorts {
            assert!(short.source_section.starts_with("SECTION"));
        }
    }

    #[test]
    fn test_count_clamped_to_available() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let sections = vec![
            Section::new("HOOK:", "A bold claim."),
            long_section(1, 80),
            long_section(2, 80),
        ];
        let shorts = derive_shorts(&sections, preset, 8);
        assert_eq!(shorts.len(), 2);
    }

    #[test]
    fn test_count_clamped_to_upper_bound() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let sections: Vec<Section> = (1..=12).map(|n| long_section(n, 80)).collect();
        let shorts = derive_shorts(&sections, preset, 99);
        assert_eq!(shorts.len(), 8);
        // Zero is lifted to the lower bound
        let shorts = derive_shorts(&sections, preset, 0);
        assert_eq!(shorts.len(), 1);
    }

    #[test]
    fn test_relaxed_filter_when_sections_are_thin() {
        let preset = get_preset("finance_ai_saas").unwrap();
        // 22 words each: below the strict floor, above the relaxed one
        let sections = vec![long_section(1, 15), long_section(2, 15)];
        assert!(sections[0].word_count() < MIN_SECTION_WORDS);
        assert!(sections[0].word_count() >= RELAXED_MIN_WORDS);
        let shorts = derive_shorts(&sections, preset, 2);
        assert_eq!(shorts.len(), 2);
    }

    #[test]
    fn test_no_candidates_yields_nothing() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let sections = vec![
            Section::new("HOOK:", "Just a hook."),
            Section::new("SECTION 1: Tiny", "Too short."),
        ];
        assert!(derive_shorts(&sections, preset, 3).is_empty());
    }

    #[test]
    fn test_selection_spreads_across_script() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let sections: Vec<Section> = (1..=6).map(|n| long_section(n, 80)).collect();
        let shorts = derive_shorts(&sections, preset, 3);
        let sources: Vec<&str> = shorts.iter().map(|s| s.source_section.as_str()).collect();
        // floor(i * 6 / 3) picks indices 0, 2, 4
        assert_eq!(
            sources,
            vec!["SECTION 1: Topic 1", "SECTION 3: Topic 3", "SECTION 5: Topic 5"]
        );
    }

    #[test]
    fn test_hook_is_first_sentence() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let shorts = derive_shorts(&sample_sections(), preset, 1);
        assert_eq!(shorts[0].hook, "This is the point of section 1.");
        assert!(shorts[0].body.starts_with("word0"));
    }

    #[test]
    fn test_caption_respects_limit() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let long_first_sentence = format!(
            "SECTION 1 opener that just keeps going and going far past any caption budget {}.",
            "on and on"
        );
        let sections = vec![Section::new(
            "SECTION 1: Long opener",
            format!("{long_first_sentence} {}", "filler ".repeat(60)),
        )];
        let shorts = derive_shorts(&sections, preset, 1);
        assert!(shorts[0].caption_text.chars().count() <= CAPTION_MAX_CHARS);
        assert!(shorts[0].caption_text.ends_with("..."));
    }

    #[test]
    fn test_broll_keywords_cycle() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let sections: Vec<Section> = (1..=8).map(|n| long_section(n, 80)).collect();
        let shorts = derive_shorts(&sections, preset, 4);
        let pool = &preset.broll_keywords;
        for (i, short) in shorts.iter().enumerate() {
            assert_eq!(short.broll_keywords.len(), 3);
            for (j, kw) in short.broll_keywords.iter().enumerate() {
                assert_eq!(kw, &pool[(i * 3 + j) % pool.len()]);
            }
        }
    }

    #[test]
    fn test_cta_and_word_estimate() {
        let preset = get_preset("devotional").unwrap();
        let shorts = derive_shorts(&sample_sections(), preset, 1);
        let short = &shorts[0];
        assert_eq!(short.cta, preset.shorts_cta);
        let expected = short.hook.split_whitespace().count()
            + short.body.split_whitespace().count()
            + short.cta.split_whitespace().count();
        assert_eq!(short.estimated_words, expected);
    }

    #[test]
    fn test_deterministic() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let sections = sample_sections();
        let a = derive_shorts(&sections, preset, 3);
        let b = derive_shorts(&sections, preset, 3);
        assert_eq!(a, b);
    }

    #[test]
    fn test_dry_run_costs_nothing() {
        let estimate = estimate_dry_run(3);
        assert_eq!(estimate.shorts_count, 3);
        assert_eq!(estimate.api_calls_required, 0);
        // Out-of-range requests report the clamped count
        assert_eq!(estimate_dry_run(99).shorts_count, 8);
        assert_eq!(estimate_dry_run(0).shorts_count, 1);
    }

    #[test]
    fn test_title_strips_section_prefix() {
        let preset = get_preset("finance_ai_saas").unwrap();
        let shorts = derive_shorts(&sample_sections(), preset, 1);
        assert_eq!(shorts[0].title, "Topic 1");
    }
}
