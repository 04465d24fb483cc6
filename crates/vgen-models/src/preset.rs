//! Content niche presets and the static registry.
//!
//! A preset bundles everything that differs between channels: prompt
//! templates, theme rotation, b-roll keyword pool, and platform packaging
//! cues. Presets are built once at first use and never mutated.

use std::fmt;
use std::sync::LazyLock;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Platform-specific packaging guidance attached to generated content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct PlatformCues {
    pub youtube_long: String,
    pub youtube_shorts: String,
    pub instagram_reels: String,
}

/// Static configuration for one content niche.
///
/// Prompt templates use `{theme}`, `{duration_minutes}` and
/// `{words_per_minute}` placeholders, substituted by the pipeline.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct Preset {
    /// Registry key, e.g. `"finance_ai_saas"`.
    pub name: String,
    pub channel_description: String,

    /// Target long-form video length.
    pub duration_minutes: u32,

    /// System role for long-form script generation.
    pub long_form_system_prompt: String,
    /// User prompt template enforcing the HOOK/PROMISE/SECTION/RECAP/CTA layout.
    pub long_form_user_template: String,

    /// Prompt template asking for exactly 3 title options.
    pub title_prompt_template: String,
    /// Prompt template asking for exactly 3 thumbnail text options.
    pub thumbnail_prompt_template: String,

    pub platform_cues: PlatformCues,

    /// Weekly theme rotation (indexed by ISO week).
    pub default_themes: Vec<String>,

    /// B-roll keyword pool cycled across derived shorts.
    pub broll_keywords: Vec<String>,

    /// Closing line stamped on every derived short.
    pub shorts_cta: String,

    /// Editing guidance for whoever renders the derived shorts.
    pub shorts_guidance: String,
}

impl Preset {
    /// Reject presets with missing required fields at load time, rather than
    /// failing deep inside generation.
    pub fn validate(&self) -> Result<(), PresetValidationError> {
        let mut missing = Vec::new();
        if self.name.trim().is_empty() {
            missing.push("name");
        }
        if self.long_form_system_prompt.trim().is_empty() {
            missing.push("long_form_system_prompt");
        }
        if self.long_form_user_template.trim().is_empty() {
            missing.push("long_form_user_template");
        }
        if self.title_prompt_template.trim().is_empty() {
            missing.push("title_prompt_template");
        }
        if self.thumbnail_prompt_template.trim().is_empty() {
            missing.push("thumbnail_prompt_template");
        }
        if self.default_themes.is_empty() {
            missing.push("default_themes");
        }
        if self.broll_keywords.is_empty() {
            missing.push("broll_keywords");
        }
        if self.shorts_cta.trim().is_empty() {
            missing.push("shorts_cta");
        }
        if self.duration_minutes == 0 {
            missing.push("duration_minutes");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(PresetValidationError {
                preset: self.name.clone(),
                fields: missing.join(", "),
            })
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

#[derive(Debug, Error)]
#[error("Unknown preset '{0}'. Valid options: finance_ai_saas, devotional")]
pub struct UnknownPresetError(pub String);

#[derive(Debug, Error)]
#[error("Preset '{preset}' is missing required fields: {fields}")]
pub struct PresetValidationError {
    pub preset: String,
    pub fields: String,
}

/// Look up a preset by name (case-insensitive, `-` treated as `_`).
pub fn get_preset(name: &str) -> Result<&'static Preset, UnknownPresetError> {
    let key = name.to_lowercase().replace('-', "_");
    PRESETS
        .iter()
        .find(|p| p.name == key)
        .ok_or_else(|| UnknownPresetError(name.to_string()))
}

/// All registered preset names.
pub fn list_presets() -> Vec<&'static str> {
    PRESETS.iter().map(|p| p.name.as_str()).collect()
}

static PRESETS: LazyLock<Vec<Preset>> = LazyLock::new(|| {
    let presets = vec![finance_ai_saas(), devotional()];
    for preset in &presets {
        if let Err(e) = preset.validate() {
            panic!("built-in preset failed validation: {e}");
        }
    }
    presets
});

fn finance_ai_saas() -> Preset {
    Preset {
        name: "finance_ai_saas".to_string(),
        channel_description: "A faceless YouTube/Instagram channel covering AI tools, SaaS \
             products, passive income strategies, and personal finance, optimised for retention."
            .to_string(),
        duration_minutes: 8,
        long_form_system_prompt: "You are an expert content strategist and scriptwriter for a faceless YouTube \
             channel focused on AI tools, SaaS businesses, and passive income. \
             Your scripts are engaging, data-driven, and optimised for retention. \
             Use a conversational yet authoritative tone. \
             Never use filler phrases; every sentence must earn its place."
            .to_string(),
        long_form_user_template: "Write a {duration_minutes}-minute YouTube script on the topic: {theme}\n\n\
             Use this EXACT retention-first structure:\n\
             HOOK (0-30 s): Open with a bold claim or surprising stat that stops the scroll.\n\
             PROMISE (30-60 s): Tell viewers exactly what they will learn and why it matters.\n\
             SECTION 1: [First major point with proof/example]\n\
             SECTION 2: [Second major point with proof/example]\n\
             SECTION 3: [Third major point with proof/example]\n\
             SECTION 4: [Fourth major point with proof/example] (add more sections as needed)\n\
             RECAP: Bullet-point summary of the key takeaways (30 s).\n\
             CTA: Tell viewers to like, subscribe, and watch the next recommended video (20 s).\n\n\
             Requirements:\n\
             - Each SECTION header must be on its own line as: SECTION N: [Title]\n\
             - Aim for ~{words_per_minute} words per minute of narration.\n\
             - Include at least one concrete case study or real-world example.\n\
             - Keep language accessible to a general audience.\n\
             - Content must be 100% original and copyright-safe."
            .to_string(),
        title_prompt_template: "Generate exactly 3 compelling YouTube titles for a video about: {theme}\n\
             Channel niche: AI tools, SaaS, passive income.\n\
             Rules: under 70 characters, include a power word or number, no clickbait.\n\
             Return ONLY the 3 titles, one per line, numbered 1-3."
            .to_string(),
        thumbnail_prompt_template: "Generate exactly 3 thumbnail text options for a YouTube video about: {theme}\n\
             Channel niche: AI tools, SaaS, passive income.\n\
             Rules: max 5 words per option, bold & punchy, conveys urgency or curiosity.\n\
             Return ONLY the 3 options, one per line, numbered 1-3."
            .to_string(),
        platform_cues: PlatformCues {
            youtube_long: "16:9 widescreen. Use chapter markers matching each SECTION. \
                 End-screen card at final 20 s. Closed-caption SRT recommended."
                .to_string(),
            youtube_shorts: "9:16 vertical. Max 60 s. First 3 s must show the hook on-screen as \
                 bold text. Add captions burned-in or as SRT. No intro music longer than 1 s."
                .to_string(),
            instagram_reels: "9:16 vertical. Max 90 s. Hook in first 2 s. Add on-screen captions \
                 at bottom third. Safe zone: keep text within centre 80%."
                .to_string(),
        },
        default_themes: [
            "5 AI Tools That Replace a Full Marketing Team",
            "How to Build a $5k/Month SaaS With No Code",
            "Passive Income With AI: 7 Real Strategies",
            "ChatGPT Side Hustles That Actually Work in 2025",
            "Best Free AI Tools for Entrepreneurs",
            "How to Automate Your Business With AI Agents",
            "Top SaaS Trends to Watch This Year",
            "Building a Personal Finance Dashboard With AI",
            "AI for Investing: What You Need to Know",
            "Productize Your Skills: Turning Expertise Into SaaS",
            "Zero-Budget Marketing With AI Tools",
            "How to Validate a SaaS Idea in 24 Hours",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        broll_keywords: [
            "laptop screen code",
            "dashboard analytics",
            "money passive income",
            "AI robot technology",
            "smartphone app startup",
            "office entrepreneur",
            "chart growth business",
            "coffee work remote",
            "dollar bills finance",
            "server cloud computing",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        shorts_cta: "Follow for more AI and money tips!".to_string(),
        shorts_guidance: "Fast cuts every 2-3 s. Bold captions with key numbers highlighted. \
             Upbeat royalty-free track at 20% volume."
            .to_string(),
    }
}

fn devotional() -> Preset {
    Preset {
        name: "devotional".to_string(),
        channel_description: "A faceless YouTube/Instagram channel featuring Radha Krishna devotional content: \
             peaceful meditation scripts, spiritual teachings, and bhakti reflections."
            .to_string(),
        duration_minutes: 30,
        long_form_system_prompt: "You are a spiritual guide creating devotional content about Radha Krishna. \
             Your content is peaceful, uplifting, and appropriate for meditation and \
             spiritual reflection."
            .to_string(),
        long_form_user_template: "Create a {duration_minutes}-minute devotional meditation script about Radha Krishna.\n\n\
             Theme: {theme}\n\n\
             Use this EXACT retention-first structure:\n\
             HOOK: Open with a beautiful verse, story, or question that invites stillness.\n\
             PROMISE: Briefly tell listeners what spiritual insight they will receive today.\n\
             SECTION 1: [Opening invocation / setting the devotional mood]\n\
             SECTION 2: [Core teaching or story related to the theme]\n\
             SECTION 3: [Deepening reflection and personal application]\n\
             SECTION 4: [Mantra, kirtan suggestion, or guided visualisation]\n\
             RECAP: Summarise the main spiritual insight in 3-5 sentences.\n\
             CTA: Invite listeners to share the video, subscribe, and join the community.\n\n\
             Requirements:\n\
             - Each SECTION header on its own line: SECTION N: [Title]\n\
             - Calming, reverent tone throughout.\n\
             - Include references to Radha, Krishna, or Bhagavad Gita where natural.\n\
             - Approximately {words_per_minute} words per minute.\n\
             - 100% original and copyright-safe."
            .to_string(),
        title_prompt_template: "Generate exactly 3 YouTube titles for a devotional video about: {theme}\n\
             Channel niche: Radha Krishna devotion, spirituality, meditation.\n\
             Rules: under 70 characters, evoke peace/devotion, no sensational claims.\n\
             Return ONLY the 3 titles, one per line, numbered 1-3."
            .to_string(),
        thumbnail_prompt_template: "Generate exactly 3 thumbnail text options for a devotional video about: {theme}\n\
             Channel niche: Radha Krishna devotion, spirituality, meditation.\n\
             Rules: max 5 words, peaceful and inviting, suitable for spiritual audience.\n\
             Return ONLY the 3 options, one per line, numbered 1-3."
            .to_string(),
        platform_cues: PlatformCues {
            youtube_long: "16:9 widescreen. Gentle Ken-Burns effect on images. \
                 Soft background music at 10-20% volume. End-screen card at final 20 s. \
                 Timestamps for each section recommended."
                .to_string(),
            youtube_shorts: "9:16 vertical. Max 60 s. Show hook text on screen for first 3 s. \
                 Soft ambient audio. Burned-in Sanskrit or translated verse as caption."
                .to_string(),
            instagram_reels: "9:16 vertical. Max 90 s. Calming transition between visuals. \
                 On-screen captions for accessibility. Safe zone: keep text within centre 80% of frame."
                .to_string(),
        },
        default_themes: [
            "The Divine Love of Radha and Krishna",
            "Krishna's Teachings on Dharma",
            "Radha's Devotion and Surrender",
            "The Flute of Krishna - Call to the Soul",
            "Rasleela - The Divine Dance",
            "Krishna's Childhood - Innocence and Joy",
            "Radha's Separation - Deepening Devotion",
            "Krishna as the Supreme Friend",
            "The Gopis' Love - Pure Devotion",
            "Krishna's Message in the Bhagavad Gita",
            "Radha's Grace and Compassion",
            "The Yamuna River - Sacred Waters",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        broll_keywords: [
            "hindu temple",
            "lotus flower",
            "diya lamp",
            "peacock feather",
            "sunrise spiritual",
            "meditation nature",
            "indian spiritual",
            "sacred geometry",
            "mandala art",
            "spiritual light",
        ]
        .iter()
        .map(|s| s.to_string())
        .collect(),
        shorts_cta: "Follow for daily devotional wisdom.".to_string(),
        shorts_guidance: "Slow, gentle transitions. Verse text centred on screen. \
             Soft flute or ambient pad underneath the narration."
            .to_string(),
    }
}
