//! `vgen` command line interface.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use vgen_models::{CostTier, GenerateRequest, OutputType};
use vgen_pipeline::{ContentGenerator, GenerateResult, PipelineConfig};

#[derive(Parser)]
#[command(name = "vgen", version, about = "Faceless content generation pipeline")]
struct Cli {
    /// Override the cache directory
    #[arg(long, global = true)]
    cache_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a long-form script and/or shorts for a preset
    Generate {
        /// Preset name, e.g. finance_ai_saas or devotional
        #[arg(long)]
        preset: String,

        /// What to produce: long, shorts, or both
        #[arg(long, default_value = "both")]
        output: OutputType,

        /// Cost tier: free, low_cost, or quality
        #[arg(long, default_value = "free")]
        tier: CostTier,

        /// Topic override; defaults to this week's rotation entry
        #[arg(long)]
        theme: Option<String>,

        /// How many shorts to derive (1-8)
        #[arg(long, default_value_t = 3)]
        shorts_count: u32,

        /// Estimate cost without calling any provider
        #[arg(long)]
        dry_run: bool,

        /// Write the full result to this file instead of the default name
        #[arg(long, short)]
        out: Option<PathBuf>,
    },

    /// Show cache entry counts and size
    CacheStats,

    /// Remove cached entries
    CacheClear {
        /// Only clear one namespace (scripts, shorts)
        #[arg(long)]
        namespace: Option<String>,
    },

    /// List available presets
    Presets,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .init();

    let cli = Cli::parse();

    let mut config = PipelineConfig::from_env()?;
    if let Some(dir) = cli.cache_dir {
        config.cache_dir = dir;
    }
    let generator = ContentGenerator::from_config(&config);

    match cli.command {
        Command::Generate {
            preset,
            output,
            tier,
            theme,
            shorts_count,
            dry_run,
            out,
        } => {
            let mut request = GenerateRequest::new(preset);
            request.output = output;
            request.tier = tier;
            request.theme = theme;
            request.shorts_count = shorts_count;
            request.dry_run = dry_run;

            let result = generator.generate(&request).await?;
            print_summary(&result);

            if !result.dry_run {
                let path = out.unwrap_or_else(|| default_output_path(&result));
                std::fs::write(&path, serde_json::to_string_pretty(&result)?)
                    .with_context(|| format!("writing {}", path.display()))?;
                println!("\nSaved to {}", path.display());
            }
        }

        Command::CacheStats => {
            let stats = generator.cache().stats()?;
            println!("Cache at {}", generator.cache().root().display());
            for (namespace, count) in &stats.namespaces {
                println!("  {namespace}: {count} entries");
            }
            println!(
                "Total: {} entries, {:.1} KiB",
                stats.total_entries,
                stats.total_bytes as f64 / 1024.0
            );
        }

        Command::CacheClear { namespace } => {
            let removed = generator.cache().clear(namespace.as_deref())?;
            println!("Removed {removed} cache entries");
        }

        Command::Presets => {
            for name in vgen_models::list_presets() {
                let preset = vgen_models::get_preset(name)?;
                println!(
                    "{name}  ({} min, {} themes)\n    {}",
                    preset.duration_minutes,
                    preset.default_themes.len(),
                    preset.channel_description
                );
            }
        }
    }

    Ok(())
}

fn default_output_path(result: &GenerateResult) -> PathBuf {
    PathBuf::from(format!(
        "{}_{}_{}.json",
        result.preset,
        result.output,
        result.generated_at.format("%Y%m%d_%H%M%S")
    ))
}

fn print_summary(result: &GenerateResult) {
    println!("Preset: {}  Theme: {}", result.preset, result.theme);
    println!("Tier: {}  Output: {}", result.tier, result.output);

    if let Some(estimate) = &result.estimate {
        println!(
            "\nDry run: {} API calls, ~${:.4}",
            estimate.total_estimated_api_calls, estimate.total_cost_usd
        );
        for op in &estimate.operations {
            println!(
                "  {}: {} calls, {} in / {} out tokens, ${:.4}",
                op.operation, op.api_calls, op.input_tokens, op.output_tokens, op.cost_usd
            );
        }
        if let Some(shorts) = &result.shorts_estimate {
            println!(
                "  shorts: {} segments, {} API calls",
                shorts.shorts_count, shorts.api_calls_required
            );
        }
        return;
    }

    if let Some(long) = &result.long {
        let source = if long.cached { "cache" } else { "provider" };
        println!(
            "\nLong script: {} sections, {} words ({source})",
            long.sections.len(),
            long.word_count
        );
        if let Some(title) = long.titles.first() {
            println!("  Suggested title: {title}");
        }
    }

    if !result.shorts.is_empty() {
        println!("\nShorts ({}):", result.shorts.len());
        for short in &result.shorts {
            println!("  - {} ({} words)", short.title, short.estimated_words);
        }
    }
}
