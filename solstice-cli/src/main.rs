//! solstice - Summer Wrapped CLI
//!
//! Turns a chat export file into a summer-in-review: stats, topics,
//! keywords, mood, and a shareable slide deck.

use anyhow::{Context, Result};
use chrono::{Datelike, Utc};
use clap::Parser;
use solstice_core::analytics::{SummerMetrics, SummerOptions};
use solstice_core::pipeline::{self, PipelineOutput};
use solstice_core::slides::SlideDescriptor;
use solstice_core::Config;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "solstice")]
#[command(about = "Summer Wrapped - your chat export, June through August")]
#[command(version)]
struct Args {
    /// Path to the export JSON (e.g. conversations.json)
    file: PathBuf,

    /// Year to pin the summer window to (default: auto-selected)
    #[arg(long)]
    year: Option<i32>,

    /// Name or handle given extra keyword weight (repeatable)
    #[arg(long = "alias")]
    aliases: Vec<String>,

    /// Export format (md = markdown, json = JSON)
    #[arg(long)]
    export: Option<String>,

    /// Print the slide deck instead of the stat summary
    #[arg(long)]
    slides: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config = Config::load().context("failed to load configuration")?;
    let _log_guard = solstice_core::logging::init(&config.logging).ok();

    // The pipeline's single suspension point: everything after this
    // await runs synchronously.
    let text = tokio::fs::read_to_string(&args.file)
        .await
        .with_context(|| format!("failed to read {}", args.file.display()))?;
    preflight(&text)?;
    let text = text.strip_prefix('\u{feff}').unwrap_or(&text);

    let mut opts = SummerOptions::new(Utc::now().year());
    opts.year = args.year.or(config.wrapped.year);
    opts.aliases = if args.aliases.is_empty() {
        config.wrapped.aliases.clone()
    } else {
        args.aliases.clone()
    };
    opts.top_keywords = config.wrapped.top_keywords;

    let output = pipeline::run(text, &opts).context("failed to build summer wrapped")?;

    match args.export.as_deref() {
        Some("json") => print_json(&output)?,
        Some("md") => print_markdown(&output.metrics),
        Some(other) => anyhow::bail!("Unknown export format: {}. Use 'md' or 'json'", other),
        None if args.slides => print_slides(&output.slides),
        None => print_terminal(&output.metrics),
    }

    Ok(())
}

/// Reject inputs that are obviously not a JSON export before parsing.
fn preflight(text: &str) -> Result<()> {
    if text.starts_with("PK") {
        anyhow::bail!("This looks like a ZIP archive. Unzip the export first, then pass conversations.json.");
    }
    let trimmed = text.trim_start();
    let head = trimmed.get(..15).unwrap_or(trimmed).to_ascii_lowercase();
    if head.starts_with("<!doctype html") || head.starts_with("<html") {
        anyhow::bail!("This looks like HTML, not JSON. Pick conversations.json from the unzipped export.");
    }
    Ok(())
}

fn print_terminal(metrics: &SummerMetrics) {
    let title = format!("🌞 YOUR {} SUMMER WRAPPED 🌞", metrics.year);

    println!();
    println!("╭{}╮", "─".repeat(60));
    println!("│{:^60}│", title);
    println!("╰{}╯", "─".repeat(60));
    println!();

    if metrics.is_empty_state() {
        println!("  {}", metrics.persona.blurb);
        println!();
        return;
    }

    println!("📊 THE NUMBERS");
    println!(
        "   Prompts:  {:<12} Replies: {}",
        metrics.total_prompts, metrics.total_responses
    );
    println!(
        "   Days:     {:<12} Streak:  {} day{}",
        metrics.unique_days,
        metrics.longest_streak,
        if metrics.longest_streak == 1 { "" } else { "s" }
    );
    if let Some(busiest) = &metrics.busiest_day {
        println!(
            "   Busiest:  {} - {} prompts ({} total)",
            busiest.date.format("%b %d"),
            busiest.prompts,
            busiest.total
        );
    }
    println!();

    if !metrics.topics.is_empty() {
        println!("🏷️  TOP TOPICS");
        for (i, topic) in metrics.topics.iter().take(5).enumerate() {
            let rank = match i {
                0 => "🥇".to_string(),
                1 => "🥈".to_string(),
                2 => "🥉".to_string(),
                _ => format!("{}.", i + 1),
            };
            println!("   {} {:<20} {:>4}", rank, topic.name, topic.value);
        }
        println!();
    }

    if !metrics.keywords.is_empty() {
        println!("🔤 TOP KEYWORDS");
        let names: Vec<&str> = metrics
            .keywords
            .iter()
            .take(8)
            .map(|k| k.name.as_str())
            .collect();
        println!("   {}", names.join(", "));
        println!();
    }

    if !metrics.week_buckets.is_empty() {
        println!("📅 WEEKLY ACTIVITY");
        let peak = metrics
            .week_buckets
            .iter()
            .map(|w| w.count)
            .max()
            .unwrap_or(1)
            .max(1);
        for week in &metrics.week_buckets {
            let bar = "█".repeat(((week.count * 24) / peak) as usize);
            println!("   {:<16} {:<24} {}", week.label, bar, week.count);
        }
        println!();
    }

    println!("🎭 MOOD");
    println!(
        "   Panic spikes: {:<8} Laughs: {}",
        metrics.emotions.panic_count, metrics.emotions.lol_count
    );
    println!();

    if metrics.time_saved_minutes > 0 {
        let hours = metrics.time_saved_minutes / 60;
        let mins = metrics.time_saved_minutes % 60;
        println!("⏱️  TIME SAVED (ROUGHLY)");
        if hours > 0 {
            println!("   ~{}h {}m across the summer", hours, mins);
        } else {
            println!("   ~{}m across the summer", mins);
        }
        println!();
    }

    if let Some(thread) = &metrics.longest_thread {
        println!("🧵 DEEPEST DIVE");
        println!("   \"{}\" - {} turns", thread.title, thread.turns);
        println!();
    }

    if !metrics.accomplishments.is_empty() {
        println!("🚢 THINGS YOU SHIPPED");
        for item in &metrics.accomplishments {
            println!("   {} - {}", item.date.format("%b %d"), item.label);
        }
        println!();
    }

    println!("✨ PERSONA: {}", metrics.persona.blurb);
    for tag in &metrics.persona.tags {
        print!("   #{}", tag);
    }
    println!();
    if !metrics.roast.is_empty() {
        println!();
        println!("🔥 \"{}\"", metrics.roast);
    }
    println!();
}

fn print_markdown(metrics: &SummerMetrics) {
    println!("# 🌞 {} Summer Wrapped", metrics.year);
    println!();
    println!(
        "*{} → {}*",
        metrics.start_date.format("%b %d, %Y"),
        metrics.end_date.format("%b %d, %Y")
    );
    println!();

    if metrics.is_empty_state() {
        println!("*{}*", metrics.persona.blurb);
        return;
    }

    println!("## Summary");
    println!();
    println!("| Metric | Value |");
    println!("|--------|-------|");
    println!("| Prompts | {} |", metrics.total_prompts);
    println!("| Replies | {} |", metrics.total_responses);
    println!("| Active days | {} |", metrics.unique_days);
    println!("| Longest streak | {} days |", metrics.longest_streak);
    if let Some(busiest) = &metrics.busiest_day {
        println!(
            "| Busiest day | {} ({} prompts) |",
            busiest.date.format("%b %d"),
            busiest.prompts
        );
    }
    if metrics.time_saved_minutes > 0 {
        println!("| Time saved | ~{}m |", metrics.time_saved_minutes);
    }
    println!();

    if !metrics.topics.is_empty() {
        println!("## Topics");
        println!();
        for topic in &metrics.topics {
            println!("- **{}** - {}x", topic.name, topic.value);
        }
        println!();
    }

    if !metrics.keywords.is_empty() {
        println!("## Keywords");
        println!();
        for keyword in &metrics.keywords {
            println!("- {} ({})", keyword.name, keyword.value);
        }
        println!();
    }

    if !metrics.accomplishments.is_empty() {
        println!("## Things you shipped");
        println!();
        for item in &metrics.accomplishments {
            println!("- {} - {}", item.date.format("%b %d"), item.label);
        }
        println!();
    }

    println!("## Persona");
    println!();
    println!("{}", metrics.persona.blurb);
    println!();
    if !metrics.roast.is_empty() {
        println!("> {}", metrics.roast);
        println!();
    }

    println!("---");
    println!("*Generated by solstice*");
}

fn print_slides(slides: &[SlideDescriptor]) {
    for (i, slide) in slides.iter().enumerate() {
        println!("{}. [{}] {}", i + 1, slide.id, slide.title);
        if let Some(content) = &slide.content {
            for line in content.lines() {
                println!("     {}", line);
            }
        }
        if let Some(subtext) = &slide.subtext {
            println!("     ({})", subtext);
        }
    }
}

fn print_json(output: &PipelineOutput) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(output)?);
    Ok(())
}
