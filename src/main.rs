//! # chatstats CLI
//!
//! Command-line front end for the chatstats library.

use std::fmt::Display;
use std::process;
use std::time::Instant;

use clap::Parser as ClapParser;
use tracing_subscriber::EnvFilter;

use chatstats::analyzer::Analyzer;
use chatstats::cli::{Args, PresetChoice};
use chatstats::config::AppConfig;
use chatstats::filter::{FilterConfig, apply_filters};
use chatstats::format::{OutputFormat, write_to_format};
use chatstats::stats::{AuthorStats, RankEntry, Rankings};
use chatstats::{ChatstatsError, Result};

fn main() {
    if let Err(e) = run() {
        eprintln!("❌ Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let total_start = Instant::now();
    let args = <Args as ClapParser>::parse();

    let app_config = match &args.config {
        Some(path) => AppConfig::from_path(path)?,
        None => AppConfig::default(),
    };
    init_logging(&app_config.logging.level);

    println!("📊 chatstats v{}", env!("CARGO_PKG_VERSION"));
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("📂 Input:   {}", args.input);

    let bytes = std::fs::read(&args.input)?;
    let text = String::from_utf8(bytes).map_err(|source| ChatstatsError::Utf8 {
        context: args.input.clone(),
        source,
    })?;

    let mut base = app_config.transcript;
    if args.lenient {
        base = base.with_strict_header(false);
    }

    let analyzer = match args.preset {
        PresetChoice::Fixed(preset) => Analyzer::new(base.with_preset(preset))?,
        PresetChoice::Auto if args.config.is_some() => Analyzer::new(base)?,
        PresetChoice::Auto => Analyzer::auto(base, &text)?,
    };
    println!("🧭 Layout:  {}", describe_layout(&args, &analyzer));

    let mut filter = FilterConfig::new();
    if let Some(after) = &args.after {
        filter = filter.with_date_from(after)?;
        println!("📅 After:   {}", after);
    }
    if let Some(before) = &args.before {
        filter = filter.with_date_to(before)?;
        println!("📅 Before:  {}", before);
    }
    println!();

    let parse_start = Instant::now();
    let analysis = analyzer.analyze_str(&text)?;
    println!(
        "   Found {} messages ({:.2}s)",
        analysis.record.len(),
        parse_start.elapsed().as_secs_f64()
    );
    if !analysis.orphans.is_empty() {
        println!("⚠️  Discarded {} lines before the first message", analysis.orphans.len());
    }
    let malformed = analysis.record.malformed_count();
    if malformed > 0 {
        println!("⚠️  {} messages have an unparsable timestamp", malformed);
    }

    let (record, aggregate) = if filter.is_active() {
        let record = apply_filters(&analysis.record, &filter);
        println!("🔍 {} messages after filtering", record.len());
        let aggregate = analyzer.stats().aggregate(&record);
        (record, aggregate)
    } else {
        (analysis.record, analysis.aggregate)
    };

    println!();
    println!("💬 {}", aggregate.group_name);
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   Total messages: {}", aggregate.total_messages);
    println!("   Total members:  {}", aggregate.total_members);
    println!("   Media shared:   {}", aggregate.media_message);
    println!("   Links shared:   {}", aggregate.link_shared);

    println!();
    println!("👤 Individual stats:");
    match &args.author {
        Some(author) => print_author(&analyzer.stats().author_breakdown(&record, author)?),
        None => {
            for stats in analyzer.stats().author_breakdowns(&record) {
                print_author(&stats);
            }
        }
    }

    let rankings = match args.top {
        Some(top) => analyzer.stats().rankings_with_limit(&record, top),
        None => analyzer.stats().rankings(&record),
    };
    print_rankings(&rankings);

    if let Some(output) = &args.output {
        let format = match args.format {
            Some(format) => format,
            None => OutputFormat::from_path(output)?,
        };
        println!();
        println!("💾 Writing {}...", format);
        write_to_format(&record, output, format)?;
        println!("✅ Record saved to {}", output);
    }

    println!();
    println!("⚡ Total time: {:.2}s", total_start.elapsed().as_secs_f64());
    Ok(())
}

/// Installs the fmt subscriber on stderr; `RUST_LOG` overrides the
/// configured level.
fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn describe_layout(args: &Args, analyzer: &Analyzer) -> String {
    match args.preset {
        PresetChoice::Fixed(preset) => preset.to_string(),
        PresetChoice::Auto if args.config.is_some() => "from config".to_string(),
        PresetChoice::Auto => match analyzer.detected_preset() {
            Some(preset) => format!("{preset} (detected)"),
            None => "default".to_string(),
        },
    }
}

fn print_author(stats: &AuthorStats) {
    println!(
        "   {:<20} {:>6} msgs {:>6} words {:>5} emoji {:>5} links {:>6.2} words/msg",
        stats.author,
        stats.message_count,
        stats.word_count,
        stats.emoji_count,
        stats.link_count,
        stats.average_words_per_message
    );
}

fn print_rankings(rankings: &Rankings) {
    print_ranking("📈 Most active members", &rankings.most_active_members);
    print_ranking("⌛ Most active weekdays", &rankings.most_active_weekdays);
    print_ranking("⌚ Most active hours", &rankings.most_active_hours);
    print_ranking("🗓️  Most active days of month", &rankings.most_active_days_of_month);
    print_ranking("🕑 Most active times", &rankings.most_active_times);
    print_ranking("🔤 Most words", &rankings.top_word_users);
    print_ranking("🖼️  Top media contributors", &rankings.top_media_contributors);
    print_ranking("🔗 Top link sharers", &rankings.top_link_sharers);
    print_ranking("😀 Emoji", &rankings.emoji_frequency);
    println!();
    println!("⏰ Active dates: {}", rankings.messages_per_date.len());
    if let (Some(first), Some(last)) = (
        rankings.messages_per_date.first(),
        rankings.messages_per_date.last(),
    ) {
        println!("   {} .. {}", first.key, last.key);
    }
}

fn print_ranking<K: Display>(title: &str, entries: &[RankEntry<K>]) {
    if entries.is_empty() {
        return;
    }
    println!();
    println!("{}:", title);
    for (position, entry) in entries.iter().enumerate() {
        println!("   {:>2}. {:<24} {}", position + 1, entry.key.to_string(), entry.count);
    }
}
