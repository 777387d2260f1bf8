//! # Chatstats
//!
//! A Rust library for turning exported chat transcripts into a structured,
//! row-per-message record and the statistics built on it.
//!
//! ## Overview
//!
//! Chat exports are not one well-specified format: timestamp layouts, AM/PM
//! versus 24h clocks, separators and locale punctuation vary by app version,
//! and a message may span several physical lines. Chatstats handles this
//! with a configurable pipeline:
//!
//! 1. [`grammar`] decides whether a line starts a message
//! 2. [`segmenter`] folds continuation lines into the open message
//! 3. [`features`] extracts author, timestamp, kind, links, emoji and word count
//! 4. [`table`] assembles rows and derives calendar fields
//! 5. [`stats`] computes aggregate counts, per-author breakdowns and rankings
//!
//! ## Quick Start
//!
//! ```rust
//! use chatstats::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let transcript = "\
//! 12/01/23, 9:00 AM - Alice: Hello there https://x.co 😀
//! a second line for Alice
//! 12/01/23, 9:05 AM - Bob: <Media omitted>
//! 12/01/23, 9:10 AM - Group created";
//!
//!     let analyzer = Analyzer::new(AnalyzerConfig::default())?;
//!     let analysis = analyzer.analyze_str(transcript)?;
//!
//!     assert_eq!(analysis.record.len(), 3);
//!     assert_eq!(analysis.aggregate.total_members, 2);
//!
//!     let alice = analyzer.stats().author_breakdown(&analysis.record, "Alice")?;
//!     assert_eq!(alice.link_count, 1);
//!     Ok(())
//! }
//! ```
//!
//! ## Module Structure
//!
//! - [`config`] - [`AnalyzerConfig`](config::AnalyzerConfig), [`Preset`](config::Preset), [`AppConfig`](config::AppConfig)
//! - [`grammar`] - [`LineGrammar`](grammar::LineGrammar), [`detect_preset`](grammar::detect_preset)
//! - [`datetime`] - [`DatetimeResolver`](datetime::DatetimeResolver)
//! - [`segmenter`] - [`MessageSegmenter`](segmenter::MessageSegmenter), [`RawMessage`](segmenter::RawMessage)
//! - [`features`] - [`FeatureExtractor`](features::FeatureExtractor)
//! - [`message`] - [`ExtractedMessage`](message::ExtractedMessage), [`MessageKind`](message::MessageKind)
//! - [`table`] - [`TableBuilder`](table::TableBuilder), [`StructuredRecord`](table::StructuredRecord)
//! - [`stats`] - [`StatisticsEngine`](stats::StatisticsEngine), [`rank_by`](stats::rank_by)
//! - [`filter`] - [`FilterConfig`](filter::FilterConfig), [`apply_filters`](filter::apply_filters)
//! - [`analyzer`] - [`Analyzer`](analyzer::Analyzer), the whole pipeline
//! - [`output`] / [`format`] - CSV, JSON and JSONL export
//! - [`error`] - [`ChatstatsError`], [`Result`]
//!
//! ## Feature Flags
//!
//! | Feature | Enables |
//! |---------|---------|
//! | `csv-output` | CSV export |
//! | `json-output` | JSON and JSONL export |
//! | `yaml-config` | Loading [`AppConfig`](config::AppConfig) from YAML |
//! | `cli` | The `chatstats` binary |
//! | `gen-test` | The `gen_transcript` synthetic data binary |

pub mod analyzer;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod datetime;
pub mod error;
pub mod features;
pub mod filter;
pub mod format;
pub mod grammar;
pub mod message;
pub mod output;
pub mod segmenter;
pub mod stats;
pub mod table;

// Re-export the main types at the crate root for convenience
pub use error::{ChatstatsError, Result};
pub use message::{ExtractedMessage, MessageKind};

/// Convenient re-exports for common usage.
///
/// ```rust
/// use chatstats::prelude::*;
/// ```
pub mod prelude {
    pub use crate::analyzer::{Analysis, Analyzer};
    pub use crate::config::{AnalyzerConfig, AppConfig, EmojiRange, Preset};
    pub use crate::error::{ChatstatsError, Result};
    pub use crate::filter::{FilterConfig, apply_filters};
    pub use crate::format::{OutputFormat, to_format_string, write_to_format};
    pub use crate::grammar::{LineGrammar, LineKind, detect_preset};
    pub use crate::message::{ExtractedMessage, MessageKind};
    pub use crate::segmenter::{MessageSegmenter, OrphanLine, RawMessage};
    pub use crate::stats::{AggregateStats, AuthorStats, RankEntry, StatisticsEngine};
    pub use crate::table::{StructuredRecord, TableBuilder};

    #[cfg(feature = "csv-output")]
    pub use crate::output::{to_csv, write_csv};
    #[cfg(feature = "json-output")]
    pub use crate::output::{to_json, to_jsonl, write_json, write_jsonl};
}
