//! Command-line interface definition using clap.
//!
//! - [`Args`] - CLI arguments
//! - [`PresetChoice`] - `auto` or a fixed export layout

use std::fmt;
use std::str::FromStr;

use clap::Parser;

use crate::config::Preset;
use crate::format::OutputFormat;

/// Turn an exported chat transcript into per-message rows and group
/// statistics.
#[derive(Parser, Debug, Clone)]
#[command(name = "chatstats")]
#[command(version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    chatstats chat.txt
    chatstats chat.txt --author Alice
    chatstats chat.txt --preset ios-bracketed --top 5
    chatstats chat.txt --after 2024-01-01 -o rows.csv
    chatstats chat.txt -c chatstats.yml -o rows.jsonl")]
pub struct Args {
    /// Path to the exported transcript
    pub input: String,

    /// YAML configuration document (transcript + logging sections)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<String>,

    /// Export layout, or `auto` to detect it from the first lines
    #[arg(long, default_value = "auto")]
    pub preset: PresetChoice,

    /// Show the breakdown of one author only
    #[arg(long, value_name = "NAME")]
    pub author: Option<String>,

    /// Length of every ranking
    #[arg(long, value_name = "N")]
    pub top: Option<usize>,

    /// Keep messages on or after this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub after: Option<String>,

    /// Keep messages on or before this date (YYYY-MM-DD)
    #[arg(long, value_name = "DATE")]
    pub before: Option<String>,

    /// Write the structured record to this file
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<String>,

    /// Format of the written record (defaults to the output extension)
    #[arg(short, long, value_enum)]
    pub format: Option<OutputFormat>,

    /// Discard unrecognized lines before the first message instead of failing
    #[arg(long)]
    pub lenient: bool,
}

/// Layout selection for the `--preset` flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PresetChoice {
    /// Score the first lines against every preset
    #[default]
    Auto,
    /// Use this layout
    Fixed(Preset),
}

impl FromStr for PresetChoice {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("auto") {
            return Ok(PresetChoice::Auto);
        }
        s.parse::<Preset>().map(PresetChoice::Fixed)
    }
}

impl fmt::Display for PresetChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PresetChoice::Auto => write!(f, "auto"),
            PresetChoice::Fixed(preset) => write!(f, "{preset}"),
        }
    }
}
