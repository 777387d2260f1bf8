//! Configuration types for the transcript pipeline.
//!
//! Every format-dependent detail of the pipeline is data, not code:
//!
//! - [`AnalyzerConfig`] - line grammar, timestamp formats, media marker,
//!   URL/emoji detection and author buckets
//! - [`Preset`] - ready-made grammar/format sets for known export layouts
//! - [`AppConfig`] - a whole configuration document (analyzer + logging)
//!
//! # Example
//!
//! ```rust
//! use chatstats::config::{AnalyzerConfig, Preset};
//!
//! let config = AnalyzerConfig::new()
//!     .with_preset(Preset::IosBracketed)
//!     .with_media_marker("image omitted")
//!     .exclude_author("Unknown Number");
//!
//! assert!(config.validate().is_ok());
//! ```

use std::fmt;
use std::str::FromStr;

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{ChatstatsError, Result};

/// Notice sentences that can show up where an author name is expected,
/// e.g. `Bob changed the subject to "plans: june"`. A verb phrase only
/// counts after a leading name.
const SYSTEM_NOTICE_PATTERN: &str = concat!(
    r"^Messages and calls are end-to-end encrypted",
    r"|^\S.*?\s(?:created group|changed the subject|changed the group description|added|removed)\b",
    r"|^Сообщения и звонки защищены сквозным шифрованием",
    r"|^\S.*?\s(?:(?:создал|изменил)(?:а|\(а\))?\s(?:группу|тему|описание группы)\b",
    r"|(?:добавил|удалил)(?:а?\b|\(а\)))",
);

/// An inclusive range of Unicode code points treated as emoji.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRange {
    /// First code point of the range
    pub start: u32,
    /// Last code point of the range (inclusive)
    pub end: u32,
}

impl EmojiRange {
    /// Creates a new inclusive range.
    pub const fn new(start: u32, end: u32) -> Self {
        Self { start, end }
    }

    /// Returns `true` if `c` falls inside this range.
    pub fn contains(&self, c: char) -> bool {
        (self.start..=self.end).contains(&u32::from(c))
    }
}

/// Default emoji blocks.
pub const DEFAULT_EMOJI_RANGES: &[EmojiRange] = &[
    EmojiRange::new(0x1F600, 0x1F64F), // Emoticons
    EmojiRange::new(0x1F300, 0x1F5FF), // Symbols & pictographs
    EmojiRange::new(0x1F680, 0x1F6FF), // Transport & map
    EmojiRange::new(0x1F900, 0x1F9FF), // Supplemental symbols & pictographs
    EmojiRange::new(0x1FA70, 0x1FAFF), // Symbols & pictographs extended-A
    EmojiRange::new(0x1F1E6, 0x1F1FF), // Regional indicators (flags)
    EmojiRange::new(0x2600, 0x26FF),   // Miscellaneous symbols
    EmojiRange::new(0x2700, 0x27BF),   // Dingbats
];

/// Known export layouts.
///
/// Each preset provides a timestamp pattern, a separator and the chrono
/// formats needed to resolve its timestamps.
///
/// | Preset | Example line |
/// |--------|--------------|
/// | `Android` | `12/01/23, 9:00 AM - Alice: Hi` (day first, 12h or 24h) |
/// | `AndroidUs` | `1/15/24, 9:00 AM - Alice: Hi` (month first) |
/// | `IosBracketed` | `[1/15/24, 10:30:45 AM] Alice: Hi` |
/// | `EuDot` | `26.10.2025, 20:40 - Alice: Hi` |
/// | `EuDotBracketed` | `[15.01.24, 10:30:45] Alice: Hi` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Preset {
    /// Android export, day-first dates, 12h or 24h clock.
    #[default]
    Android,
    /// Android export, month-first dates.
    AndroidUs,
    /// iOS export with bracketed, month-first timestamps.
    IosBracketed,
    /// Dotted day-first dates, 24h clock, dash separator.
    EuDot,
    /// Dotted day-first dates inside brackets.
    EuDotBracketed,
}

impl Preset {
    /// Returns all presets, in detection priority order.
    pub fn all() -> &'static [Preset] {
        &[
            Preset::Android,
            Preset::AndroidUs,
            Preset::IosBracketed,
            Preset::EuDot,
            Preset::EuDotBracketed,
        ]
    }

    /// Returns all preset names accepted by [`FromStr`].
    pub fn all_names() -> &'static [&'static str] {
        &[
            "android",
            "android-us",
            "ios-bracketed",
            "ios",
            "eu-dot",
            "eu-dot-bracketed",
        ]
    }

    /// Returns the timestamp regex for this preset.
    pub fn timestamp_pattern(self) -> &'static str {
        match self {
            Preset::Android | Preset::AndroidUs => {
                r"\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?"
            }
            Preset::IosBracketed => {
                r"\[(?P<timestamp>\d{1,2}/\d{1,2}/\d{2,4},\s\d{1,2}:\d{2}(?::\d{2})?(?:\s?[APap][Mm])?)\]"
            }
            Preset::EuDot => r"\d{2}\.\d{2}\.\d{2,4},\s\d{2}:\d{2}(?::\d{2})?",
            Preset::EuDotBracketed => {
                r"\[(?P<timestamp>\d{2}\.\d{2}\.\d{2,4},\s\d{2}:\d{2}(?::\d{2})?)\]"
            }
        }
    }

    /// Returns the literal text between the timestamp and the rest of the line.
    pub fn separator(self) -> &'static str {
        match self {
            Preset::Android | Preset::AndroidUs | Preset::EuDot => " - ",
            Preset::IosBracketed | Preset::EuDotBracketed => " ",
        }
    }

    /// Returns chrono format strings, most specific first.
    pub fn timestamp_formats(self) -> &'static [&'static str] {
        match self {
            Preset::Android => &[
                "%d/%m/%y, %I:%M:%S %p",
                "%d/%m/%y, %I:%M %p",
                "%d/%m/%Y, %I:%M:%S %p",
                "%d/%m/%Y, %I:%M %p",
                "%d/%m/%y, %H:%M:%S",
                "%d/%m/%y, %H:%M",
                "%d/%m/%Y, %H:%M:%S",
                "%d/%m/%Y, %H:%M",
            ],
            Preset::AndroidUs | Preset::IosBracketed => &[
                "%m/%d/%y, %I:%M:%S %p",
                "%m/%d/%y, %I:%M %p",
                "%m/%d/%Y, %I:%M:%S %p",
                "%m/%d/%Y, %I:%M %p",
                "%m/%d/%y, %H:%M:%S",
                "%m/%d/%y, %H:%M",
                "%m/%d/%Y, %H:%M:%S",
                "%m/%d/%Y, %H:%M",
            ],
            Preset::EuDot | Preset::EuDotBracketed => &[
                "%d.%m.%y, %H:%M:%S",
                "%d.%m.%y, %H:%M",
                "%d.%m.%Y, %H:%M:%S",
                "%d.%m.%Y, %H:%M",
            ],
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Preset::Android => write!(f, "android"),
            Preset::AndroidUs => write!(f, "android-us"),
            Preset::IosBracketed => write!(f, "ios-bracketed"),
            Preset::EuDot => write!(f, "eu-dot"),
            Preset::EuDotBracketed => write!(f, "eu-dot-bracketed"),
        }
    }
}

impl FromStr for Preset {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "android" => Ok(Preset::Android),
            "android-us" => Ok(Preset::AndroidUs),
            "ios-bracketed" | "ios" => Ok(Preset::IosBracketed),
            "eu-dot" => Ok(Preset::EuDot),
            "eu-dot-bracketed" => Ok(Preset::EuDotBracketed),
            _ => Err(format!(
                "Unknown preset: '{}'. Expected one of: {}",
                s,
                Preset::all_names().join(", ")
            )),
        }
    }
}

/// Configuration of the parsing and feature-extraction pipeline.
///
/// One immutable value is built per run and handed by reference to every
/// component. Missing fields in a deserialized document fall back to
/// [`AnalyzerConfig::default`], which is the [`Preset::Android`] layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyzerConfig {
    /// Regex for the timestamp block at the start of a message line.
    ///
    /// If it defines a `timestamp` named group, only that group is handed to
    /// the datetime resolver.
    pub timestamp_pattern: String,

    /// Literal text between the timestamp block and the rest of the line.
    pub separator: String,

    /// Literal text between the author name and the message body.
    pub author_separator: String,

    /// Regex that marks an author candidate as a system notice.
    pub system_notice_pattern: Option<String>,

    /// chrono format strings, tried in order.
    pub timestamp_formats: Vec<String>,

    /// Placeholder that replaces attachments in the export.
    pub media_marker: String,

    /// Regex matching one embedded link.
    pub url_pattern: String,

    /// Regex matching the "group created" notice; a `name` group captures the title.
    pub group_created_pattern: String,

    /// Code point ranges counted as emoji.
    pub emoji_ranges: Vec<EmojiRange>,

    /// Authors left out of per-individual breakdowns.
    pub excluded_authors: Vec<String>,

    /// Author recorded on system notices.
    pub system_author: String,

    /// Group name used when no "group created" notice is found.
    pub default_group_name: String,

    /// Fail when the first non-blank line is not a message start (default: true).
    pub strict_header: bool,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        let preset = Preset::default();
        Self {
            timestamp_pattern: preset.timestamp_pattern().to_string(),
            separator: preset.separator().to_string(),
            author_separator: ": ".to_string(),
            system_notice_pattern: Some(SYSTEM_NOTICE_PATTERN.to_string()),
            timestamp_formats: to_strings(preset.timestamp_formats()),
            media_marker: "<Media omitted>".to_string(),
            url_pattern: r"https?://\S+".to_string(),
            group_created_pattern: r#"created group "(?P<name>[^"]+)""#.to_string(),
            emoji_ranges: DEFAULT_EMOJI_RANGES.to_vec(),
            excluded_authors: Vec::new(),
            system_author: "system".to_string(),
            default_group_name: "Group Chat".to_string(),
            strict_header: true,
        }
    }
}

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

impl AnalyzerConfig {
    /// Creates a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a configuration for the given export layout.
    pub fn for_preset(preset: Preset) -> Self {
        Self::default().with_preset(preset)
    }

    /// Replaces the grammar and timestamp formats with those of `preset`.
    ///
    /// Media marker, emoji ranges and author buckets are left untouched.
    #[must_use]
    pub fn with_preset(mut self, preset: Preset) -> Self {
        self.timestamp_pattern = preset.timestamp_pattern().to_string();
        self.separator = preset.separator().to_string();
        self.timestamp_formats = to_strings(preset.timestamp_formats());
        self
    }

    /// Sets the timestamp regex.
    #[must_use]
    pub fn with_timestamp_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.timestamp_pattern = pattern.into();
        self
    }

    /// Sets the timestamp/body separator.
    #[must_use]
    pub fn with_separator(mut self, separator: impl Into<String>) -> Self {
        self.separator = separator.into();
        self
    }

    /// Sets the author/body separator.
    #[must_use]
    pub fn with_author_separator(mut self, separator: impl Into<String>) -> Self {
        self.author_separator = separator.into();
        self
    }

    /// Sets (or clears) the system-notice regex.
    #[must_use]
    pub fn with_system_notice_pattern(mut self, pattern: Option<String>) -> Self {
        self.system_notice_pattern = pattern;
        self
    }

    /// Sets the candidate timestamp formats.
    #[must_use]
    pub fn with_timestamp_formats<I, S>(mut self, formats: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.timestamp_formats = formats.into_iter().map(Into::into).collect();
        self
    }

    /// Sets the media placeholder.
    #[must_use]
    pub fn with_media_marker(mut self, marker: impl Into<String>) -> Self {
        self.media_marker = marker.into();
        self
    }

    /// Sets the link regex.
    #[must_use]
    pub fn with_url_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.url_pattern = pattern.into();
        self
    }

    /// Sets the "group created" regex.
    #[must_use]
    pub fn with_group_created_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.group_created_pattern = pattern.into();
        self
    }

    /// Sets the emoji code point ranges.
    #[must_use]
    pub fn with_emoji_ranges(mut self, ranges: Vec<EmojiRange>) -> Self {
        self.emoji_ranges = ranges;
        self
    }

    /// Adds an author to the excluded bucket.
    #[must_use]
    pub fn exclude_author(mut self, author: impl Into<String>) -> Self {
        self.excluded_authors.push(author.into());
        self
    }

    /// Sets the system sentinel author.
    #[must_use]
    pub fn with_system_author(mut self, author: impl Into<String>) -> Self {
        self.system_author = author.into();
        self
    }

    /// Sets the fallback group name.
    #[must_use]
    pub fn with_default_group_name(mut self, name: impl Into<String>) -> Self {
        self.default_group_name = name.into();
        self
    }

    /// Sets whether the first line must be a message start.
    #[must_use]
    pub fn with_strict_header(mut self, strict: bool) -> Self {
        self.strict_header = strict;
        self
    }

    /// Returns `true` if `author` is in the excluded bucket.
    ///
    /// System rows are told apart by their kind, not by this check, so a
    /// person who happens to share the sentinel name still counts.
    pub fn is_excluded(&self, author: &str) -> bool {
        self.excluded_authors.iter().any(|a| a == author)
    }

    /// Checks that every option is usable, compiling each regex once.
    pub fn validate(&self) -> Result<()> {
        if self.timestamp_formats.is_empty() {
            return Err(ChatstatsError::invalid_config(
                "timestamp_formats",
                "at least one format is required",
            ));
        }
        if self.separator.is_empty() {
            return Err(ChatstatsError::invalid_config("separator", "must not be empty"));
        }
        if self.author_separator.is_empty() {
            return Err(ChatstatsError::invalid_config(
                "author_separator",
                "must not be empty",
            ));
        }
        if self.system_author.trim().is_empty() {
            return Err(ChatstatsError::invalid_config(
                "system_author",
                "must not be blank",
            ));
        }
        if let Some(range) = self.emoji_ranges.iter().find(|r| r.start > r.end) {
            return Err(ChatstatsError::invalid_config(
                "emoji_ranges",
                format!("range {:#X}..={:#X} is inverted", range.start, range.end),
            ));
        }

        Regex::new(&self.timestamp_pattern)?;
        Regex::new(&self.url_pattern)?;
        Regex::new(&self.group_created_pattern)?;
        if let Some(pattern) = &self.system_notice_pattern {
            Regex::new(pattern)?;
        }
        Ok(())
    }
}

/// Logging settings carried in the same document as the analyzer options.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive, e.g. `warn` or `chatstats=debug`.
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}

/// A whole configuration document.
///
/// ```yaml
/// transcript:
///   media_marker: "<Media omitted>"
///   excluded_authors: ["Unknown Number"]
/// logging:
///   level: info
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Options handed to the pipeline.
    pub transcript: AnalyzerConfig,
    /// Process-wide logging options.
    pub logging: LoggingConfig,
}

#[cfg(feature = "yaml-config")]
impl AppConfig {
    /// Parses a YAML document and validates the analyzer options.
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let config: AppConfig = serde_yaml::from_str(yaml)?;
        config.transcript.validate()?;
        Ok(config)
    }

    /// Reads and parses a YAML file.
    pub fn from_path(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml_str(&content)
    }
}
