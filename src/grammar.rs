//! Line grammar: decides whether a raw line starts a new message.
//!
//! Export layouts differ by app version and locale:
//! - Android: `12/01/23, 9:00 AM - Alice: Message`
//! - iOS: `[1/15/24, 10:30:45 AM] Alice: Message`
//! - EU: `26.10.2025, 20:40 - Alice: Message`
//!
//! The layout is described by [`AnalyzerConfig`]; [`LineGrammar`] compiles it
//! once and classifies lines without any other state. [`detect_preset`]
//! picks a [`Preset`] by scoring the first lines of a transcript.

use regex::Regex;

use crate::config::{AnalyzerConfig, Preset};
use crate::datetime::DatetimeResolver;
use crate::error::Result;

/// Number of lines sampled by [`detect_preset`].
pub const DETECTION_SAMPLE: usize = 20;

/// Header fields of a line that starts a message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageStart<'a> {
    /// Timestamp text, handed to the datetime resolver
    pub timestamp_text: &'a str,
    /// Author name; `None` for system notices
    pub author: Option<&'a str>,
    /// Rest of the line after the author separator
    pub body: &'a str,
}

/// Classification of one physical line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind<'a> {
    /// The line opens a new message.
    MessageStart(MessageStart<'a>),
    /// The line belongs to the body of the previous message.
    Continuation(&'a str),
}

impl LineKind<'_> {
    /// Returns `true` for [`LineKind::MessageStart`].
    pub fn is_start(&self) -> bool {
        matches!(self, LineKind::MessageStart(_))
    }
}

/// Compiled line grammar.
#[derive(Debug, Clone)]
pub struct LineGrammar {
    header: Regex,
    system_notice: Option<Regex>,
    author_separator: String,
}

impl LineGrammar {
    /// Compiles the grammar described by `config`.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        let header = Regex::new(&format!(
            r"^(?P<stamp>{}){}(?P<rest>.*)$",
            config.timestamp_pattern,
            regex::escape(&config.separator)
        ))?;
        let system_notice = config
            .system_notice_pattern
            .as_deref()
            .map(Regex::new)
            .transpose()?;

        Ok(Self {
            header,
            system_notice,
            author_separator: config.author_separator.clone(),
        })
    }

    /// Classifies one line (without its terminator).
    pub fn classify<'a>(&self, line: &'a str) -> LineKind<'a> {
        let trimmed = strip_marks(line);
        let Some(caps) = self.header.captures(trimmed) else {
            return LineKind::Continuation(line);
        };

        let timestamp_text = caps
            .name("timestamp")
            .or_else(|| caps.name("stamp"))
            .map_or("", |m| m.as_str().trim());
        let rest = caps.name("rest").map_or("", |m| m.as_str());

        let (author, body) = self.split_author(rest);
        LineKind::MessageStart(MessageStart {
            timestamp_text,
            author,
            body,
        })
    }

    /// Returns `true` if `line` opens a message.
    pub fn is_message_start(&self, line: &str) -> bool {
        self.header.is_match(strip_marks(line))
    }

    fn split_author<'a>(&self, rest: &'a str) -> (Option<&'a str>, &'a str) {
        let Some((candidate, body)) = rest.split_once(self.author_separator.as_str()) else {
            return (None, rest);
        };

        let author = candidate.trim();
        if author.is_empty() {
            return (None, rest);
        }
        if self
            .system_notice
            .as_ref()
            .is_some_and(|re| re.is_match(author))
        {
            return (None, rest);
        }
        (Some(author), body)
    }
}

/// Strips the byte-order mark and directional marks some exports put in
/// front of each line.
fn strip_marks(line: &str) -> &str {
    line.trim_start_matches(['\u{feff}', '\u{200e}', '\u{200f}'])
}

/// Auto-detects the export layout by scoring sample lines.
///
/// A line scores for a preset when it matches the preset's grammar and its
/// timestamp resolves with the preset's formats, so day-first and
/// month-first layouts can be told apart. Ties go to the earlier preset in
/// [`Preset::all`]. Returns `None` if no line matches any preset.
pub fn detect_preset(lines: &[&str]) -> Option<Preset> {
    let mut best: Option<(Preset, usize)> = None;

    for &preset in Preset::all() {
        let config = AnalyzerConfig::for_preset(preset);
        let (Ok(grammar), Ok(resolver)) = (LineGrammar::new(&config), DatetimeResolver::new(&config))
        else {
            continue;
        };

        let score = lines
            .iter()
            .filter(|line| match grammar.classify(line) {
                LineKind::MessageStart(start) => resolver.resolve(start.timestamp_text).is_ok(),
                LineKind::Continuation(_) => false,
            })
            .count();

        if score > best.map_or(0, |(_, s)| s) {
            best = Some((preset, score));
        }
    }

    best.map(|(preset, _)| preset)
}

/// Auto-detects the layout from the beginning of a whole transcript.
pub fn detect_preset_in(text: &str) -> Option<Preset> {
    let sample: Vec<&str> = text
        .lines()
        .filter(|l| !l.trim().is_empty())
        .take(DETECTION_SAMPLE)
        .collect();
    detect_preset(&sample)
}
