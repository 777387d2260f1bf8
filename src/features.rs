//! Per-message feature extraction.
//!
//! [`FeatureExtractor`] turns one [`RawMessage`] into an [`ExtractedMessage`]:
//! resolved timestamp, message kind, cleaned text, embedded links, embedded
//! emoji and word count. Extraction never fails; a timestamp that does not
//! resolve leaves the row in place with `malformed` set.

use regex::Regex;
use tracing::warn;
use unicode_segmentation::UnicodeSegmentation;

use crate::config::{AnalyzerConfig, EmojiRange};
use crate::datetime::DatetimeResolver;
use crate::error::Result;
use crate::message::{ExtractedMessage, MessageKind};
use crate::segmenter::RawMessage;

/// Derives row features from raw messages.
#[derive(Debug, Clone)]
pub struct FeatureExtractor {
    resolver: DatetimeResolver,
    url: Regex,
    media: Regex,
    emoji_ranges: Vec<EmojiRange>,
    system_author: String,
}

impl FeatureExtractor {
    /// Compiles the URL and media patterns of `config`.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        Ok(Self {
            resolver: DatetimeResolver::new(config)?,
            url: Regex::new(&config.url_pattern)?,
            media: Regex::new(&format!("(?i){}", regex::escape(&config.media_marker)))?,
            emoji_ranges: config.emoji_ranges.clone(),
            system_author: config.system_author.clone(),
        })
    }

    /// Extracts one row. `index` and the calendar fields are left for the
    /// table builder.
    pub fn extract(&self, raw: &RawMessage) -> ExtractedMessage {
        let timestamp = match self.resolver.resolve(&raw.timestamp_text) {
            Ok(ts) => Some(ts),
            Err(err) => {
                warn!(line = raw.start_index + 1, %err, "keeping row with unparsable timestamp");
                None
            }
        };

        let (author, system) = match &raw.author {
            Some(author) => (author.clone(), false),
            None => (self.system_author.clone(), true),
        };

        let is_media = !system && self.media.is_match(&raw.body);
        let kind = if system {
            MessageKind::System
        } else if is_media {
            MessageKind::Media
        } else {
            MessageKind::Text
        };

        let mut msg = if is_media {
            let text = self.media.replace_all(&raw.body, "").trim().to_string();
            let mut msg = ExtractedMessage::new(author, text);
            msg.word_count = 0;
            msg
        } else {
            let text = raw.body.trim();
            ExtractedMessage::new(author, text)
                .with_links(self.links(text))
                .with_emojis(self.emojis(text))
        };

        msg.line = raw.start_index;
        msg.timestamp = timestamp;
        msg.malformed = timestamp.is_none();
        msg.with_kind(kind)
    }

    /// Every URL in `text`, in order, duplicates kept.
    pub fn links(&self, text: &str) -> Vec<String> {
        self.url
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Every emoji in `text`, in order, duplicates kept.
    ///
    /// A grapheme cluster counts once when its base code point falls in one
    /// of the configured ranges, so skin-tone modifiers, flags and ZWJ
    /// sequences stay whole.
    pub fn emojis(&self, text: &str) -> Vec<String> {
        text.graphemes(true)
            .filter(|g| {
                g.chars()
                    .next()
                    .is_some_and(|c| self.emoji_ranges.iter().any(|r| r.contains(c)))
            })
            .map(str::to_string)
            .collect()
    }
}
