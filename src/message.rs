//! Row type of the structured record.
//!
//! [`ExtractedMessage`] is one message after feature extraction: author,
//! resolved timestamp, kind, cleaned text, links, emoji and word count, plus
//! the calendar fields the table builder derives from the timestamp.
//!
//! # Example
//!
//! ```
//! use chatstats::message::{ExtractedMessage, MessageKind};
//!
//! let msg = ExtractedMessage::new("Alice", "Hello there")
//!     .with_links(vec!["https://x.co".to_string()]);
//!
//! assert_eq!(msg.kind, MessageKind::Text);
//! assert_eq!(msg.word_count, 2);
//! assert_eq!(msg.url_count, 1);
//! ```

use std::fmt;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// What a row represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// A regular authored message
    #[default]
    Text,
    /// An authored message whose body is the media placeholder
    Media,
    /// A notice with no author (joins, leaves, encryption banner)
    System,
}

impl fmt::Display for MessageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MessageKind::Text => write!(f, "text"),
            MessageKind::Media => write!(f, "media"),
            MessageKind::System => write!(f, "system"),
        }
    }
}

/// One row of the structured record.
///
/// | Field | Description |
/// |-------|-------------|
/// | `index` | Position in the record |
/// | `line` | Transcript line where the message starts |
/// | `timestamp` | Resolved datetime, `None` when unparsable |
/// | `author` | Author, or the system sentinel |
/// | `kind` / `is_media` | Message kind |
/// | `text` | Body with the media marker stripped |
/// | `word_count` | Whitespace-delimited tokens of `text`, links included |
/// | `links` / `url_count` | Embedded URLs, duplicates kept |
/// | `emojis` | Embedded emoji, duplicates kept |
/// | `malformed` | The timestamp did not resolve |
/// | `date` / `day` / `hour` | Calendar fields derived from `timestamp` |
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractedMessage {
    /// Position in the record (0-based).
    pub index: usize,

    /// Zero-based transcript line where the message starts.
    pub line: usize,

    /// When the message was sent; `None` is the unparsable sentinel.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,

    /// Message author, or the configured system sentinel.
    pub author: String,

    /// Text, media or system notice.
    pub kind: MessageKind,

    /// The body contained the media placeholder.
    pub is_media: bool,

    /// Cleaned body.
    pub text: String,

    /// Whitespace-delimited tokens of `text`.
    pub word_count: usize,

    /// Embedded URLs in order of appearance.
    pub links: Vec<String>,

    /// Embedded emoji in order of appearance.
    pub emojis: Vec<String>,

    /// Number of embedded URLs.
    pub url_count: usize,

    /// The timestamp text matched none of the configured formats.
    #[serde(default)]
    pub malformed: bool,

    /// Calendar date of `timestamp`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub date: Option<NaiveDate>,

    /// Weekday name of `timestamp`, e.g. `Friday`.
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub day: Option<String>,

    /// Hour of `timestamp` (0-23).
    #[serde(skip_serializing_if = "Option::is_none")]
    #[serde(default)]
    pub hour: Option<u32>,
}

impl ExtractedMessage {
    /// Creates a text row with the word count of `text` and no links or emoji.
    ///
    /// Calendar fields stay empty until the row passes through
    /// [`TableBuilder`](crate::table::TableBuilder).
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        let text = text.into();
        Self {
            index: 0,
            line: 0,
            timestamp: None,
            author: author.into(),
            kind: MessageKind::Text,
            is_media: false,
            word_count: text.split_whitespace().count(),
            text,
            links: Vec::new(),
            emojis: Vec::new(),
            url_count: 0,
            malformed: false,
            date: None,
            day: None,
            hour: None,
        }
    }

    /// Builder method to set the timestamp.
    #[must_use]
    pub fn with_timestamp(mut self, ts: DateTime<Utc>) -> Self {
        self.timestamp = Some(ts);
        self
    }

    /// Builder method to set the message kind, keeping `is_media` in sync.
    #[must_use]
    pub fn with_kind(mut self, kind: MessageKind) -> Self {
        self.kind = kind;
        self.is_media = kind == MessageKind::Media;
        self
    }

    /// Builder method to set the links, keeping `url_count` in sync.
    #[must_use]
    pub fn with_links(mut self, links: Vec<String>) -> Self {
        self.url_count = links.len();
        self.links = links;
        self
    }

    /// Builder method to set the emoji.
    #[must_use]
    pub fn with_emojis(mut self, emojis: Vec<String>) -> Self {
        self.emojis = emojis;
        self
    }

    /// Builder method to set the source line.
    #[must_use]
    pub fn with_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }

    /// Returns `true` for system notices.
    pub fn is_system(&self) -> bool {
        self.kind == MessageKind::System
    }

    /// Number of emoji in this row.
    pub fn emoji_count(&self) -> usize {
        self.emojis.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_new_counts_words() {
        let msg = ExtractedMessage::new("Alice", "  one two   three ");
        assert_eq!(msg.word_count, 3);
        assert_eq!(msg.kind, MessageKind::Text);
        assert!(!msg.is_media);
        assert!(msg.timestamp.is_none());
    }

    #[test]
    fn test_with_kind_syncs_media_flag() {
        let msg = ExtractedMessage::new("Bob", "").with_kind(MessageKind::Media);
        assert!(msg.is_media);
        let msg = msg.with_kind(MessageKind::Text);
        assert!(!msg.is_media);
    }

    #[test]
    fn test_with_links_syncs_url_count() {
        let msg = ExtractedMessage::new("Alice", "a b").with_links(vec![
            "https://a.example".into(),
            "https://a.example".into(),
        ]);
        assert_eq!(msg.url_count, 2);
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(MessageKind::Text.to_string(), "text");
        assert_eq!(MessageKind::Media.to_string(), "media");
        assert_eq!(MessageKind::System.to_string(), "system");
    }

    #[test]
    fn test_serialization_skips_missing_calendar_fields() {
        let msg = ExtractedMessage::new("Alice", "Hello");
        let json = serde_json::to_string(&msg).unwrap();
        assert!(json.contains("\"author\":\"Alice\""));
        assert!(json.contains("\"kind\":\"text\""));
        assert!(!json.contains("timestamp"));
        assert!(!json.contains("\"hour\""));
    }

    #[test]
    fn test_round_trip_through_json() {
        let ts = Utc.with_ymd_and_hms(2024, 6, 15, 12, 0, 0).unwrap();
        let msg = ExtractedMessage::new("Alice", "Hello 😀")
            .with_timestamp(ts)
            .with_emojis(vec!["😀".into()]);
        let json = serde_json::to_string(&msg).unwrap();
        let parsed: ExtractedMessage = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, msg);
    }
}
