//! Narrow a record by date range and author.
//!
//! | Filter | Method | Description |
//! |--------|--------|-------------|
//! | Date from | [`with_date_from`](FilterConfig::with_date_from) | Rows on or after date |
//! | Date to | [`with_date_to`](FilterConfig::with_date_to) | Rows on or before date |
//! | Author | [`with_author`](FilterConfig::with_author) | Rows from one author |
//!
//! # Example
//!
//! ```
//! use chatstats::filter::{FilterConfig, apply_filters};
//! use chatstats::message::ExtractedMessage;
//! use chatstats::table::StructuredRecord;
//!
//! let record = StructuredRecord::from(vec![
//!     ExtractedMessage::new("Alice", "Hello"),
//!     ExtractedMessage::new("Bob", "Hi there"),
//!     ExtractedMessage::new("Alice", "How are you?"),
//! ]);
//!
//! let config = FilterConfig::new().with_author("alice");
//! let filtered = apply_filters(&record, &config);
//!
//! assert_eq!(filtered.len(), 2);
//! assert_eq!(record.len(), 3);
//! ```
//!
//! Rows without a timestamp are excluded while a date filter is active.
//! Author matching is case-insensitive for ASCII characters. Filters combine
//! with AND.

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};

use crate::error::{ChatstatsError, Result};
use crate::table::StructuredRecord;

/// Date and author criteria for [`apply_filters`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterConfig {
    /// Keep rows on or after this instant.
    pub after: Option<DateTime<Utc>>,

    /// Keep rows on or before this instant.
    pub before: Option<DateTime<Utc>>,

    /// Keep rows from this author (case-insensitive).
    pub author: Option<String>,
}

impl FilterConfig {
    /// Creates a filter that keeps every row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Keeps rows from the start of `date` (`YYYY-MM-DD`) on.
    pub fn with_date_from(mut self, date: &str) -> Result<Self> {
        self.after = Some(parse_date(date)?.and_time(NaiveTime::MIN).and_utc());
        Ok(self)
    }

    /// Keeps rows up to the end of `date` (`YYYY-MM-DD`).
    pub fn with_date_to(mut self, date: &str) -> Result<Self> {
        let end = parse_date(date)?
            .and_hms_opt(23, 59, 59)
            .ok_or_else(|| ChatstatsError::invalid_date(date))?;
        self.before = Some(end.and_utc());
        Ok(self)
    }

    /// Keeps rows written by `author`.
    #[must_use]
    pub fn with_author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    /// Sets the lower bound directly.
    #[must_use]
    pub fn with_after(mut self, dt: DateTime<Utc>) -> Self {
        self.after = Some(dt);
        self
    }

    /// Sets the upper bound directly.
    #[must_use]
    pub fn with_before(mut self, dt: DateTime<Utc>) -> Self {
        self.before = Some(dt);
        self
    }

    /// Returns `true` if any criterion is set.
    pub fn is_active(&self) -> bool {
        self.has_date_filter() || self.author.is_some()
    }

    /// Returns `true` if a date bound is set.
    pub fn has_date_filter(&self) -> bool {
        self.after.is_some() || self.before.is_some()
    }
}

fn parse_date(date: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| ChatstatsError::invalid_date(date))
}

/// Returns a new, re-indexed record holding the rows that pass every active
/// criterion. The input record is left untouched.
pub fn apply_filters(record: &StructuredRecord, config: &FilterConfig) -> StructuredRecord {
    if !config.is_active() {
        return record.clone();
    }

    record.retain(|row| {
        if let Some(author) = &config.author {
            if !row.author.eq_ignore_ascii_case(author) {
                return false;
            }
        }

        if config.has_date_filter() {
            let Some(ts) = row.timestamp else {
                return false;
            };
            if config.after.is_some_and(|after| ts < after) {
                return false;
            }
            if config.before.is_some_and(|before| ts > before) {
                return false;
            }
        }

        true
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ExtractedMessage;

    fn row(author: &str, text: &str, date: Option<&str>) -> ExtractedMessage {
        let msg = ExtractedMessage::new(author, text);
        match date {
            Some(d) => msg.with_timestamp(
                NaiveDate::parse_from_str(d, "%Y-%m-%d")
                    .unwrap()
                    .and_hms_opt(12, 0, 0)
                    .unwrap()
                    .and_utc(),
            ),
            None => msg,
        }
    }

    fn record() -> StructuredRecord {
        StructuredRecord::from(vec![
            row("Alice", "Old", Some("2024-01-01")),
            row("Bob", "Mid", Some("2024-03-01")),
            row("alice", "New", Some("2024-06-15")),
            row("Alice", "Undated", None),
        ])
    }

    #[test]
    fn test_inactive_filter_keeps_everything() {
        let filtered = apply_filters(&record(), &FilterConfig::new());
        assert_eq!(filtered, record());
    }

    #[test]
    fn test_filter_by_author_is_case_insensitive() {
        let filtered = apply_filters(&record(), &FilterConfig::new().with_author("ALICE"));
        assert_eq!(filtered.len(), 3);
        assert_eq!(filtered.rows()[2].index, 2);
    }

    #[test]
    fn test_filter_by_date_range() {
        let config = FilterConfig::new()
            .with_date_from("2024-02-01")
            .unwrap()
            .with_date_to("2024-03-01")
            .unwrap();
        let filtered = apply_filters(&record(), &config);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows()[0].text, "Mid");
        assert_eq!(filtered.rows()[0].index, 0);
    }

    #[test]
    fn test_date_to_includes_whole_day() {
        let config = FilterConfig::new().with_date_to("2024-06-15").unwrap();
        let filtered = apply_filters(&record(), &config);
        assert_eq!(filtered.len(), 3);
    }

    #[test]
    fn test_undated_rows_excluded_by_date_filter() {
        let config = FilterConfig::new().with_date_from("2000-01-01").unwrap();
        let filtered = apply_filters(&record(), &config);
        assert!(filtered.iter().all(|r| r.timestamp.is_some()));
    }

    #[test]
    fn test_combined_filters() {
        let config = FilterConfig::new()
            .with_author("alice")
            .with_date_from("2024-06-01")
            .unwrap();
        let filtered = apply_filters(&record(), &config);
        assert_eq!(filtered.len(), 1);
        assert_eq!(filtered.rows()[0].text, "New");
    }

    #[test]
    fn test_invalid_date() {
        let err = FilterConfig::new().with_date_from("15/06/2024").unwrap_err();
        assert!(err.is_invalid_date());
        assert!(FilterConfig::new().with_date_to("2024-13-01").is_err());
    }
}
