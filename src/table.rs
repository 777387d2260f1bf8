//! The structured record: one row per message, in transcript order.

use std::collections::HashMap;

use chrono::Timelike;
use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::message::ExtractedMessage;

/// Assembles extracted messages into a [`StructuredRecord`].
#[derive(Debug, Clone, Copy, Default)]
pub struct TableBuilder;

impl TableBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self
    }

    /// Assigns row indices and derives the calendar fields of every row.
    ///
    /// Rows keep their order; a row without a timestamp gets no calendar
    /// fields.
    pub fn build(&self, rows: Vec<ExtractedMessage>) -> StructuredRecord {
        let rows = rows
            .into_iter()
            .enumerate()
            .map(|(index, mut row)| {
                row.index = index;
                derive_calendar(&mut row);
                row
            })
            .collect();
        StructuredRecord { rows }
    }
}

fn derive_calendar(row: &mut ExtractedMessage) {
    match row.timestamp {
        Some(ts) => {
            row.date = Some(ts.date_naive());
            row.day = Some(ts.format("%A").to_string());
            row.hour = Some(ts.hour());
        }
        None => {
            row.date = None;
            row.day = None;
            row.hour = None;
        }
    }
}

/// Row-per-message table produced from one transcript.
///
/// The record is never re-sorted: out-of-order timestamps stay where the
/// transcript put them. Narrowing operations return a new record.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StructuredRecord {
    rows: Vec<ExtractedMessage>,
}

impl StructuredRecord {
    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` if the record has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows in transcript order.
    pub fn rows(&self) -> &[ExtractedMessage] {
        &self.rows
    }

    /// Iterates rows in transcript order.
    pub fn iter(&self) -> std::slice::Iter<'_, ExtractedMessage> {
        self.rows.iter()
    }

    /// Consumes the record, returning its rows.
    pub fn into_rows(self) -> Vec<ExtractedMessage> {
        self.rows
    }

    /// Distinct non-system authors in order of first appearance.
    pub fn authors(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for row in self.rows.iter().filter(|r| !r.is_system()) {
            if !seen.contains(&row.author.as_str()) {
                seen.push(row.author.as_str());
            }
        }
        seen
    }

    /// Non-system authors by message count, most active first; ties keep
    /// first-appearance order.
    pub fn sorted_authors(&self) -> Vec<&str> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for row in self.rows.iter().filter(|r| !r.is_system()) {
            *counts.entry(row.author.as_str()).or_default() += 1;
        }
        let mut authors = self.authors();
        authors.sort_by_key(|a| std::cmp::Reverse(counts.get(a).copied().unwrap_or(0)));
        authors
    }

    /// Rows written by `author`, re-indexed.
    pub fn filter_author(&self, author: &str) -> StructuredRecord {
        self.retain(|row| row.author == author)
    }

    /// Drops system notices and rows from the configured excluded authors.
    pub fn without_system_rows(&self, config: &AnalyzerConfig) -> StructuredRecord {
        self.retain(|row| !row.is_system() && !config.is_excluded(&row.author))
    }

    /// Number of rows whose timestamp did not resolve.
    pub fn malformed_count(&self) -> usize {
        self.rows.iter().filter(|r| r.malformed).count()
    }

    /// Copies the rows matching `keep` into a new, re-indexed record.
    pub(crate) fn retain<F>(&self, mut keep: F) -> StructuredRecord
    where
        F: FnMut(&ExtractedMessage) -> bool,
    {
        let rows = self
            .rows
            .iter()
            .filter(|row| keep(*row))
            .cloned()
            .enumerate()
            .map(|(index, mut row)| {
                row.index = index;
                row
            })
            .collect();
        StructuredRecord { rows }
    }
}

impl<'a> IntoIterator for &'a StructuredRecord {
    type Item = &'a ExtractedMessage;
    type IntoIter = std::slice::Iter<'a, ExtractedMessage>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}

impl From<Vec<ExtractedMessage>> for StructuredRecord {
    fn from(rows: Vec<ExtractedMessage>) -> Self {
        TableBuilder.build(rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageKind;
    use chrono::{NaiveDate, TimeZone, Utc};

    fn at(day: u32, hour: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, 0, 0).unwrap()
    }

    fn sample() -> StructuredRecord {
        TableBuilder::new().build(vec![
            ExtractedMessage::new("system", "Group created")
                .with_kind(MessageKind::System)
                .with_timestamp(at(1, 8)),
            ExtractedMessage::new("Bob", "hi").with_timestamp(at(1, 9)),
            ExtractedMessage::new("Alice", "hello").with_timestamp(at(1, 10)),
            ExtractedMessage::new("Alice", "again"),
            ExtractedMessage::new("Unknown Number", "spam").with_timestamp(at(2, 23)),
        ])
    }

    #[test]
    fn test_build_assigns_indices_and_calendar_fields() {
        let record = sample();
        assert_eq!(record.len(), 5);
        let indices: Vec<_> = record.iter().map(|r| r.index).collect();
        assert_eq!(indices, vec![0, 1, 2, 3, 4]);

        let row = &record.rows()[2];
        assert_eq!(row.date, NaiveDate::from_ymd_opt(2024, 3, 1));
        assert_eq!(row.day.as_deref(), Some("Friday"));
        assert_eq!(row.hour, Some(10));
    }

    #[test]
    fn test_missing_timestamp_gives_no_calendar_fields() {
        let table = sample();
        let row = &table.rows()[3];
        assert!(row.date.is_none());
        assert!(row.day.is_none());
        assert!(row.hour.is_none());
    }

    #[test]
    fn test_order_is_preserved_for_out_of_order_timestamps() {
        let record = TableBuilder::new().build(vec![
            ExtractedMessage::new("A", "late").with_timestamp(at(5, 0)),
            ExtractedMessage::new("B", "early").with_timestamp(at(1, 0)),
        ]);
        assert_eq!(record.rows()[0].text, "late");
    }

    #[test]
    fn test_authors_skip_system() {
        let record = sample();
        assert_eq!(record.authors(), vec!["Bob", "Alice", "Unknown Number"]);
        assert_eq!(record.sorted_authors(), vec!["Alice", "Bob", "Unknown Number"]);
    }

    #[test]
    fn test_filter_author_reindexes() {
        let alice = sample().filter_author("Alice");
        assert_eq!(alice.len(), 2);
        assert_eq!(alice.rows()[0].index, 0);
        assert_eq!(alice.rows()[1].index, 1);
        assert!(sample().filter_author("Nobody").is_empty());
    }

    #[test]
    fn test_without_system_rows() {
        let config = AnalyzerConfig::new().exclude_author("Unknown Number");
        let view = sample().without_system_rows(&config);
        assert_eq!(view.authors(), vec!["Bob", "Alice"]);
        assert_eq!(view.len(), 3);
    }

    #[test]
    fn test_views_do_not_mutate_original() {
        let record = sample();
        let _ = record.filter_author("Bob");
        assert_eq!(record.len(), 5);
        assert_eq!(record.rows()[1].index, 1);
    }

    #[test]
    fn test_malformed_count() {
        let mut rows = vec![ExtractedMessage::new("A", "x")];
        rows[0].malformed = true;
        let record = StructuredRecord::from(rows);
        assert_eq!(record.malformed_count(), 1);
    }
}
