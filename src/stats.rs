//! Aggregate counts, per-author breakdowns and rankings.
//!
//! Every statistic is computed from a borrowed [`StructuredRecord`]; nothing
//! here mutates or caches the record.
//!
//! # Example
//!
//! ```
//! use chatstats::config::AnalyzerConfig;
//! use chatstats::message::ExtractedMessage;
//! use chatstats::stats::StatisticsEngine;
//! use chatstats::table::StructuredRecord;
//!
//! # fn main() -> chatstats::Result<()> {
//! let record = StructuredRecord::from(vec![
//!     ExtractedMessage::new("Alice", "one two"),
//!     ExtractedMessage::new("Bob", "three"),
//!     ExtractedMessage::new("Alice", "four five six seven"),
//! ]);
//!
//! let engine = StatisticsEngine::new(&AnalyzerConfig::default())?;
//! let alice = engine.author_breakdown(&record, "Alice")?;
//! assert_eq!(alice.message_count, 2);
//! assert!((alice.average_words_per_message - 3.0).abs() < f64::EPSILON);
//!
//! let top = engine.most_active_members(&record, 1);
//! assert_eq!(top[0].key, "Alice");
//! # Ok(())
//! # }
//! ```

use std::collections::HashMap;
use std::hash::Hash;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde::Serialize;

use crate::config::AnalyzerConfig;
use crate::error::{ChatstatsError, Result};
use crate::message::ExtractedMessage;
use crate::table::StructuredRecord;

/// Headline numbers for a whole record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateStats {
    /// Group title from the "created group" notice, or the configured default
    pub group_name: String,
    /// Number of rows
    pub total_messages: usize,
    /// Distinct non-system authors
    pub total_members: usize,
    /// Rows with the media placeholder
    pub media_message: usize,
    /// Sum of `url_count` over all rows
    pub link_shared: usize,
}

/// Rollup of one author's rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorStats {
    /// Author name, matched exactly
    pub author: String,
    /// Rows written by the author
    pub message_count: usize,
    /// Emoji over those rows
    pub emoji_count: usize,
    /// Sum of `url_count` over those rows
    pub link_count: usize,
    /// Sum of `word_count` over those rows
    pub word_count: usize,
    /// `word_count / message_count`
    pub average_words_per_message: f64,
}

/// One entry of a ranking: a group key and its count.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankEntry<K> {
    /// Group key (author, weekday, hour, emoji, date)
    pub key: K,
    /// Total for the key
    pub count: usize,
}

/// Every ranking at once, for reports.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Rankings {
    /// Authors by message count
    pub most_active_members: Vec<RankEntry<String>>,
    /// Weekday names by message count
    pub most_active_weekdays: Vec<RankEntry<String>>,
    /// Hours of the day (0-23) by message count
    pub most_active_hours: Vec<RankEntry<u32>>,
    /// Days of the month (1-31) by message count
    pub most_active_days_of_month: Vec<RankEntry<u32>>,
    /// `HH:MM` clock times by message count
    pub most_active_times: Vec<RankEntry<String>>,
    /// Authors by words written
    pub top_word_users: Vec<RankEntry<String>>,
    /// Authors by media rows
    pub top_media_contributors: Vec<RankEntry<String>>,
    /// Authors by links shared
    pub top_link_sharers: Vec<RankEntry<String>>,
    /// Emoji by uses
    pub emoji_frequency: Vec<RankEntry<String>>,
    /// Messages per calendar date, oldest first
    pub messages_per_date: Vec<RankEntry<NaiveDate>>,
}

/// Default list lengths used by [`StatisticsEngine::rankings`].
pub mod limits {
    pub const MEMBERS: usize = 20;
    pub const WEEKDAYS: usize = 10;
    pub const HOURS: usize = 20;
    pub const DAYS_OF_MONTH: usize = 20;
    pub const TIMES: usize = 10;
    pub const CONTRIBUTORS: usize = 10;
    pub const EMOJI: usize = 10;
}

/// Groups weighted keys, sums the weights, and sorts by total descending.
///
/// Ties keep the order in which keys first appeared. Keys whose total is
/// zero are dropped. `top` of `None` keeps every key.
pub fn rank_by<K, I>(pairs: I, top: Option<usize>) -> Vec<RankEntry<K>>
where
    K: Eq + Hash + Clone,
    I: IntoIterator<Item = (K, usize)>,
{
    let mut slots: HashMap<K, usize> = HashMap::new();
    let mut entries: Vec<RankEntry<K>> = Vec::new();

    for (key, weight) in pairs {
        match slots.get(&key) {
            Some(&slot) => entries[slot].count += weight,
            None => {
                slots.insert(key.clone(), entries.len());
                entries.push(RankEntry { key, count: weight });
            }
        }
    }

    entries.retain(|e| e.count > 0);
    entries.sort_by(|a, b| b.count.cmp(&a.count));
    if let Some(n) = top {
        entries.truncate(n);
    }
    entries
}

/// Computes statistics over a record.
#[derive(Debug, Clone)]
pub struct StatisticsEngine {
    group_created: Regex,
    config: AnalyzerConfig,
}

impl StatisticsEngine {
    /// Compiles the group-created pattern of `config`.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        Ok(Self {
            group_created: Regex::new(&config.group_created_pattern)?,
            config: config.clone(),
        })
    }

    /// Headline numbers for the record.
    pub fn aggregate(&self, record: &StructuredRecord) -> AggregateStats {
        AggregateStats {
            group_name: self.group_name(record),
            total_messages: record.len(),
            total_members: record.authors().len(),
            media_message: record.iter().filter(|r| r.is_media).count(),
            link_shared: record.iter().map(|r| r.url_count).sum(),
        }
    }

    /// Title captured from the first system notice matching the
    /// group-created pattern, or the configured default.
    pub fn group_name(&self, record: &StructuredRecord) -> String {
        record
            .iter()
            .filter(|r| r.is_system())
            .find_map(|r| {
                let caps = self.group_created.captures(&r.text)?;
                caps.name("name")
                    .or_else(|| caps.get(0))
                    .map(|m| m.as_str().trim().to_string())
            })
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| self.config.default_group_name.clone())
    }

    /// Rollup of the rows written by `author`.
    ///
    /// # Errors
    ///
    /// [`ChatstatsError::DivisionUndefined`] if `author` has no rows.
    pub fn author_breakdown(&self, record: &StructuredRecord, author: &str) -> Result<AuthorStats> {
        let rows: Vec<&ExtractedMessage> = record.iter().filter(|r| r.author == author).collect();
        if rows.is_empty() {
            return Err(ChatstatsError::division_undefined(author));
        }

        let message_count = rows.len();
        let word_count: usize = rows.iter().map(|r| r.word_count).sum();
        Ok(AuthorStats {
            author: author.to_string(),
            message_count,
            emoji_count: rows.iter().map(|r| r.emoji_count()).sum(),
            link_count: rows.iter().map(|r| r.url_count).sum(),
            word_count,
            average_words_per_message: word_count as f64 / message_count as f64,
        })
    }

    /// Breakdowns for every author of the per-individual view, most active
    /// first.
    pub fn author_breakdowns(&self, record: &StructuredRecord) -> Vec<AuthorStats> {
        let view = record.without_system_rows(&self.config);
        view.sorted_authors()
            .into_iter()
            .filter_map(|author| self.author_breakdown(&view, author).ok())
            .collect()
    }

    /// Authors by number of messages.
    pub fn most_active_members(&self, record: &StructuredRecord, top: usize) -> Vec<RankEntry<String>> {
        rank_by(self.people(record).map(|r| (r.author.clone(), 1)), Some(top))
    }

    /// Weekday names by number of messages.
    pub fn most_active_weekdays(&self, record: &StructuredRecord, top: usize) -> Vec<RankEntry<String>> {
        rank_by(
            self.people(record).filter_map(|r| Some((r.day.clone()?, 1))),
            Some(top),
        )
    }

    /// Hours of the day (0-23) by number of messages.
    pub fn most_active_hours(&self, record: &StructuredRecord, top: usize) -> Vec<RankEntry<u32>> {
        rank_by(self.people(record).filter_map(|r| Some((r.hour?, 1))), Some(top))
    }

    /// Days of the month (1-31) by number of messages.
    pub fn most_active_days_of_month(&self, record: &StructuredRecord, top: usize) -> Vec<RankEntry<u32>> {
        rank_by(
            self.people(record).filter_map(|r| Some((r.date?.day(), 1))),
            Some(top),
        )
    }

    /// Clock times (`HH:MM`) by number of messages.
    pub fn most_active_times(&self, record: &StructuredRecord, top: usize) -> Vec<RankEntry<String>> {
        rank_by(
            self.people(record)
                .filter_map(|r| Some((r.timestamp?.format("%H:%M").to_string(), 1))),
            Some(top),
        )
    }

    /// Authors by total word count.
    pub fn top_word_users(&self, record: &StructuredRecord, top: usize) -> Vec<RankEntry<String>> {
        rank_by(
            self.people(record).map(|r| (r.author.clone(), r.word_count)),
            Some(top),
        )
    }

    /// Authors by number of media messages.
    pub fn top_media_contributors(&self, record: &StructuredRecord, top: usize) -> Vec<RankEntry<String>> {
        rank_by(
            self.people(record).map(|r| (r.author.clone(), usize::from(r.is_media))),
            Some(top),
        )
    }

    /// Authors by number of links shared.
    pub fn top_link_sharers(&self, record: &StructuredRecord, top: usize) -> Vec<RankEntry<String>> {
        rank_by(
            self.people(record).map(|r| (r.author.clone(), r.url_count)),
            Some(top),
        )
    }

    /// Emoji by number of uses.
    pub fn emoji_frequency(&self, record: &StructuredRecord, top: usize) -> Vec<RankEntry<String>> {
        rank_by(
            self.people(record)
                .flat_map(|r| r.emojis.iter().map(|e| (e.clone(), 1))),
            Some(top),
        )
    }

    /// Messages per calendar date, oldest first.
    pub fn messages_per_date(&self, record: &StructuredRecord) -> Vec<RankEntry<NaiveDate>> {
        let mut series = rank_by(self.people(record).filter_map(|r| Some((r.date?, 1))), None);
        series.sort_by_key(|e| e.key);
        series
    }

    /// Every ranking with the default list lengths.
    pub fn rankings(&self, record: &StructuredRecord) -> Rankings {
        Rankings {
            most_active_members: self.most_active_members(record, limits::MEMBERS),
            most_active_weekdays: self.most_active_weekdays(record, limits::WEEKDAYS),
            most_active_hours: self.most_active_hours(record, limits::HOURS),
            most_active_days_of_month: self.most_active_days_of_month(record, limits::DAYS_OF_MONTH),
            most_active_times: self.most_active_times(record, limits::TIMES),
            top_word_users: self.top_word_users(record, limits::CONTRIBUTORS),
            top_media_contributors: self.top_media_contributors(record, limits::CONTRIBUTORS),
            top_link_sharers: self.top_link_sharers(record, limits::CONTRIBUTORS),
            emoji_frequency: self.emoji_frequency(record, limits::EMOJI),
            messages_per_date: self.messages_per_date(record),
        }
    }

    /// Every ranking cut to the same length.
    pub fn rankings_with_limit(&self, record: &StructuredRecord, top: usize) -> Rankings {
        Rankings {
            most_active_members: self.most_active_members(record, top),
            most_active_weekdays: self.most_active_weekdays(record, top),
            most_active_hours: self.most_active_hours(record, top),
            most_active_days_of_month: self.most_active_days_of_month(record, top),
            most_active_times: self.most_active_times(record, top),
            top_word_users: self.top_word_users(record, top),
            top_media_contributors: self.top_media_contributors(record, top),
            top_link_sharers: self.top_link_sharers(record, top),
            emoji_frequency: self.emoji_frequency(record, top),
            messages_per_date: self.messages_per_date(record),
        }
    }

    /// Rows of the per-individual view: no system notices, no excluded authors.
    fn people<'r>(&'r self, record: &'r StructuredRecord) -> impl Iterator<Item = &'r ExtractedMessage> + 'r {
        record
            .iter()
            .filter(|r| !r.is_system() && !self.config.is_excluded(&r.author))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::MessageKind;
    use chrono::{TimeZone, Utc};

    fn at(day: u32, hour: u32, minute: u32) -> chrono::DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, day, hour, minute, 0).unwrap()
    }

    fn record() -> StructuredRecord {
        StructuredRecord::from(vec![
            ExtractedMessage::new("system", r#"Alice created group "Weekend Plans""#)
                .with_kind(MessageKind::System)
                .with_timestamp(at(1, 8, 0)),
            ExtractedMessage::new("Alice", "Hello there https://x.co 😀")
                .with_links(vec!["https://x.co".into()])
                .with_emojis(vec!["😀".into()])
                .with_timestamp(at(1, 9, 0)),
            ExtractedMessage::new("Bob", "")
                .with_kind(MessageKind::Media)
                .with_timestamp(at(1, 9, 5)),
            ExtractedMessage::new("Bob", "ok 😀 👍")
                .with_emojis(vec!["😀".into(), "👍".into()])
                .with_timestamp(at(2, 21, 0)),
            ExtractedMessage::new("Alice", "see https://a.io and https://a.io")
                .with_links(vec!["https://a.io".into(), "https://a.io".into()])
                .with_timestamp(at(2, 9, 0)),
            ExtractedMessage::new("Carol", "hi").with_timestamp(at(3, 9, 0)),
        ])
    }

    fn engine() -> StatisticsEngine {
        StatisticsEngine::new(&AnalyzerConfig::default()).unwrap()
    }

    #[test]
    fn test_aggregate() {
        let stats = engine().aggregate(&record());
        assert_eq!(stats.group_name, "Weekend Plans");
        assert_eq!(stats.total_messages, 6);
        assert_eq!(stats.total_members, 3);
        assert_eq!(stats.media_message, 1);
        assert_eq!(stats.link_shared, 3);
    }

    #[test]
    fn test_group_name_falls_back_to_default() {
        let record = StructuredRecord::from(vec![ExtractedMessage::new("A", "x")]);
        assert_eq!(engine().aggregate(&record).group_name, "Group Chat");
    }

    #[test]
    fn test_group_name_ignores_authored_rows() {
        let record = StructuredRecord::from(vec![ExtractedMessage::new(
            "Alice",
            r#"I created group "Fake""#,
        )]);
        assert_eq!(engine().group_name(&record), "Group Chat");
    }

    #[test]
    fn test_author_breakdown() {
        let alice = engine().author_breakdown(&record(), "Alice").unwrap();
        assert_eq!(alice.message_count, 2);
        assert_eq!(alice.emoji_count, 1);
        assert_eq!(alice.link_count, 3);
        assert_eq!(alice.word_count, 8);
        assert!((alice.average_words_per_message - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_author_breakdown_without_rows() {
        let err = engine().author_breakdown(&record(), "Dave").unwrap_err();
        assert!(err.is_division_undefined());
    }

    #[test]
    fn test_author_breakdowns_cover_every_member() {
        let all = engine().author_breakdowns(&record());
        let names: Vec<_> = all.iter().map(|s| s.author.as_str()).collect();
        assert_eq!(names, vec!["Alice", "Bob", "Carol"]);
    }

    #[test]
    fn test_rank_by_is_stable_on_ties() {
        let ranked = rank_by(vec![("b", 1), ("a", 1), ("c", 2), ("a", 0)], None);
        let keys: Vec<_> = ranked.iter().map(|e| e.key).collect();
        assert_eq!(keys, vec!["c", "b", "a"]);
    }

    #[test]
    fn test_rank_by_drops_zero_and_truncates() {
        let ranked = rank_by(vec![("a", 0), ("b", 3), ("c", 1)], Some(1));
        assert_eq!(ranked, vec![RankEntry { key: "b", count: 3 }]);
    }

    #[test]
    fn test_member_rankings_skip_system() {
        let members = engine().most_active_members(&record(), 10);
        assert_eq!(members[0], RankEntry { key: "Alice".to_string(), count: 2 });
        assert_eq!(members[1].key, "Bob");
        assert!(members.iter().all(|e| e.key != "system"));
    }

    #[test]
    fn test_excluded_authors_are_not_ranked() {
        let config = AnalyzerConfig::new().exclude_author("Carol");
        let engine = StatisticsEngine::new(&config).unwrap();
        let members = engine.most_active_members(&record(), 10);
        assert!(members.iter().all(|e| e.key != "Carol"));
    }

    #[test]
    fn test_calendar_rankings() {
        let e = engine();
        let r = record();
        assert_eq!(e.most_active_hours(&r, 1), vec![RankEntry { key: 9, count: 4 }]);
        assert_eq!(e.most_active_days_of_month(&r, 1)[0].key, 1);
        assert_eq!(e.most_active_weekdays(&r, 1)[0].key, "Friday");
        assert_eq!(e.most_active_times(&r, 1)[0].key, "09:00");
    }

    #[test]
    fn test_contributor_rankings() {
        let e = engine();
        let r = record();
        assert_eq!(e.top_media_contributors(&r, 10), vec![RankEntry { key: "Bob".to_string(), count: 1 }]);
        assert_eq!(e.top_link_sharers(&r, 10)[0].count, 3);
        assert_eq!(e.top_word_users(&r, 1)[0].key, "Alice");
    }

    #[test]
    fn test_emoji_frequency() {
        let emoji = engine().emoji_frequency(&record(), 10);
        assert_eq!(emoji[0], RankEntry { key: "😀".to_string(), count: 2 });
        assert_eq!(emoji[1].key, "👍");
    }

    #[test]
    fn test_messages_per_date_is_chronological() {
        let series = engine().messages_per_date(&record());
        let dates: Vec<u32> = series.iter().map(|e| e.key.day()).collect();
        assert_eq!(dates, vec![1, 2, 3]);
        assert_eq!(series[0].count, 2);
    }

    #[test]
    fn test_rankings_with_limit() {
        let all = engine().rankings_with_limit(&record(), 1);
        assert_eq!(all.most_active_members.len(), 1);
        assert_eq!(all.messages_per_date.len(), 3);
    }
}
