//! Timestamp resolution.
//!
//! Timestamps are resolved by trying the configured chrono formats in order;
//! the first one that parses wins. Exports carry no timezone, so resolved
//! values are naive local times stored as [`DateTime<Utc>`].

use chrono::{DateTime, NaiveDateTime, Utc};

use crate::config::AnalyzerConfig;
use crate::error::{ChatstatsError, Result};

/// Resolves timestamp text into a calendar datetime.
#[derive(Debug, Clone)]
pub struct DatetimeResolver {
    formats: Vec<String>,
}

impl DatetimeResolver {
    /// Creates a resolver from the configured formats.
    pub fn new(config: &AnalyzerConfig) -> Result<Self> {
        Self::with_formats(config.timestamp_formats.clone())
    }

    /// Creates a resolver from an explicit, ordered format list.
    pub fn with_formats(formats: Vec<String>) -> Result<Self> {
        if formats.is_empty() {
            return Err(ChatstatsError::invalid_config(
                "timestamp_formats",
                "at least one format is required",
            ));
        }
        Ok(Self { formats })
    }

    /// Returns the formats in the order they are tried.
    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    /// Resolves `timestamp_text`, failing with [`ChatstatsError::TimestampParse`]
    /// when no format matches.
    pub fn resolve(&self, timestamp_text: &str) -> Result<DateTime<Utc>> {
        let normalized = normalize(timestamp_text);

        self.formats
            .iter()
            .find_map(|format| NaiveDateTime::parse_from_str(&normalized, format).ok())
            .map(|naive| naive.and_utc())
            .ok_or_else(|| ChatstatsError::timestamp_parse(timestamp_text))
    }
}

/// Replaces the exotic spaces newer exports use (narrow no-break space
/// before AM/PM, no-break space) with plain spaces.
fn normalize(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| match c {
            '\u{202f}' | '\u{00a0}' | '\u{2009}' => ' ',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Preset;
    use chrono::{Datelike, TimeZone, Timelike};

    fn resolver(preset: Preset) -> DatetimeResolver {
        DatetimeResolver::new(&AnalyzerConfig::for_preset(preset)).unwrap()
    }

    #[test]
    fn test_resolve_12h_day_first() {
        let ts = resolver(Preset::Android).resolve("12/01/23, 9:00 AM").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 1, 12, 9, 0, 0).unwrap());
    }

    #[test]
    fn test_resolve_pm() {
        let ts = resolver(Preset::Android).resolve("12/01/23, 9:05 PM").unwrap();
        assert_eq!(ts.hour(), 21);
        assert_eq!(ts.minute(), 5);
    }

    #[test]
    fn test_resolve_noon_and_midnight() {
        let r = resolver(Preset::Android);
        assert_eq!(r.resolve("12/01/23, 12:00 PM").unwrap().hour(), 12);
        assert_eq!(r.resolve("12/01/23, 12:30 AM").unwrap().hour(), 0);
    }

    #[test]
    fn test_resolve_24h() {
        let ts = resolver(Preset::Android).resolve("12/01/2023, 21:15").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2023, 1, 12, 21, 15, 0).unwrap());
    }

    #[test]
    fn test_two_digit_year_is_not_year_23() {
        let ts = resolver(Preset::Android).resolve("12/01/23, 21:15").unwrap();
        assert_eq!(ts.year(), 2023);
    }

    #[test]
    fn test_resolve_with_seconds() {
        let ts = resolver(Preset::IosBracketed).resolve("1/15/24, 10:30:45 AM").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 45).unwrap());
    }

    #[test]
    fn test_resolve_narrow_no_break_space() {
        let ts = resolver(Preset::Android).resolve("12/01/23, 9:00\u{202f}PM").unwrap();
        assert_eq!(ts.hour(), 21);
    }

    #[test]
    fn test_resolve_eu_dot() {
        let ts = resolver(Preset::EuDot).resolve("26.10.2025, 20:40").unwrap();
        assert_eq!(ts, Utc.with_ymd_and_hms(2025, 10, 26, 20, 40, 0).unwrap());
    }

    #[test]
    fn test_first_matching_format_wins() {
        let r = DatetimeResolver::with_formats(vec![
            "%m/%d/%y, %H:%M".to_string(),
            "%d/%m/%y, %H:%M".to_string(),
        ])
        .unwrap();
        let ts = r.resolve("03/04/24, 10:00").unwrap();
        assert_eq!(ts.month(), 3);
    }

    #[test]
    fn test_unparsable_timestamp() {
        let err = resolver(Preset::Android).resolve("99/99/99, 9:00 AM").unwrap_err();
        assert!(err.is_timestamp_parse());
        assert!(resolver(Preset::Android).resolve("").is_err());
    }

    #[test]
    fn test_empty_format_list_rejected() {
        assert!(DatetimeResolver::with_formats(Vec::new()).is_err());
    }
}
