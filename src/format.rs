//! Export format selection.
//!
//! [`OutputFormat`] names a writer from [`crate::output`]; [`write_to_format`]
//! and [`to_format_string`] dispatch to it.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn example() -> chatstats::Result<()> {
//! use chatstats::format::{OutputFormat, to_format_string};
//! use chatstats::message::ExtractedMessage;
//! use chatstats::table::StructuredRecord;
//!
//! let record = StructuredRecord::from(vec![ExtractedMessage::new("Alice", "Hello!")]);
//!
//! let format = OutputFormat::from_path("rows.jsonl")?;
//! assert_eq!(format, OutputFormat::Jsonl);
//! let jsonl = to_format_string(&record, format)?;
//! assert_eq!(jsonl.lines().count(), 1);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ChatstatsError, Result};
use crate::table::StructuredRecord;

/// Export format of a structured record.
///
/// - [`Csv`](OutputFormat::Csv) - semicolon-delimited table, opens in spreadsheets
/// - [`Json`](OutputFormat::Json) - array of rows
/// - [`Jsonl`](OutputFormat::Jsonl) - one row per line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[non_exhaustive]
pub enum OutputFormat {
    /// CSV with semicolon delimiter
    #[default]
    Csv,

    /// JSON array of rows
    Json,

    /// JSON Lines, also known as NDJSON
    #[cfg_attr(feature = "cli", value(alias = "ndjson"))]
    Jsonl,
}

impl OutputFormat {
    /// File extension without the dot.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "csv",
            OutputFormat::Json => "json",
            OutputFormat::Jsonl => "jsonl",
        }
    }

    /// Every accepted name, aliases included.
    pub fn all_names() -> &'static [&'static str] {
        &["csv", "json", "jsonl", "ndjson"]
    }

    /// Every format.
    pub fn all() -> &'static [OutputFormat] {
        &[OutputFormat::Csv, OutputFormat::Json, OutputFormat::Jsonl]
    }

    /// MIME type of the format.
    pub fn mime_type(&self) -> &'static str {
        match self {
            OutputFormat::Csv => "text/csv",
            OutputFormat::Json => "application/json",
            OutputFormat::Jsonl => "application/x-ndjson",
        }
    }

    /// Picks the format from a file extension.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let ext = path
            .as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        match ext.as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(ChatstatsError::invalid_format(
                "output",
                format!("Unknown file extension: '.{ext}'. Expected one of: csv, json, jsonl"),
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputFormat::Csv => write!(f, "CSV"),
            OutputFormat::Json => write!(f, "JSON"),
            OutputFormat::Jsonl => write!(f, "JSONL"),
        }
    }
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            "jsonl" | "ndjson" => Ok(OutputFormat::Jsonl),
            _ => Err(format!(
                "Unknown format: '{}'. Expected one of: {}",
                s,
                OutputFormat::all_names().join(", ")
            )),
        }
    }
}

/// Writes the record to `path` in `format`.
///
/// # Errors
///
/// Fails when the file cannot be written or the writer for `format` was not
/// compiled in.
#[allow(unused_variables)]
pub fn write_to_format(
    record: &StructuredRecord,
    path: impl AsRef<Path>,
    format: OutputFormat,
) -> Result<()> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::write_csv(record, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::output::write_json(record, path),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::output::write_jsonl(record, path),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

/// Renders the record as a string in `format`.
#[allow(unused_variables)]
pub fn to_format_string(record: &StructuredRecord, format: OutputFormat) -> Result<String> {
    match format {
        #[cfg(feature = "csv-output")]
        OutputFormat::Csv => crate::output::to_csv(record),
        #[cfg(feature = "json-output")]
        OutputFormat::Json => crate::output::to_json(record),
        #[cfg(feature = "json-output")]
        OutputFormat::Jsonl => crate::output::to_jsonl(record),
        #[allow(unreachable_patterns)]
        _ => Err(missing_feature(format)),
    }
}

#[allow(dead_code)]
fn missing_feature(format: OutputFormat) -> ChatstatsError {
    let feature = match format {
        OutputFormat::Csv => "csv-output",
        OutputFormat::Json | OutputFormat::Jsonl => "json-output",
    };
    ChatstatsError::invalid_format(
        "output",
        format!("Output format {format} requires the '{feature}' feature to be enabled"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::ExtractedMessage;

    #[test]
    fn test_format_from_str() {
        assert_eq!(OutputFormat::from_str("csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_str("JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_str("ndjson").unwrap(), OutputFormat::Jsonl);
        assert!(OutputFormat::from_str("xml").is_err());
    }

    #[test]
    fn test_format_metadata() {
        assert_eq!(OutputFormat::Jsonl.extension(), "jsonl");
        assert_eq!(OutputFormat::Csv.mime_type(), "text/csv");
        assert_eq!(OutputFormat::Json.to_string(), "JSON");
        assert_eq!(OutputFormat::all().len(), 3);
        assert_eq!(OutputFormat::default(), OutputFormat::Csv);
    }

    #[test]
    fn test_format_from_path() {
        assert_eq!(OutputFormat::from_path("rows.csv").unwrap(), OutputFormat::Csv);
        assert_eq!(OutputFormat::from_path("/tmp/rows.JSON").unwrap(), OutputFormat::Json);
        assert_eq!(OutputFormat::from_path("rows.ndjson").unwrap(), OutputFormat::Jsonl);
        let err = OutputFormat::from_path("rows.txt").unwrap_err();
        assert!(err.to_string().contains(".txt"));
        assert!(OutputFormat::from_path("rows").is_err());
    }

    #[test]
    fn test_format_serde() {
        assert_eq!(serde_json::to_string(&OutputFormat::Jsonl).unwrap(), "\"jsonl\"");
        let parsed: OutputFormat = serde_json::from_str("\"csv\"").unwrap();
        assert_eq!(parsed, OutputFormat::Csv);
    }

    #[cfg(all(feature = "csv-output", feature = "json-output"))]
    #[test]
    fn test_dispatch_matches_writers() {
        let record = StructuredRecord::from(vec![ExtractedMessage::new("Alice", "Hi")]);
        assert_eq!(
            to_format_string(&record, OutputFormat::Csv).unwrap(),
            crate::output::to_csv(&record).unwrap()
        );
        assert_eq!(
            to_format_string(&record, OutputFormat::Jsonl).unwrap(),
            crate::output::to_jsonl(&record).unwrap()
        );
    }

    #[cfg(feature = "json-output")]
    #[test]
    fn test_write_to_format() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.json");
        let record = StructuredRecord::from(vec![ExtractedMessage::new("Alice", "Hi")]);
        write_to_format(&record, &path, OutputFormat::Json).unwrap();
        assert!(std::fs::read_to_string(&path).unwrap().contains("\"Alice\""));
    }
}
