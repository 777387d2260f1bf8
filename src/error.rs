//! Unified error types for chatstats.
//!
//! This module provides a single [`ChatstatsError`] enum that covers all error
//! cases in the library.
//!
//! # Error Handling Philosophy
//!
//! - **Row-level** problems (an unparsable timestamp) are recovered inside the
//!   pipeline: the row is kept and flagged, never dropped
//! - **Transcript-level** problems ([`ChatstatsError::UnrecognizedTranscriptFormat`])
//!   abort the pipeline with a distinct error instead of an empty record
//! - **Statistics** problems ([`ChatstatsError::DivisionUndefined`]) are
//!   surfaced to the caller instead of producing `NaN` or zero

use std::io;

use thiserror::Error;

/// A specialized [`Result`] type for chatstats operations.
///
/// # Example
///
/// ```rust
/// use chatstats::error::Result;
/// use chatstats::table::StructuredRecord;
///
/// fn my_function() -> Result<StructuredRecord> {
///     Ok(StructuredRecord::default())
/// }
/// ```
pub type Result<T> = std::result::Result<T, ChatstatsError>;

/// The error type for all chatstats operations.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatstatsError {
    /// An I/O error occurred while reading a transcript or writing an export.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The first line of the transcript is not a message start, or the
    /// transcript contains no message at all.
    ///
    /// This is fatal for the whole pipeline: there is nothing to segment.
    #[error("Unrecognized transcript format at line {}: {preview:?}", line + 1)]
    UnrecognizedTranscriptFormat {
        /// Zero-based line offset of the offending line
        line: usize,
        /// The first characters of the offending line
        preview: String,
    },

    /// A message timestamp matched none of the configured formats.
    ///
    /// The feature extractor recovers from this by flagging the row.
    #[error("Timestamp '{input}' matches none of the configured formats")]
    TimestampParse {
        /// The timestamp text that failed to resolve
        input: String,
    },

    /// Average words per message was requested for an author with no rows.
    #[error("Average words per message is undefined for '{author}': no messages")]
    DivisionUndefined {
        /// The author that was requested
        author: String,
    },

    /// A configuration value is unusable.
    #[error("Invalid configuration for '{field}': {message}")]
    InvalidConfig {
        /// The offending configuration field
        field: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// A configured regular expression failed to compile.
    #[error("Invalid pattern: {0}")]
    Pattern(#[from] regex::Error),

    /// Invalid date format in filter configuration.
    ///
    /// Date filters expect YYYY-MM-DD format.
    #[error("Invalid date '{input}'. Expected format: {expected}")]
    InvalidDate {
        /// The invalid date string that was provided
        input: String,
        /// Expected format description
        expected: &'static str,
    },

    /// The requested export format is unknown or not enabled.
    #[error("Invalid {format} format: {message}")]
    InvalidFormat {
        /// The format that was expected
        format: &'static str,
        /// Description of what's wrong
        message: String,
    },

    /// CSV writing error.
    #[cfg(feature = "csv-output")]
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error.
    #[cfg(feature = "json-output")]
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML configuration error.
    #[cfg(feature = "yaml-config")]
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// UTF-8 encoding error.
    #[error("UTF-8 encoding error in {context}: {source}")]
    Utf8 {
        /// Description of where the error occurred
        context: String,
        /// The underlying UTF-8 error
        #[source]
        source: std::string::FromUtf8Error,
    },
}

impl From<std::string::FromUtf8Error> for ChatstatsError {
    fn from(err: std::string::FromUtf8Error) -> Self {
        ChatstatsError::Utf8 {
            context: "output conversion".to_string(),
            source: err,
        }
    }
}

// ============================================================================
// Convenience constructors
// ============================================================================

impl ChatstatsError {
    /// Creates an unrecognized transcript error, keeping the first 60 chars of the line.
    pub fn unrecognized(line: usize, text: &str) -> Self {
        ChatstatsError::UnrecognizedTranscriptFormat {
            line,
            preview: text.chars().take(60).collect(),
        }
    }

    /// Creates a timestamp parse error.
    pub fn timestamp_parse(input: impl Into<String>) -> Self {
        ChatstatsError::TimestampParse {
            input: input.into(),
        }
    }

    /// Creates a division-undefined error for the given author.
    pub fn division_undefined(author: impl Into<String>) -> Self {
        ChatstatsError::DivisionUndefined {
            author: author.into(),
        }
    }

    /// Creates an invalid configuration error.
    pub fn invalid_config(field: &'static str, message: impl Into<String>) -> Self {
        ChatstatsError::InvalidConfig {
            field,
            message: message.into(),
        }
    }

    /// Creates an invalid format error.
    pub fn invalid_format(format: &'static str, message: impl Into<String>) -> Self {
        ChatstatsError::InvalidFormat {
            format,
            message: message.into(),
        }
    }

    /// Creates an invalid date error.
    pub fn invalid_date(input: impl Into<String>) -> Self {
        ChatstatsError::InvalidDate {
            input: input.into(),
            expected: "YYYY-MM-DD",
        }
    }

    /// Returns `true` if this is an IO error.
    pub fn is_io(&self) -> bool {
        matches!(self, ChatstatsError::Io(_))
    }

    /// Returns `true` if the transcript as a whole could not be recognized.
    pub fn is_unrecognized_format(&self) -> bool {
        matches!(self, ChatstatsError::UnrecognizedTranscriptFormat { .. })
    }

    /// Returns `true` if this is a timestamp parse error.
    pub fn is_timestamp_parse(&self) -> bool {
        matches!(self, ChatstatsError::TimestampParse { .. })
    }

    /// Returns `true` if this is a division-undefined error.
    pub fn is_division_undefined(&self) -> bool {
        matches!(self, ChatstatsError::DivisionUndefined { .. })
    }

    /// Returns `true` if this is a configuration error.
    pub fn is_invalid_config(&self) -> bool {
        matches!(
            self,
            ChatstatsError::InvalidConfig { .. } | ChatstatsError::Pattern(_)
        )
    }

    /// Returns `true` if this is a date-related error.
    pub fn is_invalid_date(&self) -> bool {
        matches!(self, ChatstatsError::InvalidDate { .. })
    }
}
