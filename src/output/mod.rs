//! Record export.
//!
//! - [`write_csv`] / [`to_csv`] - semicolon-delimited CSV, one row per message - requires `csv-output`
//! - [`write_json`] / [`to_json`] - JSON array of rows - requires `json-output`
//! - [`write_jsonl`] / [`to_jsonl`] - one JSON row per line - requires `json-output`
//!
//! Writers take the record by reference and never modify it.
//!
//! # Example
//!
//! ```rust
//! # #[cfg(all(feature = "csv-output", feature = "json-output"))]
//! # fn main() -> chatstats::Result<()> {
//! use chatstats::message::ExtractedMessage;
//! use chatstats::output::{to_csv, to_jsonl};
//! use chatstats::table::StructuredRecord;
//!
//! let record = StructuredRecord::from(vec![
//!     ExtractedMessage::new("Alice", "Hello!"),
//!     ExtractedMessage::new("Bob", "Hi there!"),
//! ]);
//!
//! let csv = to_csv(&record)?;
//! assert!(csv.starts_with("Index;Line;Timestamp;Author;Kind;Words;Links;Emojis;Text"));
//! assert_eq!(to_jsonl(&record)?.lines().count(), 2);
//! # Ok(())
//! # }
//! # #[cfg(not(all(feature = "csv-output", feature = "json-output")))]
//! # fn main() {}
//! ```

#[cfg(feature = "csv-output")]
mod csv_writer;
#[cfg(feature = "json-output")]
mod json_writer;
#[cfg(feature = "json-output")]
mod jsonl_writer;

#[cfg(feature = "csv-output")]
pub use csv_writer::{CSV_HEADER, to_csv, write_csv};
#[cfg(feature = "json-output")]
pub use json_writer::{to_json, write_json};
#[cfg(feature = "json-output")]
pub use jsonl_writer::{to_jsonl, write_jsonl};
