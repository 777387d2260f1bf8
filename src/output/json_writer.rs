//! JSON output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::table::StructuredRecord;

/// Writes the record to a file as a pretty-printed JSON array.
///
/// # Format
/// ```json
/// [
///   {"index": 0, "line": 0, "timestamp": "2023-01-12T09:00:00Z", "author": "Alice", ...},
///   {"index": 1, "line": 1, "author": "system", "kind": "system", ...}
/// ]
/// ```
///
/// Calendar fields and the timestamp are omitted on rows whose timestamp
/// did not resolve.
pub fn write_json(record: &StructuredRecord, output_path: impl AsRef<Path>) -> Result<()> {
    let json = to_json(record)?;
    let mut file = File::create(output_path)?;
    file.write_all(json.as_bytes())?;
    Ok(())
}

/// Converts the record to a JSON array string.
pub fn to_json(record: &StructuredRecord) -> Result<String> {
    Ok(serde_json::to_string_pretty(record)?)
}
