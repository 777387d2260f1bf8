//! JSON Lines output writer.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::Result;
use crate::table::StructuredRecord;

/// Writes the record to a file, one JSON row per line.
pub fn write_jsonl(record: &StructuredRecord, output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    let mut writer = BufWriter::new(file);

    for row in record {
        serde_json::to_writer(&mut writer, row)?;
        writer.write_all(b"\n")?;
    }

    writer.flush()?;
    Ok(())
}

/// Converts the record to a JSON Lines string.
pub fn to_jsonl(record: &StructuredRecord) -> Result<String> {
    let mut out = String::new();
    for row in record {
        out.push_str(&serde_json::to_string(row)?);
        out.push('\n');
    }
    Ok(out)
}
