//! CSV output writer.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::error::Result;
use crate::message::ExtractedMessage;
use crate::table::StructuredRecord;

/// Column names, in order.
pub const CSV_HEADER: [&str; 9] = [
    "Index",
    "Line",
    "Timestamp",
    "Author",
    "Kind",
    "Words",
    "Links",
    "Emojis",
    "Text",
];

/// Writes the record to CSV with a semicolon delimiter.
///
/// # Format
/// - Delimiter: `;`
/// - Columns: [`CSV_HEADER`]
/// - `Timestamp`: `%Y-%m-%d %H:%M:%S`, empty when unparsable
/// - `Links` and `Emojis`: space-separated
/// - Encoding: UTF-8
pub fn write_csv(record: &StructuredRecord, output_path: impl AsRef<Path>) -> Result<()> {
    let file = File::create(output_path)?;
    write_records(record, file)
}

/// Converts the record to a CSV string.
///
/// Same format as [`write_csv`].
pub fn to_csv(record: &StructuredRecord) -> Result<String> {
    let mut buffer = Vec::new();
    write_records(record, &mut buffer)?;
    Ok(String::from_utf8(buffer)?)
}

fn write_records<W: Write>(record: &StructuredRecord, sink: W) -> Result<()> {
    let mut writer = csv::WriterBuilder::new().delimiter(b';').from_writer(sink);

    writer.write_record(CSV_HEADER)?;
    for row in record {
        writer.write_record(build_record(row))?;
    }

    writer.flush()?;
    Ok(())
}

fn build_record(row: &ExtractedMessage) -> [String; 9] {
    [
        row.index.to_string(),
        row.line.to_string(),
        row.timestamp
            .map(|ts| ts.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_default(),
        row.author.clone(),
        row.kind.to_string(),
        row.word_count.to_string(),
        row.links.join(" "),
        row.emojis.join(" "),
        row.text.clone(),
    ]
}
