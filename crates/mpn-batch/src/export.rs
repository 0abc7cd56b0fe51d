use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::record::PartRecord;

pub const EXPORT_HEADER: [&str; 10] = [
    "MPN",
    "Description",
    "Category",
    "Manufacturer",
    "Lifecycle Status",
    "Lead Time",
    "ROHSStatus",
    "SuggestedReplacement",
    "ProductCompliance",
    "ProductAttributes",
];

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Failed to write CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to encode record: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Write a header row followed by one row per record, in order
pub fn write_csv<W: Write>(records: &[PartRecord], writer: W) -> Result<(), ExportError> {
    let mut out = csv::Writer::from_writer(writer);
    out.write_record(EXPORT_HEADER)?;
    for record in records {
        out.write_record(record.to_row()?)?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_csv_file(records: &[PartRecord], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    write_csv(records, BufWriter::new(file))
}
