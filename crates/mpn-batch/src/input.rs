use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

#[derive(Debug, thiserror::Error)]
pub enum InputError {
    #[error("Failed to open {}: {source}", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),
}

/// Part numbers from the first column of a CSV document, in row order.
///
/// Rows whose first cell is blank are dropped. With `has_header` the first
/// row is treated as column names and skipped.
pub fn read_mpns<R: Read>(reader: R, has_header: bool) -> Result<Vec<String>, InputError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(has_header)
        .flexible(true)
        .from_reader(reader);

    let mut mpns = Vec::new();
    for (row, result) in reader.records().enumerate() {
        let record = result?;

        // Spreadsheet exports often start with a byte order mark
        let mpn = record
            .get(0)
            .unwrap_or("")
            .trim_start_matches('\u{feff}')
            .trim();
        if mpn.is_empty() {
            log::debug!("Skipping row {row}: empty part number");
            continue;
        }

        mpns.push(mpn.to_string());
    }

    Ok(mpns)
}

pub fn read_mpn_file(path: &Path, has_header: bool) -> Result<Vec<String>, InputError> {
    let file = File::open(path).map_err(|source| InputError::Open {
        path: path.to_path_buf(),
        source,
    })?;
    read_mpns(file, has_header)
}
