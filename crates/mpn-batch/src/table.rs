use std::io::{self, Write};

use comfy_table::{Cell, Color, Table};

use crate::record::PartRecord;

/// Rows shown by [`write_sample_table`]
pub const SAMPLE_ROWS: usize = 10;

/// Write the first [`SAMPLE_ROWS`] records as a table
pub fn write_sample_table<W: Write>(records: &[PartRecord], mut writer: W) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(comfy_table::presets::UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::DynamicFullWidth);

    table.set_header(vec![
        "MPN",
        "Manufacturer",
        "Description",
        "Lifecycle Status",
        "Lead Time",
        "ROHSStatus",
    ]);

    for record in records.iter().take(SAMPLE_ROWS) {
        let text = |value: &Option<String>| value.clone().unwrap_or_default();
        let lifecycle = text(&record.lifecycle_status);

        let lifecycle_cell = match lifecycle_color(&lifecycle) {
            Some(color) => Cell::new(&lifecycle).fg(color),
            None => Cell::new(&lifecycle),
        };

        table.add_row(vec![
            Cell::new(text(&record.mpn)),
            Cell::new(text(&record.manufacturer)),
            Cell::new(text(&record.description)),
            lifecycle_cell,
            Cell::new(text(&record.lead_time)),
            Cell::new(text(&record.rohs_status)),
        ]);
    }

    writeln!(writer, "{table}")?;
    if records.len() > SAMPLE_ROWS {
        writeln!(writer, "... and {} more", records.len() - SAMPLE_ROWS)?;
    }
    Ok(())
}

fn lifecycle_color(status: &str) -> Option<Color> {
    let status = status.to_ascii_lowercase();
    if status.contains("obsolete") {
        Some(Color::Red)
    } else if status.contains("end of life") || status.contains("not recommended") {
        Some(Color::Yellow)
    } else if status.contains("new") {
        Some(Color::Green)
    } else {
        None
    }
}
