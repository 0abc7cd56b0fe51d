use std::io::{self, Write};

use anyhow::Result;
use clap::{Args, ValueEnum};
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::Table;
use mpn_batch::Batch;

use crate::input::InputArgs;

#[derive(ValueEnum, Debug, Clone, Default)]
pub enum BatchesFormat {
    #[default]
    Text,
    Table,
}

impl std::fmt::Display for BatchesFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchesFormat::Text => write!(f, "text"),
            BatchesFormat::Table => write!(f, "table"),
        }
    }
}

#[derive(Args, Debug, Clone)]
#[command(about = "Show the request strings a fetch would send, one batch per line")]
pub struct BatchesArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Output format
    #[arg(short, long, default_value_t = BatchesFormat::Text)]
    pub format: BatchesFormat,
}

pub fn execute(args: BatchesArgs) -> Result<()> {
    let (_, batches) = args.input.load_batches()?;

    let mut writer = io::stdout().lock();
    match args.format {
        BatchesFormat::Text => write_batch_lines(&batches, &mut writer)?,
        BatchesFormat::Table => write_batch_table(&batches, &mut writer)?,
    }

    Ok(())
}

fn write_batch_lines<W: Write>(batches: &[Batch], mut writer: W) -> io::Result<()> {
    for batch in batches {
        writeln!(writer, "{batch}")?;
    }
    Ok(())
}

fn write_batch_table<W: Write>(batches: &[Batch], mut writer: W) -> io::Result<()> {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_content_arrangement(comfy_table::ContentArrangement::DynamicFullWidth);
    table.set_header(vec!["#", "Count", "Part numbers"]);

    for (index, batch) in batches.iter().enumerate() {
        table.add_row(vec![
            (index + 1).to_string(),
            batch.len().to_string(),
            batch.query(),
        ]);
    }

    writeln!(writer, "{table}")?;
    Ok(())
}
