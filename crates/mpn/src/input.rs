use std::num::NonZeroUsize;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use mpn_batch::{Batch, Window, DEFAULT_BATCH_SIZE};

/// Options shared by every command that reads an MPN list
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// CSV file with one part number per row in its first column
    #[arg(value_name = "FILE", value_hint = clap::ValueHint::FilePath)]
    pub file: PathBuf,

    /// Treat the first row as a header and skip it
    #[arg(long)]
    pub header: bool,

    /// First part number to read (0-based; blank rows are not counted)
    #[arg(long, value_name = "INDEX")]
    pub start: Option<usize>,

    /// Part number to stop before (0-based, exclusive; blank rows are not counted)
    #[arg(long, value_name = "INDEX")]
    pub stop: Option<usize>,

    /// Part numbers per request
    #[arg(long, value_name = "N", default_value_t = DEFAULT_BATCH_SIZE)]
    pub batch_size: NonZeroUsize,
}

impl InputArgs {
    pub fn window(&self) -> Option<Window> {
        match (self.start, self.stop) {
            (None, None) => None,
            (start, stop) => Some(Window::new(start.unwrap_or(0), stop.unwrap_or(usize::MAX))),
        }
    }

    /// Read the file and group its part numbers, returning the number of MPNs
    /// that made it into a batch alongside the batches.
    pub fn load_batches(&self) -> Result<(usize, Vec<Batch>)> {
        let mpns = mpn_batch::read_mpn_file(&self.file, self.header).with_context(|| {
            format!("Failed to read part numbers from {}", self.file.display())
        })?;
        log::debug!("Read {} part numbers from {}", mpns.len(), self.file.display());

        let batches = mpn_batch::group(&mpns, self.batch_size, self.window());
        let selected = batches.iter().map(Batch::len).sum();
        Ok((selected, batches))
    }
}
