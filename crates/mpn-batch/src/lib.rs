//! Batched part-number lookups.
//!
//! The pipeline is: read part numbers ([`input`]), split them into
//! `|`-joined request batches ([`batch`]), fetch each batch in order while
//! accumulating the returned parts ([`run`]), and write the accumulated
//! records out as CSV ([`export`]).
//!
//! Nothing here talks to the network directly. [`run::run`] takes the fetch
//! step as a closure, which in production wraps
//! [`mouser_api::MouserClient::search_by_part`].

pub mod batch;
pub mod export;
pub mod input;
pub mod record;
pub mod run;
#[cfg(feature = "table")]
mod table;

pub use batch::{group, Batch, Window, DEFAULT_BATCH_SIZE, DELIMITER};
pub use export::{write_csv, write_csv_file, ExportError, EXPORT_HEADER};
pub use input::{read_mpn_file, read_mpns, InputError};
pub use record::PartRecord;
pub use run::{
    run, Aborted, BatchFault, Progress, RunConfig, RunReport, DEFAULT_BATCH_DELAY,
    DEFAULT_FAILURE_BUDGET,
};
#[cfg(feature = "table")]
pub use table::{write_sample_table, SAMPLE_ROWS};
