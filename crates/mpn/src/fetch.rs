use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use mouser_api::{ClientConfig, MouserClient, API_KEY_SIGNUP_URL};
use mpn_batch::{RunConfig, RunReport};

use crate::input::InputArgs;

#[derive(Args, Debug, Clone)]
#[command(about = "Fetch Mouser part data for every MPN in a CSV file")]
pub struct FetchArgs {
    #[command(flatten)]
    pub input: InputArgs,

    /// Mouser search API key [default: $MOUSER_API_KEY]
    #[arg(long, value_name = "KEY")]
    pub api_key: Option<String>,

    /// CSV file to write results to
    #[arg(short, long, value_name = "PATH", default_value = "output_data.csv")]
    pub output: PathBuf,

    /// Seconds to wait before each request
    #[arg(long, value_name = "SECS", default_value_t = 2)]
    pub delay_secs: u64,

    /// Seconds to wait before retrying a rejected (403) request
    #[arg(long, value_name = "SECS", default_value_t = 10)]
    pub retry_delay_secs: u64,

    /// Per-request timeout in seconds
    #[arg(long, value_name = "SECS")]
    pub timeout_secs: Option<u64>,
}

pub fn execute(args: FetchArgs) -> Result<()> {
    let api_key = require_api_key(
        args.api_key
            .clone()
            .or_else(|| std::env::var("MOUSER_API_KEY").ok()),
    )?;

    let (mpn_count, batches) = args.input.load_batches()?;
    if batches.is_empty() {
        anyhow::bail!("No part numbers selected from {}", args.input.file.display());
    }

    let client_config = ClientConfig {
        retry_delay: Duration::from_secs(args.retry_delay_secs),
        timeout: args.timeout_secs.map(Duration::from_secs),
        ..ClientConfig::new(api_key)
    };
    let client = MouserClient::new(&client_config)?;
    let run_config = RunConfig {
        batch_delay: Duration::from_secs(args.delay_secs),
        ..RunConfig::default()
    };

    eprintln!(
        "{} {} part numbers in {} batches",
        "Fetching".green().bold(),
        mpn_count,
        batches.len()
    );

    let progress = ProgressBar::new(batches.len() as u64);
    progress.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} batches ({elapsed})")?
            .progress_chars("=> "),
    );
    progress.enable_steady_tick(Duration::from_millis(100));

    let report = mpn_batch::run(
        &batches,
        &run_config,
        |batch| client.search_by_part(&batch.query()),
        |p| progress.set_position(p.completed as u64),
    );
    progress.finish_and_clear();

    finish(report, &args.output)
}

fn require_api_key(candidate: Option<String>) -> Result<String> {
    match candidate.as_deref().map(str::trim) {
        Some(key) if !key.is_empty() => Ok(key.to_string()),
        _ => anyhow::bail!(
            "Missing Mouser API key. Pass --api-key or set MOUSER_API_KEY (get one at {})",
            API_KEY_SIGNUP_URL
        ),
    }
}

/// Export whatever the run gathered, then surface an abort as the command's error.
fn finish(report: RunReport, output: &Path) -> Result<()> {
    if report.records.is_empty() {
        let err = anyhow::anyhow!("No part data returned for {} batches", report.total_batches);
        return match report.aborted {
            Some(aborted) => Err(anyhow::Error::new(aborted).context(err.to_string())),
            None => Err(err),
        };
    }

    mpn_batch::write_csv_file(&report.records, output)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!("{}", "Results sample".bold());
    mpn_batch::write_sample_table(&report.records, io::stdout().lock())?;

    let mut summary = format!(
        "{} records from {}/{} batches",
        report.records.len(),
        report.processed_batches,
        report.total_batches
    );
    if !report.skipped_batches.is_empty() {
        summary.push_str(&format!(", {} skipped", report.skipped_batches.len()));
    }
    eprintln!(
        "{} {summary} -> {}",
        "✓".green(),
        output.display().to_string().cyan()
    );

    match report.aborted {
        Some(aborted) => Err(aborted.into()),
        None => Ok(()),
    }
}
