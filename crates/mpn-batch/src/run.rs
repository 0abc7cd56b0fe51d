//! Sequential fetch-and-accumulate loop.
//!
//! Batches are requested one at a time, in order, with a fixed pause before
//! each request. Every part in a decoded response becomes a [`PartRecord`].
//!
//! Outcomes per batch:
//! * parts returned: records appended, consecutive-failure count reset
//! * no usable response (`Ok(None)` from the fetcher): batch skipped
//! * fault (undecodable body, envelope without results): counted; the run
//!   aborts once the count reaches [`RunConfig::failure_budget`]
//!
//! Records accumulated before an abort are kept in the [`RunReport`].

use std::thread;
use std::time::Duration;

use mouser_api::{ApiError, FetchError, SearchResponse, SearchResults};

use crate::batch::Batch;
use crate::record::PartRecord;

pub const DEFAULT_BATCH_DELAY: Duration = Duration::from_secs(2);
pub const DEFAULT_FAILURE_BUDGET: usize = 3;

#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Pause before every request
    pub batch_delay: Duration,
    /// Consecutive faults that abort the run
    pub failure_budget: usize,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            batch_delay: DEFAULT_BATCH_DELAY,
            failure_budget: DEFAULT_FAILURE_BUDGET,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 1.0;
        }
        self.completed as f64 / self.total as f64
    }
}

#[derive(Debug, thiserror::Error)]
pub enum BatchFault {
    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error("Search response has no results{}", describe_api_errors(.errors))]
    MissingResults { errors: Vec<ApiError> },
}

fn describe_api_errors(errors: &[ApiError]) -> String {
    if errors.is_empty() {
        return String::new();
    }
    let messages: Vec<String> = errors.iter().map(ToString::to_string).collect();
    format!(" ({})", messages.join("; "))
}

#[derive(Debug, thiserror::Error)]
#[error("Run aborted at batch {batch_number} of {total_batches} after {failures} consecutive failures")]
pub struct Aborted {
    /// 1-based
    pub batch_number: usize,
    pub total_batches: usize,
    pub failures: usize,
    #[source]
    pub fault: BatchFault,
}

#[derive(Debug)]
pub struct RunReport {
    pub records: Vec<PartRecord>,
    pub total_batches: usize,
    /// Batches handled before the run ended, skipped ones included
    pub processed_batches: usize,
    /// 0-based indices of batches that got no usable response
    pub skipped_batches: Vec<usize>,
    pub aborted: Option<Aborted>,
}

impl RunReport {
    pub fn is_complete(&self) -> bool {
        self.aborted.is_none()
    }
}

/// Fetch every batch in order and collect the returned parts.
///
/// `fetch` performs one request (its own retry policy included); `on_progress`
/// is called after each batch that did not abort the run.
pub fn run<F, P>(
    batches: &[Batch],
    config: &RunConfig,
    mut fetch: F,
    mut on_progress: P,
) -> RunReport
where
    F: FnMut(&Batch) -> Result<Option<SearchResponse>, FetchError>,
    P: FnMut(Progress),
{
    let total = batches.len();
    let mut report = RunReport {
        records: Vec::new(),
        total_batches: total,
        processed_batches: 0,
        skipped_batches: Vec::new(),
        aborted: None,
    };
    let mut failures = 0;

    for (index, batch) in batches.iter().enumerate() {
        let number = index + 1;
        thread::sleep(config.batch_delay);
        log::debug!("Requesting batch {number}/{total}: {batch}");

        let outcome = match fetch(batch) {
            Ok(Some(response)) => search_results(response).map(Some),
            Ok(None) => Ok(None),
            Err(e) => Err(BatchFault::from(e)),
        };

        match outcome {
            Ok(Some(results)) => {
                report.records.extend(results.parts.iter().map(PartRecord::from));
                failures = 0;
                log::info!(
                    "Batch {number}/{total}: {} results, {} parts added",
                    results.number_of_result,
                    results.parts.len()
                );
            }
            Ok(None) => {
                log::warn!("Batch {number}/{total}: no response, skipping");
                report.skipped_batches.push(index);
            }
            Err(fault) => {
                failures += 1;
                if failures >= config.failure_budget {
                    log::error!("Batch {number}/{total}: {fault}");
                    report.aborted = Some(Aborted {
                        batch_number: number,
                        total_batches: total,
                        failures,
                        fault,
                    });
                    return report;
                }
                log::warn!(
                    "Batch {number}/{total}: {fault} ({failures}/{} consecutive failures)",
                    config.failure_budget
                );
            }
        }

        report.processed_batches = number;
        on_progress(Progress {
            completed: number,
            total,
        });
    }

    report
}

fn search_results(response: SearchResponse) -> Result<SearchResults, BatchFault> {
    if !response.errors.is_empty() {
        log::warn!(
            "Search response reported errors:{}",
            describe_api_errors(&response.errors)
        );
    }

    response.search_results.ok_or(BatchFault::MissingResults {
        errors: response.errors,
    })
}
