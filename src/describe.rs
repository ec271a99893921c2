//! Parallel package descriptions
//!
//! Running `brew info` once per package is dominated by process start-up, so
//! the queries are fanned out over a fixed pool of workers:
//!
//! - one producer reads the manifest and publishes package names on a job channel
//! - `N` workers pull jobs and run one `brew info` at a time on the blocking pool
//! - successes go to a results channel, errors to a failures channel
//! - a supervisor joins every worker, then drops the last senders of both
//!   channels so the caller's drain loop ends
//!
//! Results reach the caller in completion order, not manifest order. A failed
//! query never stops its worker; after all results are drained the first
//! recorded failure becomes the overall error.

use crate::error::{RebrewError, Result};
use crate::manifest::{ManifestReader, PackageName};
use crate::runner::CommandRunner;
use std::num::NonZeroUsize;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::{Mutex, mpsc};
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Number of concurrent `brew info` queries
pub const DEFAULT_WORKERS: NonZeroUsize = NonZeroUsize::new(30).unwrap();

/// Lines kept from the head of `brew info` output
const DESCRIPTION_LINES: usize = 3;

/// The first lines of `brew info` output for one package
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Description {
    pub package: String,
    pub text: String,
}

/// Outcome of a fully successful [`describe_all`] run
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DescribeSummary {
    pub described: usize,
}

/// Take the first three lines of `output`, verbatim.
pub fn extract_description(package: &str, output: &str) -> Result<String> {
    let lines: Vec<&str> = output.split('\n').take(DESCRIPTION_LINES).collect();

    if lines.len() < DESCRIPTION_LINES {
        return Err(RebrewError::UnexpectedOutput {
            package: package.to_string(),
            output: output.to_string(),
        });
    }

    Ok(lines.join("\n"))
}

/// Query the description of a single package
pub fn describe_one(runner: &dyn CommandRunner, package: &str) -> Result<Description> {
    let args = ["info", package];
    let output = runner
        .run(&args)?
        .into_success(&runner.command_line(&args))?;

    let text = extract_description(package, &output.combined())?;

    Ok(Description {
        package: package.to_string(),
        text,
    })
}

/// One description as printed: the record, then a blank line
pub fn format_description(description: &Description) -> String {
    format!("{}\n\n", description.text)
}

pub fn print_description(description: &Description) {
    print!("{}", format_description(description));
}

/// Describe every package in the manifest using `workers` concurrent queries.
///
/// Each description is handed to `sink` as soon as it arrives. Returns the
/// first failure if any query failed; the descriptions that did succeed have
/// still been delivered.
pub async fn describe_all<F>(
    runner: Arc<dyn CommandRunner>,
    manifest: &Path,
    workers: usize,
    mut sink: F,
) -> Result<DescribeSummary>
where
    F: FnMut(Description),
{
    let workers = workers.max(1);
    let reader = ManifestReader::open(manifest).await?;

    info!(path = %manifest.display(), workers, "describing packages");

    let (job_tx, job_rx) = mpsc::channel::<PackageName>(1);
    let (result_tx, mut result_rx) = mpsc::unbounded_channel::<Description>();
    let (failure_tx, mut failure_rx) = mpsc::unbounded_channel::<RebrewError>();

    let producer = tokio::spawn(produce(reader, job_tx, failure_tx.clone()));

    // tokio's mpsc has a single receiver; the workers take turns holding it
    // only while waiting for the next job, never while a query runs
    let jobs = Arc::new(Mutex::new(job_rx));
    let handles: Vec<JoinHandle<()>> = (0..workers)
        .map(|id| {
            tokio::spawn(work(
                id,
                Arc::clone(&runner),
                Arc::clone(&jobs),
                result_tx.clone(),
                failure_tx.clone(),
            ))
        })
        .collect();
    drop(jobs);

    let supervisor = tokio::spawn(supervise(producer, handles, result_tx, failure_tx));

    let mut described = 0;
    while let Some(description) = result_rx.recv().await {
        described += 1;
        sink(description);
    }

    supervisor
        .await
        .map_err(|e| RebrewError::Worker(e.to_string()))?;

    if let Some(first) = failure_rx.recv().await {
        let mut dropped = 0;
        while let Some(extra) = failure_rx.recv().await {
            warn!(error = %extra, "additional describe failure");
            dropped += 1;
        }
        if dropped > 0 {
            warn!(dropped, "only the first describe failure is reported");
        }
        return Err(first);
    }

    info!(described, "descriptions complete");
    Ok(DescribeSummary { described })
}

async fn produce(
    mut reader: ManifestReader,
    jobs: mpsc::Sender<PackageName>,
    failures: mpsc::UnboundedSender<RebrewError>,
) {
    loop {
        match reader.next_package().await {
            Ok(Some(package)) => {
                debug!(%package, "dispatching");
                if jobs.send(package).await.is_err() {
                    // every worker is gone
                    break;
                }
            }
            Ok(None) => break,
            Err(e @ RebrewError::InvalidPackageName { .. }) => {
                let _ = failures.send(e);
            }
            Err(e) => {
                let _ = failures.send(e);
                break;
            }
        }
    }
}

async fn work(
    id: usize,
    runner: Arc<dyn CommandRunner>,
    jobs: Arc<Mutex<mpsc::Receiver<PackageName>>>,
    results: mpsc::UnboundedSender<Description>,
    failures: mpsc::UnboundedSender<RebrewError>,
) {
    debug!(worker = id, "worker started");

    loop {
        let package = jobs.lock().await.recv().await;
        let Some(package) = package else {
            break;
        };

        let runner = Arc::clone(&runner);
        let query = tokio::task::spawn_blocking(move || {
            describe_one(runner.as_ref(), &package.to_str_lossy())
        });

        match query.await {
            Ok(Ok(description)) => {
                let _ = results.send(description);
            }
            Ok(Err(e)) => {
                debug!(worker = id, error = %e, "query failed");
                let _ = failures.send(e);
            }
            Err(e) => {
                let _ = failures.send(RebrewError::Worker(e.to_string()));
            }
        }
    }

    debug!(worker = id, "worker finished");
}

async fn supervise(
    producer: JoinHandle<()>,
    workers: Vec<JoinHandle<()>>,
    results: mpsc::UnboundedSender<Description>,
    failures: mpsc::UnboundedSender<RebrewError>,
) {
    if let Err(e) = producer.await {
        let _ = failures.send(RebrewError::Worker(e.to_string()));
    }
    for handle in workers {
        if let Err(e) = handle.await {
            let _ = failures.send(RebrewError::Worker(e.to_string()));
        }
    }

    // closes both channels for the caller
    drop(results);
    drop(failures);
}
