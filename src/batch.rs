//! Concurrent batch execution with failure aggregation.
//!
//! Runs a set of independent jobs and collects every failure into one
//! [`ErrorAggregator`] instead of stopping at the first.

use crate::aggregator::ErrorAggregator;
use crate::error::AggregatedError;
use futures::stream::{self, StreamExt};
use std::future::Future;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;
use tracing::{debug, info};

/// Result of running a batch.
#[derive(Debug)]
pub struct BatchOutcome {
    /// Number of jobs run.
    pub total: usize,
    /// Number of jobs that failed.
    pub failed: usize,
    /// `Err` with every failure message when at least one job failed.
    pub result: Result<(), AggregatedError>,
}

impl BatchOutcome {
    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }

    fn from_aggregator(total: usize, errors: ErrorAggregator) -> Self {
        let failed = errors.len();
        Self {
            total,
            failed,
            result: errors.into_result(),
        }
    }
}

/// Runs jobs with bounded concurrency.
#[derive(Debug, Clone)]
pub struct BatchRunner {
    concurrency: usize,
}

impl BatchRunner {
    /// Create a runner with at most `concurrency` jobs in flight (minimum 1).
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Run `job` for every item on the async runtime.
    pub async fn run<I, T, F, Fut>(&self, items: I, job: F) -> BatchOutcome
    where
        I: IntoIterator<Item = T>,
        F: Fn(T) -> Fut,
        Fut: Future<Output = Result<(), String>>,
    {
        let errors = ErrorAggregator::new();
        let total = AtomicUsize::new(0);

        stream::iter(items)
            .for_each_concurrent(self.concurrency, |item| {
                let fut = job(item);
                let errors = &errors;
                let total = &total;
                async move {
                    total.fetch_add(1, Ordering::Relaxed);
                    if let Err(message) = fut.await {
                        debug!("Job failed: {}", message);
                        errors.push(message);
                    }
                }
            })
            .await;

        let total = total.into_inner();
        let outcome = BatchOutcome::from_aggregator(total, errors);
        info!("Batch finished: {} jobs, {} failed", outcome.total, outcome.failed);
        outcome
    }

    /// Run `job` for every item on scoped OS threads, `concurrency` workers
    /// pulling from a shared queue.
    pub fn run_blocking<T, F>(&self, items: Vec<T>, job: F) -> BatchOutcome
    where
        T: Send,
        F: Fn(T) -> Result<(), String> + Sync,
    {
        let total = items.len();
        let errors = ErrorAggregator::new();
        let queue = parking_lot::Mutex::new(items.into_iter());
        let workers = self.concurrency.min(total.max(1));

        thread::scope(|s| {
            for _ in 0..workers {
                s.spawn(|| loop {
                    let next = queue.lock().next();
                    let Some(item) = next else { break };
                    if let Err(message) = job(item) {
                        debug!("Job failed: {}", message);
                        errors.push(message);
                    }
                });
            }
        });

        let outcome = BatchOutcome::from_aggregator(total, errors);
        info!("Batch finished: {} jobs, {} failed", outcome.total, outcome.failed);
        outcome
    }
}
