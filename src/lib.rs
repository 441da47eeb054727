//! multierror - collect failures from concurrent work and report them as one
//! error.
//!
//! The core type is [`ErrorAggregator`]: create one per batch of fallible
//! work, push a message from every unit of work that fails (from any
//! thread), then ask [`ErrorAggregator::has_failures`] whether the batch as a
//! whole failed. The combined message joins every entry with `", "` in the
//! order the entries were recorded.
//!
//! The remaining modules back the `multierror` command-line tool, which
//! validates many files concurrently and reports all failures together.

pub mod aggregator;
pub mod batch;
pub mod checks;
pub mod cli;
pub mod config;
pub mod error;
pub mod models;
pub mod report;

pub use aggregator::ErrorAggregator;
pub use batch::{BatchOutcome, BatchRunner};
pub use error::AggregatedError;
