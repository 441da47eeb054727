//! Data models for check reports.

use crate::batch::BatchOutcome;
use crate::error::AggregatedError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Metadata about a check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    /// When the run finished.
    pub checked_at: DateTime<Utc>,
    /// Number of files checked.
    pub files_checked: usize,
    /// Number of files that failed a check.
    pub files_failed: usize,
    /// Wall-clock duration of the run.
    pub duration_seconds: f64,
}

/// Result of a check run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckReport {
    pub metadata: ReportMetadata,
    /// Every failure, or `None` when all checks passed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub failures: Option<AggregatedError>,
}

impl CheckReport {
    /// Build a report from a finished batch.
    pub fn from_outcome(outcome: BatchOutcome, duration_seconds: f64) -> Self {
        Self {
            metadata: ReportMetadata {
                checked_at: Utc::now(),
                files_checked: outcome.total,
                files_failed: outcome.failed,
                duration_seconds,
            },
            failures: outcome.result.err(),
        }
    }

    pub fn passed(&self) -> bool {
        self.failures.is_none()
    }
}
