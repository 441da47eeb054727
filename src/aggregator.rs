//! Thread-safe collection of failure messages.
//!
//! An [`ErrorAggregator`] is created per batch of fallible work. Every unit
//! of work that fails pushes a message; once the batch is done the caller
//! asks [`ErrorAggregator::has_failures`] whether anything went wrong and,
//! if so, propagates the aggregator (or an owned [`AggregatedError`]) as the
//! single error for the whole batch.
//!
//! ```
//! use multierror::ErrorAggregator;
//!
//! let errors = ErrorAggregator::new();
//! errors.push("disk full");
//! errors.push("network timeout");
//!
//! let err = errors.has_failures().unwrap_err();
//! assert_eq!(err.to_string(), "disk full, network timeout");
//! ```

use crate::error::{AggregatedError, SEPARATOR};
use parking_lot::RwLock;
use std::fmt;
use tracing::trace;

/// Ordered, append-only list of error messages guarded by a read/write lock.
///
/// Writers (`push`, `push_error`, `extend`) take the exclusive lock for a
/// single insertion. Readers take the shared lock and may overlap each other.
#[derive(Default)]
pub struct ErrorAggregator {
    entries: RwLock<Vec<String>>,
}

impl ErrorAggregator {
    /// Create an empty aggregator.
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(Vec::new()),
        }
    }

    /// Record one failure. Any text is accepted, including the empty string.
    pub fn push(&self, message: impl Into<String>) {
        let message = message.into();
        let count = {
            let mut entries = self.entries.write();
            entries.push(message);
            entries.len()
        };
        trace!(count, "recorded failure");
    }

    /// Record the `Display` text of an error.
    pub fn push_error<E: fmt::Display + ?Sized>(&self, err: &E) {
        self.push(err.to_string());
    }

    /// Record several failures under one lock acquisition, keeping their order.
    pub fn extend<I, S>(&self, messages: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        // Materialize first so caller code never runs under the lock.
        let messages: Vec<String> = messages.into_iter().map(Into::into).collect();
        if messages.is_empty() {
            return;
        }

        let count = {
            let mut entries = self.entries.write();
            entries.extend(messages);
            entries.len()
        };
        trace!(count, "recorded failures");
    }

    /// `Ok(())` while nothing has been recorded, otherwise the aggregator
    /// itself as the error. The combined text is only built when the error
    /// is displayed.
    pub fn has_failures(&self) -> Result<(), &Self> {
        if self.entries.read().is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }

    /// All messages joined with `", "` in recorded order. Empty string when
    /// nothing has been recorded.
    pub fn format(&self) -> String {
        self.entries.read().join(SEPARATOR)
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Consistent copy of the recorded messages.
    pub fn messages(&self) -> Vec<String> {
        self.entries.read().clone()
    }

    /// Owned result built from the current contents. The aggregator keeps
    /// accepting pushes afterwards.
    pub fn snapshot_result(&self) -> Result<(), AggregatedError> {
        let entries = self.entries.read();
        if entries.is_empty() {
            Ok(())
        } else {
            Err(AggregatedError::new(entries.clone()))
        }
    }

    /// Consume the aggregator into an owned result.
    pub fn into_result(self) -> Result<(), AggregatedError> {
        let entries = self.entries.into_inner();
        if entries.is_empty() {
            Ok(())
        } else {
            Err(AggregatedError::new(entries))
        }
    }
}

impl fmt::Display for ErrorAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let entries = self.entries.read();
        for (i, message) in entries.iter().enumerate() {
            if i > 0 {
                f.write_str(SEPARATOR)?;
            }
            f.write_str(message)?;
        }
        Ok(())
    }
}

impl fmt::Debug for ErrorAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ErrorAggregator")
            .field("entries", &*self.entries.read())
            .finish()
    }
}

impl std::error::Error for ErrorAggregator {}

impl<S: Into<String>> FromIterator<S> for ErrorAggregator {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            entries: RwLock::new(iter.into_iter().map(Into::into).collect()),
        }
    }
}
