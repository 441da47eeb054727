//! Owned aggregated error.
//!
//! [`AggregatedError`] is what an [`ErrorAggregator`](crate::ErrorAggregator)
//! turns into once a batch of work is finished and the failures need to leave
//! the scope that collected them.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Separator placed between messages in the combined text.
pub const SEPARATOR: &str = ", ";

/// One or more recorded failures, owned.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{}", .messages.join(SEPARATOR))]
#[serde(try_from = "RawAggregatedError")]
pub struct AggregatedError {
    messages: Vec<String>,
}

/// Wire form, checked before it becomes an [`AggregatedError`].
#[derive(Deserialize)]
struct RawAggregatedError {
    messages: Vec<String>,
}

impl TryFrom<RawAggregatedError> for AggregatedError {
    type Error = &'static str;

    fn try_from(raw: RawAggregatedError) -> Result<Self, Self::Error> {
        if raw.messages.is_empty() {
            return Err("aggregated error must contain at least one message");
        }
        Ok(Self::new(raw.messages))
    }
}

impl AggregatedError {
    pub(crate) fn new(messages: Vec<String>) -> Self {
        Self { messages }
    }

    /// Messages in the order they were recorded.
    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn into_messages(self) -> Vec<String> {
        self.messages
    }
}
