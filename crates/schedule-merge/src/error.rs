//! Error types for schedule-merge operations.

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MergeError {
    /// An input event does not satisfy `start < end`.
    ///
    /// `index` is the event's position after ordering by desirability.
    #[error("Invalid interval at position {index}: start {start} is not before end {end}")]
    InvalidInterval {
        index: usize,
        start: String,
        end: String,
    },
}

pub type Result<T> = std::result::Result<T, MergeError>;
