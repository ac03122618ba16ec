use thiserror::Error;

use crate::data_structures::frontier::EmptyQueueError;

/// Error produced when a search fails.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum SearchError {
    /// Start or goal is not part of the searched space.
    #[error("Unknown vertex '{0}'")]
    UnknownVertex(String),

    /// The algorithm tried to take from an empty frontier. Logic defect.
    #[error(transparent)]
    EmptyQueue(#[from] EmptyQueueError),

    /// The frontier ran out before reaching the goal.
    #[error("No path found")]
    NoPathFound,

    /// Stepping a search that already produced its result.
    #[error("Search already completed")]
    AlreadyCompleted,

    /// A parent link without a matching edge. Logic defect.
    #[error("No edge between {from} and {to} while rebuilding the path")]
    MissingEdge { from: String, to: String },
}

/// Result when a search might fail.
pub type SearchResult<T> = std::result::Result<T, SearchError>;
