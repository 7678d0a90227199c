//! Error types for energy_path

use thiserror::Error;

/// Reasons a planning call produces no path
#[derive(Error, Debug)]
pub enum PlanError {
    /// Room description is not valid JSON or has the wrong shape
    #[error("Malformed room description: {0}")]
    MalformedInput(#[from] serde_json::Error),

    /// Room description has no `objects` list
    #[error("Room description has no objects list")]
    MissingObjects,

    /// No door to route the path through
    #[error("Room has no door")]
    NoDoor,

    /// Grid search exhausted without reaching the goal cell
    #[error("Goal cell unreachable from start cell")]
    Unreachable,

    /// Search aborted through a cancel token
    #[error("Search cancelled")]
    Cancelled,

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Visualization error: {0}")]
    Visualization(String),
}

/// Result type alias for planning operations
pub type PlanResult<T> = Result<T, PlanError>;
