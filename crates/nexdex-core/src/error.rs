//! Error types for graph and simulation operations.
//!
//! Only violated preconditions are errors: malformed graph input and
//! references to services that do not exist. Dangling dependencies and
//! cycles are ordinary query results (see
//! [`DependencyGraph::validate_dependencies`](crate::graph::DependencyGraph::validate_dependencies)
//! and
//! [`DependencyGraph::detect_circular_dependencies`](crate::graph::DependencyGraph::detect_circular_dependencies)).

use std::io;
use thiserror::Error;

/// Result type for nexdex operations.
pub type Result<T> = std::result::Result<T, Error>;

/// The error type for nexdex operations.
#[derive(Debug, Error)]
pub enum Error {
    /// The graph definition is structurally malformed.
    #[error("configuration error: {0}")]
    Config(String),

    /// A call referenced a service that is not in the graph.
    #[error("service '{0}' not found in configuration")]
    ServiceNotFound(String),

    /// File system operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A writer panicked while holding the shared graph lock.
    #[error("shared graph lock poisoned")]
    LockPoisoned,
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(e: serde_yaml::Error) -> Self {
        Self::Config(e.to_string())
    }
}
