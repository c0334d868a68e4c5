//! Network-subsystem error type.

use thiserror::Error;

/// Errors produced by `tn-network`.
///
/// `NodeNotFound` and `EdgeNotFound` are user input errors: the operation
/// is aborted and the graph is left untouched.
#[derive(Debug, Error)]
pub enum NetworkError {
    #[error("node {0:?} not found in network")]
    NodeNotFound(String),

    #[error("no road from {from:?} to {to:?}")]
    EdgeNotFound { from: String, to: String },

    #[error("road from {from:?} to {to:?} already exists")]
    DuplicateEdge { from: String, to: String },

    #[error("road from {from:?} to {to:?} has invalid base weight {weight}: must be positive and at most 1e9")]
    InvalidWeight { from: String, to: String, weight: f64 },

    #[error("network parse error: {0}")]
    Parse(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type NetworkResult<T> = Result<T, NetworkError>;
