//! Routing error type.

use thiserror::Error;

use tn_core::NodeId;

use crate::Algorithm;

/// Errors produced by `tn-routing`.
///
/// An unreachable target is not an error; see
/// [`PlannedPath::unreachable`](crate::PlannedPath::unreachable).
#[derive(Debug, Error)]
pub enum RoutingError {
    #[error("node {0} not found in network")]
    NodeNotFound(NodeId),

    #[error("unknown algorithm {0:?}: expected \"dijkstra\" or \"bellman-ford\"")]
    UnknownAlgorithm(String),

    #[error("{algorithm} failed: {reason}")]
    AlgorithmFailure { algorithm: Algorithm, reason: String },
}

pub type RoutingResult<T> = Result<T, RoutingError>;
