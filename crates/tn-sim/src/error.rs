use thiserror::Error;

use tn_core::CoreError;
use tn_network::NetworkError;
use tn_routing::RoutingError;

/// Errors surfaced by a [`Session`](crate::Session).
///
/// Whatever the variant, the session state is unchanged after an error.
#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Config(#[from] CoreError),

    #[error(transparent)]
    Network(#[from] NetworkError),

    #[error(transparent)]
    Routing(#[from] RoutingError),
}

pub type SimResult<T> = Result<T, SimError>;
