//! Router error types

use thiserror::Error;

use crate::client::ClientError;
use crate::discovery::DiscoveryError;
use crate::node::NodeAddress;

/// Errors surfaced by the router and its bootstrap path.
#[derive(Debug, Error)]
pub enum RouterError {
    /// Command name absent from both classification tables. Raised before
    /// any network activity.
    #[error("unknown command: {0}")]
    UnknownCommand(String),

    /// Topology discovery could not resolve a primary for the service.
    /// Fatal: a router cannot exist without a primary.
    #[error("no primary found for service: {0}")]
    PrimaryNotFound(String),

    /// Explicit replica targeting named an address with no matching entry
    /// in the live rotation.
    #[error("replica not found: {0}")]
    ReplicaNotFound(NodeAddress),

    /// The coordination service itself failed during bootstrap.
    #[error("discovery error: {0}")]
    Discovery(#[from] DiscoveryError),

    /// Propagated node client failure, transport or application level.
    #[error(transparent)]
    Client(#[from] ClientError),
}

pub type Result<T> = std::result::Result<T, RouterError>;
