//! Node client capability consumed by the router
//!
//! The router never speaks the store's wire protocol itself. It drives an
//! implementation of [`NodeClient`] (one live connection to one endpoint)
//! obtained through a [`NodeConnector`]. The only thing the router inspects
//! about a failure is whether it was transport level or application level.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::node::NodeAddress;

/// A single command argument, forwarded verbatim to the node client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Arg(Vec<u8>);

impl Arg {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }
}

impl From<&str> for Arg {
    fn from(value: &str) -> Self {
        Self(value.as_bytes().to_vec())
    }
}

impl From<String> for Arg {
    fn from(value: String) -> Self {
        Self(value.into_bytes())
    }
}

impl From<Vec<u8>> for Arg {
    fn from(value: Vec<u8>) -> Self {
        Self(value)
    }
}

impl From<&[u8]> for Arg {
    fn from(value: &[u8]) -> Self {
        Self(value.to_vec())
    }
}

impl From<i64> for Arg {
    fn from(value: i64) -> Self {
        Self(value.to_string().into_bytes())
    }
}

/// Reply returned by a node client. The router forwards replies without
/// interpreting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Reply {
    /// Key or value absent.
    Nil,

    /// Simple-string acknowledgement.
    Ok,

    Integer(i64),

    Bytes(Vec<u8>),

    Array(Vec<Reply>),
}

/// Node client errors. The distinction between the two variants is
/// load-bearing: only transport failures trigger replica failover.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Failed to establish or maintain the connection (refused, reset,
    /// broken pipe).
    #[error("connection error: {0}")]
    Connection(String),

    /// The node was reachable and rejected the request (wrong type, bad
    /// syntax, and so on).
    #[error("server error: {0}")]
    Server(String),
}

impl ClientError {
    /// Whether this failure means the node itself is unreachable.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Connection(_))
    }
}

/// Free-form connection options handed to the connector at construction
/// time. The router passes these through without interpreting any key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConnectOptions(BTreeMap<String, serde_json::Value>);

impl ConnectOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set an option, replacing any previous value for the key.
    pub fn set(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&serde_json::Value> {
        self.0.get(key)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &serde_json::Value)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// One live connection to one store endpoint.
#[async_trait]
pub trait NodeClient: Send + Sync {
    /// Execute `command` with `args` against this endpoint.
    async fn invoke(&self, command: &str, args: &[Arg]) -> Result<Reply, ClientError>;
}

/// Builds node clients from an address plus opaque options.
#[async_trait]
pub trait NodeConnector: Send + Sync {
    async fn connect(
        &self,
        addr: &NodeAddress,
        options: &ConnectOptions,
    ) -> Result<Arc<dyn NodeClient>, ClientError>;
}
