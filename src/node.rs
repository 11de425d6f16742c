//! Node addresses and handles

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::client::NodeClient;

/// A (host, port) endpoint. Equality on this type is the key for explicit
/// replica targeting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeAddress {
    pub host: String,
    pub port: u16,
}

impl NodeAddress {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl From<(&str, u16)> for NodeAddress {
    fn from((host, port): (&str, u16)) -> Self {
        Self::new(host, port)
    }
}

impl From<(String, u16)> for NodeAddress {
    fn from((host, port): (String, u16)) -> Self {
        Self::new(host, port)
    }
}

/// An address paired with its live client handle. Nodes are created once,
/// at registry construction, and live for the router's lifetime.
#[derive(Clone)]
pub struct Node {
    addr: NodeAddress,
    client: Arc<dyn NodeClient>,
}

impl Node {
    pub fn new(addr: NodeAddress, client: Arc<dyn NodeClient>) -> Self {
        Self { addr, client }
    }

    pub fn addr(&self) -> &NodeAddress {
        &self.addr
    }

    pub fn client(&self) -> &dyn NodeClient {
        self.client.as_ref()
    }
}

impl fmt::Debug for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Node").field("addr", &self.addr).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn address_display_is_host_port() {
        let addr = NodeAddress::new("10.0.0.1", 6379);
        assert_eq!(addr.to_string(), "10.0.0.1:6379");
    }

    #[test]
    fn address_equality_keys_on_host_and_port() {
        let a = NodeAddress::from(("replica-1", 6379));
        let b = NodeAddress::new("replica-1", 6379);
        let c = NodeAddress::new("replica-1", 6380);

        assert_eq!(a, b);
        assert_ne!(a, c);
    }
}
