//! Node registry: one primary plus a rotating replica list

use std::collections::VecDeque;

use parking_lot::Mutex;
use tracing::info;

use crate::node::{Node, NodeAddress};

/// Owns the primary node and the live replica rotation.
///
/// The rotation is an ordered deque: reads pop the front and requeue
/// survivors at the back, so rotation order is significant. "No replicas
/// configured" is tracked separately from "rotation currently empty", since
/// replicas evicted after transport failures shrink the rotation without
/// changing what was configured.
///
/// The mutex around the rotation is held only for pop/push bookkeeping,
/// never across a network call.
#[derive(Debug)]
pub struct NodeRegistry {
    primary: Node,
    rotation: Mutex<VecDeque<Node>>,
    replicas_configured: bool,
}

impl NodeRegistry {
    /// Build a registry from a primary and optional replicas. `None` means
    /// no replicas were configured; `Some(vec![])` means replicas were
    /// asked for but none came up.
    pub fn new(primary: Node, replicas: Option<Vec<Node>>) -> Self {
        let replicas_configured = replicas.is_some();
        let rotation: VecDeque<Node> = replicas.unwrap_or_default().into();

        info!(
            primary = %primary.addr(),
            replicas = rotation.len(),
            "node registry built"
        );

        Self {
            primary,
            rotation: Mutex::new(rotation),
            replicas_configured,
        }
    }

    /// The primary node. Always defined.
    pub fn primary(&self) -> &Node {
        &self.primary
    }

    /// Whether any replicas were configured at construction.
    pub fn replicas_configured(&self) -> bool {
        self.replicas_configured
    }

    /// Addresses of the live rotation in current order, or `None` when no
    /// replicas were configured.
    pub fn replica_addrs(&self) -> Option<Vec<NodeAddress>> {
        if !self.replicas_configured {
            return None;
        }
        let rotation = self.rotation.lock();
        Some(rotation.iter().map(|node| node.addr().clone()).collect())
    }

    /// Linear lookup by address equality over the live rotation.
    pub fn find_replica(&self, addr: &NodeAddress) -> Option<Node> {
        let rotation = self.rotation.lock();
        rotation.iter().find(|node| node.addr() == addr).cloned()
    }

    /// Number of replicas currently in rotation.
    pub fn replica_count(&self) -> usize {
        self.rotation.lock().len()
    }

    /// Pop the front of the rotation. Rotation mutation is reserved for the
    /// router's dispatch logic.
    pub(crate) fn next_replica(&self) -> Option<Node> {
        self.rotation.lock().pop_front()
    }

    /// Requeue a node at the back of the rotation.
    pub(crate) fn requeue_replica(&self, node: Node) {
        self.rotation.lock().push_back(node);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::{Arg, ClientError, NodeClient, Reply};
    use async_trait::async_trait;
    use std::sync::Arc;

    struct NullClient;

    #[async_trait]
    impl NodeClient for NullClient {
        async fn invoke(&self, _command: &str, _args: &[Arg]) -> Result<Reply, ClientError> {
            Ok(Reply::Nil)
        }
    }

    fn node(host: &str) -> Node {
        Node::new(NodeAddress::new(host, 6379), Arc::new(NullClient))
    }

    #[test]
    fn unconfigured_replicas_are_distinguished_from_empty() {
        let primary_only = NodeRegistry::new(node("primary"), None);
        assert!(!primary_only.replicas_configured());
        assert_eq!(primary_only.replica_addrs(), None);

        let configured_empty = NodeRegistry::new(node("primary"), Some(vec![]));
        assert!(configured_empty.replicas_configured());
        assert_eq!(configured_empty.replica_addrs(), Some(vec![]));
    }

    #[test]
    fn rotation_pops_front_and_requeues_back() {
        let registry = NodeRegistry::new(
            node("primary"),
            Some(vec![node("a"), node("b"), node("c")]),
        );

        let first = registry.next_replica().unwrap();
        assert_eq!(first.addr().host, "a");
        registry.requeue_replica(first);

        let addrs = registry.replica_addrs().unwrap();
        let hosts: Vec<&str> = addrs.iter().map(|a| a.host.as_str()).collect();
        assert_eq!(hosts, vec!["b", "c", "a"]);
    }

    #[test]
    fn find_replica_matches_on_address() {
        let registry = NodeRegistry::new(node("primary"), Some(vec![node("a"), node("b")]));

        let found = registry.find_replica(&NodeAddress::new("b", 6379));
        assert_eq!(found.unwrap().addr().host, "b");

        assert!(registry.find_replica(&NodeAddress::new("b", 7000)).is_none());
        assert!(registry.find_replica(&NodeAddress::new("z", 6379)).is_none());
    }

    #[test]
    fn popped_replica_is_absent_until_requeued() {
        let registry = NodeRegistry::new(node("primary"), Some(vec![node("a")]));

        let popped = registry.next_replica().unwrap();
        assert_eq!(registry.replica_count(), 0);
        assert!(registry.next_replica().is_none());

        registry.requeue_replica(popped);
        assert_eq!(registry.replica_count(), 1);
    }
}
