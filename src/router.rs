//! Dispatch engine
//!
//! Classifies each command and routes it to the primary or to a rotating
//! replica. Read-only commands sweep the replica rotation once: a healthy
//! replica serves the read and rejoins the rotation at the tail; a replica
//! that fails at the transport level is evicted for the life of the
//! process; when the rotation is exhausted the read falls through to the
//! primary, unguarded.

use tracing::{debug, warn};

use crate::client::{Arg, ConnectOptions, NodeConnector, Reply};
use crate::command::{classify, CommandClass};
use crate::discovery::{discover_registry, TopologyDiscovery};
use crate::error::{Result, RouterError};
use crate::node::NodeAddress;
use crate::registry::NodeRegistry;

/// Routes commands across one primary and zero or more replicas.
///
/// The router exclusively owns its [`NodeRegistry`]; share the router
/// itself (`Arc<Router>`) for concurrent use.
pub struct Router {
    registry: NodeRegistry,
}

impl Router {
    pub fn new(registry: NodeRegistry) -> Self {
        Self { registry }
    }

    /// Build a router by snapshotting the topology from a coordination
    /// service. See [`discover_registry`] for the degraded-state rules.
    pub async fn discover(
        discovery: &dyn TopologyDiscovery,
        connector: &dyn NodeConnector,
        service: &str,
        options: &ConnectOptions,
    ) -> Result<Self> {
        let registry = discover_registry(discovery, connector, service, options).await?;
        Ok(Self::new(registry))
    }

    /// Classify `command` and dispatch it to the matching node.
    ///
    /// Read-write commands go straight to the primary. Read-only commands
    /// run the rotation sweep. Unknown commands fail before any network
    /// activity.
    pub async fn dispatch(&self, command: &str, args: &[Arg]) -> Result<Reply> {
        match classify(command)? {
            CommandClass::ReadWrite => self.invoke_primary(command, args).await,
            CommandClass::ReadOnly => self.dispatch_read(command, args).await,
        }
    }

    /// Execute `command` on the primary, bypassing classification. No
    /// failover: a transport error propagates to the caller.
    pub async fn dispatch_on_primary(&self, command: &str, args: &[Arg]) -> Result<Reply> {
        self.invoke_primary(command, args).await
    }

    /// Execute `command` on the replica at `addr`, bypassing classification
    /// and rotation. Fails with [`RouterError::ReplicaNotFound`] when no
    /// live rotation entry matches; client errors propagate uncaught.
    pub async fn dispatch_on_replica(
        &self,
        addr: &NodeAddress,
        command: &str,
        args: &[Arg],
    ) -> Result<Reply> {
        let replica = self
            .registry
            .find_replica(addr)
            .ok_or_else(|| RouterError::ReplicaNotFound(addr.clone()))?;

        debug!(replica = %replica.addr(), command, "explicit replica dispatch");
        Ok(replica.client().invoke(command, args).await?)
    }

    /// Address of the current primary.
    pub fn primary_addr(&self) -> NodeAddress {
        self.registry.primary().addr().clone()
    }

    /// Addresses of the live replica rotation, or `None` when no replicas
    /// were configured.
    pub fn replica_addrs(&self) -> Option<Vec<NodeAddress>> {
        self.registry.replica_addrs()
    }

    pub fn registry(&self) -> &NodeRegistry {
        &self.registry
    }

    /// One pass over the replica rotation, then the primary.
    async fn dispatch_read(&self, command: &str, args: &[Arg]) -> Result<Reply> {
        while let Some(replica) = self.registry.next_replica() {
            match replica.client().invoke(command, args).await {
                Ok(reply) => {
                    // Healthy replica rejoins at the tail: subsequent reads
                    // prefer the least recently used survivor.
                    self.registry.requeue_replica(replica);
                    return Ok(reply);
                }
                Err(err) if err.is_transport() => {
                    // Not requeued: the replica leaves the rotation for the
                    // rest of the process's life.
                    warn!(
                        replica = %replica.addr(),
                        error = %err,
                        "evicting unreachable replica from rotation"
                    );
                }
                Err(err) => {
                    // The node is reachable; the command itself was
                    // rejected. Keep the replica and surface the error.
                    self.registry.requeue_replica(replica);
                    return Err(err.into());
                }
            }
        }

        debug!(command, "replica rotation exhausted, falling back to primary");
        self.invoke_primary(command, args).await
    }

    async fn invoke_primary(&self, command: &str, args: &[Arg]) -> Result<Reply> {
        Ok(self.registry.primary().client().invoke(command, args).await?)
    }
}
