//! Topology bootstrap
//!
//! One-shot snapshot of a service's primary/replica layout from an
//! external coordination service. The snapshot happens at construction
//! only; topology changes pushed later are not observed.

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::client::{ConnectOptions, NodeConnector};
use crate::error::{Result, RouterError};
use crate::node::{Node, NodeAddress};
use crate::registry::NodeRegistry;

/// Coordination-service failures during bootstrap.
#[derive(Debug, Error)]
pub enum DiscoveryError {
    #[error("coordinator unreachable: {0}")]
    Unreachable(String),

    #[error("malformed coordinator reply: {0}")]
    Malformed(String),
}

/// Reports which node currently holds the primary role for a service and
/// which hold replica roles.
#[async_trait]
pub trait TopologyDiscovery: Send + Sync {
    /// Current primary for `service`, or `None` when the coordinator does
    /// not know one.
    async fn primary_addr(
        &self,
        service: &str,
    ) -> std::result::Result<Option<NodeAddress>, DiscoveryError>;

    /// Current replicas for `service`. An empty set is a legitimate answer.
    async fn replica_addrs(
        &self,
        service: &str,
    ) -> std::result::Result<Vec<NodeAddress>, DiscoveryError>;
}

/// Resolve the topology for `service` and connect a registry.
///
/// A missing primary is fatal ([`RouterError::PrimaryNotFound`]): a router
/// cannot exist without one. Missing replicas degrade to a primary-only
/// registry. A discovered replica whose connection attempt fails is skipped
/// with a warning rather than failing the bootstrap.
pub async fn discover_registry(
    discovery: &dyn TopologyDiscovery,
    connector: &dyn NodeConnector,
    service: &str,
    options: &ConnectOptions,
) -> Result<NodeRegistry> {
    let primary_addr = discovery
        .primary_addr(service)
        .await?
        .ok_or_else(|| RouterError::PrimaryNotFound(service.to_string()))?;

    let primary_client = connector.connect(&primary_addr, options).await?;
    let primary = Node::new(primary_addr.clone(), primary_client);
    info!(service, primary = %primary_addr, "discovered primary");

    let replica_addrs = discovery.replica_addrs(service).await?;
    if replica_addrs.is_empty() {
        info!(service, "no replicas discovered, running primary-only");
        return Ok(NodeRegistry::new(primary, None));
    }

    let mut replicas = Vec::with_capacity(replica_addrs.len());
    for addr in replica_addrs {
        match connector.connect(&addr, options).await {
            Ok(client) => replicas.push(Node::new(addr, client)),
            Err(err) => {
                warn!(
                    service,
                    replica = %addr,
                    error = %err,
                    "skipping unreachable replica at bootstrap"
                );
            }
        }
    }

    Ok(NodeRegistry::new(primary, Some(replicas)))
}
