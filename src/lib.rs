//! redroute - read/write-splitting command router
//!
//! Routes data-store commands across one primary node and zero or more
//! replicas, choosing the target from a compiled-in command classification.
//!
//! # Architecture
//!
//! ```text
//! dispatch(command, args)
//!     │
//!     ▼
//! ┌─────────────────────────┐
//! │       classify()        │  Read-only or read-write?
//! └───────────┬─────────────┘
//!             │
//!     ┌───────┴────────┐
//!     ▼                ▼
//! read-write       read-only
//!     │                │
//!     ▼                ▼
//! ┌─────────┐   ┌──────────────────────┐
//! │ primary │   │  replica rotation    │  pop front, requeue on success,
//! └─────────┘   │  (fallback: primary) │  evict on transport failure
//!               └──────────────────────┘
//! ```
//!
//! # Routing rules
//!
//! - Read-write commands always execute on the primary.
//! - Read-only commands round-robin over the live replicas; a replica that
//!   fails at the transport level is evicted from the rotation for the life
//!   of the process; when no replica is left the read falls through to the
//!   primary.
//! - Application-level errors from a reachable node never trigger failover.
//!
//! The store's wire protocol and the coordination-service protocol are
//! consumed through the [`NodeClient`], [`NodeConnector`], and
//! [`TopologyDiscovery`] traits; this crate owns no I/O of its own.
//!
//! # Example
//!
//! ```rust,ignore
//! use redroute::{ConnectOptions, Router};
//!
//! let options = ConnectOptions::new().set("password", "hunter2");
//! let router = Router::discover(&sentinel, &connector, "cache", &options).await?;
//!
//! router.dispatch("set", &["k".into(), "v".into()]).await?;
//! let value = router.dispatch("get", &["k".into()]).await?;
//! ```

mod client;
mod command;
mod discovery;
mod error;
mod node;
mod registry;
mod router;

// Re-exports: error types
pub use error::{Result, RouterError};

// Re-exports: command classification
pub use command::{classify, CommandClass, READ_ONLY_COMMANDS, READ_WRITE_COMMANDS};

// Re-exports: consumed capabilities
pub use client::{Arg, ClientError, ConnectOptions, NodeClient, NodeConnector, Reply};
pub use discovery::{discover_registry, DiscoveryError, TopologyDiscovery};

// Re-exports: nodes and routing
pub use node::{Node, NodeAddress};
pub use registry::NodeRegistry;
pub use router::Router;
