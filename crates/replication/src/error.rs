//! Replication errors.

use thiserror::Error;

/// Reasons a replica set cannot be placed.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReplicationError {
    /// The ring has no weighted nodes.
    #[error("ring has no nodes")]
    EmptyRing,

    /// Fewer distinct nodes than replicas requested.
    #[error("need {requested} distinct nodes but the ring has {available}")]
    InsufficientNodes { requested: usize, available: usize },

    /// A strategy was asked for zero replicas.
    #[error("replication factor must be at least 1")]
    ZeroReplicationFactor,
}
