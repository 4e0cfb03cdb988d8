//! Simple replication strategy.
//!
//! Places N replicas on the first N distinct nodes clockwise from the key.
//! This works well for:
//!
//! - Small clusters
//! - Single data center deployments
//! - Callers that need a fixed replica count or nothing
//!
//! # Algorithm
//!
//! 1. Find the primary (first point at or after the key's token)
//! 2. Continue clockwise, skipping nodes already chosen
//! 3. Stop after N distinct nodes
//!
//! # Limitations
//!
//! - Doesn't consider data center/rack placement
//! - Fails outright when the ring has fewer than N nodes

use hashring::HashRing;
use tracing::trace;

use crate::error::ReplicationError;
use crate::placement::ReplicaPlacement;
use crate::strategy::ReplicationStrategy;

/// Simple replication strategy: exactly N nodes in ring order.
///
/// # Example
///
/// ```rust
/// use hashring::HashRing;
/// use replication::{ReplicationStrategy, SimpleStrategy};
///
/// let strategy = SimpleStrategy::new(2);
/// let ring = HashRing::with_weights([("a", 1), ("b", 2), ("c", 1)]);
///
/// let placement = strategy.replicas_for_key(&ring, "test").unwrap();
/// assert_eq!(placement.primary, "b");
/// assert_eq!(placement.replicas, vec!["a"]);
/// ```
#[derive(Debug, Clone)]
pub struct SimpleStrategy {
    /// Number of replicas to create (including primary).
    replication_factor: usize,
}

impl SimpleStrategy {
    /// Create a new simple strategy with the given replication factor.
    ///
    /// # Arguments
    /// * `replication_factor` - Number of replicas (typically 1-5)
    ///   - 1: No replication (single copy)
    ///   - 3: Standard (primary + 2 replicas)
    pub fn new(replication_factor: usize) -> Self {
        Self { replication_factor }
    }
}

impl Default for SimpleStrategy {
    /// Three replicas.
    fn default() -> Self {
        Self::new(3)
    }
}

impl ReplicationStrategy for SimpleStrategy {
    fn replication_factor(&self) -> usize {
        self.replication_factor
    }

    fn replicas_for_key(
        &self,
        ring: &HashRing,
        key: &str,
    ) -> Result<ReplicaPlacement, ReplicationError> {
        if self.replication_factor == 0 {
            return Err(ReplicationError::ZeroReplicationFactor);
        }
        if ring.is_empty() {
            return Err(ReplicationError::EmptyRing);
        }

        let nodes = ring
            .get_nodes(key, self.replication_factor)
            .ok_or(ReplicationError::InsufficientNodes {
                requested: self.replication_factor,
                available: ring.node_count(),
            })?;
        trace!(key, ?nodes, strategy = self.name(), "placed replicas");

        ReplicaPlacement::from_candidates(nodes).ok_or(ReplicationError::EmptyRing)
    }

    fn name(&self) -> &'static str {
        "SimpleStrategy"
    }
}
