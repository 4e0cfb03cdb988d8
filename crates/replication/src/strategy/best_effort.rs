//! Best-effort replication strategy.
//!
//! Like [`SimpleStrategy`](super::SimpleStrategy) but caps the replica count
//! at the number of nodes on the ring, so a shrinking cluster degrades to
//! fewer copies instead of refusing writes.

use hashring::HashRing;
use tracing::{debug, trace};

use crate::error::ReplicationError;
use crate::placement::ReplicaPlacement;
use crate::strategy::ReplicationStrategy;

/// Up to N nodes in ring order.
#[derive(Debug, Clone)]
pub struct BestEffortStrategy {
    replication_factor: usize,
}

impl BestEffortStrategy {
    pub fn new(replication_factor: usize) -> Self {
        Self { replication_factor }
    }
}

impl ReplicationStrategy for BestEffortStrategy {
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

        let count = self.replication_factor.min(ring.node_count());
        if count < self.replication_factor {
            debug!(
                requested = self.replication_factor,
                available = count,
                "ring too small, placing fewer replicas"
            );
        }

        let nodes = ring.get_nodes(key, count).unwrap_or_default();
        trace!(key, ?nodes, strategy = self.name(), "placed replicas");
        ReplicaPlacement::from_candidates(nodes).ok_or(ReplicationError::EmptyRing)
    }

    fn name(&self) -> &'static str {
        "BestEffortStrategy"
    }
}
