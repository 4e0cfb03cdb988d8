//! Replication strategy abstractions.
//!
//! Strategies turn a ring's N-way lookup into a replica set. They differ in
//! what they do when the ring cannot supply enough distinct nodes:
//!
//! - **SimpleStrategy**: exactly N nodes or an error
//! - **BestEffortStrategy**: up to N nodes, as many as the ring has

pub mod best_effort;
pub mod simple;

pub use best_effort::BestEffortStrategy;
pub use simple::SimpleStrategy;

use hashring::HashRing;

use crate::error::ReplicationError;
use crate::placement::ReplicaPlacement;

/// Trait for replication strategies.
///
/// # Thread Safety
///
/// Implementations must be thread-safe (Send + Sync) as they may be
/// shared across threads routing against the same ring snapshot.
pub trait ReplicationStrategy: Send + Sync + 'static {
    /// Number of nodes (primary included) each key is placed on.
    fn replication_factor(&self) -> usize;

    /// Nodes that should hold `key`, primary first.
    ///
    /// # Performance
    /// O(log P + scan) where P = point count; see `HashRing::get_nodes`.
    fn replicas_for_key(
        &self,
        ring: &HashRing,
        key: &str,
    ) -> Result<ReplicaPlacement, ReplicationError>;

    /// Strategy name (for logging/debugging).
    fn name(&self) -> &'static str;
}
