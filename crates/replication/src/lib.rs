//! Replication strategies for consistent hashing.
//!
//! This crate decides which nodes hold the copies of a key:
//! - How many replicas to place
//! - Which nodes receive them, primary first
//! - What happens when the ring is too small

pub mod error;
pub mod placement;
pub mod strategy;

pub use error::ReplicationError;
pub use placement::ReplicaPlacement;
pub use strategy::{BestEffortStrategy, ReplicationStrategy, SimpleStrategy};
