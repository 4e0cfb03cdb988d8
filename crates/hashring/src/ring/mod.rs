//! Consistent hash ring implementation.
//!
//! - [`builder`]: lay out the sorted virtual-point table from node weights
//! - [`lookup`]: route keys to one or several nodes
//! - [`mutate`]: derive new generations on membership changes
//! - [`shared`]: publish generations to concurrent readers
//! - [`topology`], [`diff`]: keyspace ownership and key movement analysis

pub mod builder;
pub mod diff;
mod hash_ring;
pub mod lookup;
pub mod mutate;
pub mod shared;
pub mod topology;

pub use builder::RingBuilder;
pub use diff::KeyMove;
pub use hash_ring::HashRing;
pub use shared::SharedRing;
pub use topology::TokenRange;

/// Alias for the main ring type.
pub type Ring = HashRing;
