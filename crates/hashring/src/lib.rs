//! Weighted consistent hashing.
//!
//! This crate maps string keys onto a changing set of weighted nodes:
//! - Token hashing on a fixed `u32` circle
//! - Virtual points, proportional to node weight
//! - Immutable ring generations with primary and N-way lookup
//! - Mutators that move only the affected node's keys
//!
//! ```rust
//! use hashring::HashRing;
//!
//! let ring = HashRing::new(["a", "b", "c"]);
//! assert_eq!(ring.get_node("test1"), Some("b"));
//!
//! let next = ring.remove_node("b");
//! assert_eq!(next.get_node("test1"), Some("c"));
//! assert_eq!(next.get_node("test"), ring.get_node("test"));
//! ```

pub mod error;
pub mod node;
pub mod ring;
pub mod token;
pub mod vnode;

pub use error::{Error, Result};
pub use node::{NodeName, Weight, WeightedNode, DEFAULT_WEIGHT, MAX_WEIGHT};
pub use ring::{HashRing, KeyMove, Ring, RingBuilder, SharedRing, TokenRange};
pub use token::Token;
pub use vnode::VirtualPoint;
