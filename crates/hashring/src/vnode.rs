//! Virtual points.
//!
//! Each node occupies many positions on the ring, one [`VirtualPoint`] per
//! position. The count is proportional to the node's weight, which is what
//! gives heavier nodes a larger share of the keyspace, and what confines
//! key movement on a membership change to the affected node's points.
//!
//! # Ordering
//!
//! Points order by token, then node name, then replica index. Equal tokens
//! from different nodes therefore sort the same way no matter in which order
//! the nodes were supplied.

use crate::node::{clamp_weight, NodeName, Weight};
use crate::token::{Token, DIGESTS_PER_WEIGHT, POINTS_PER_DIGEST};

/// A single position on the ring owned by a node.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct VirtualPoint {
    /// Position on the ring.
    pub token: Token,
    /// The node that owns this position.
    pub node: NodeName,
    /// Index of the point within its node's point set.
    pub replica: u32,
}

impl VirtualPoint {
    #[inline]
    pub fn new(token: Token, node: NodeName, replica: u32) -> Self {
        Self {
            token,
            node,
            replica,
        }
    }

    /// All points of `node` at `weight`, sorted.
    ///
    /// Digest `j` contributes replicas `POINTS_PER_DIGEST * j + word`.
    /// Weights above [`MAX_WEIGHT`](crate::MAX_WEIGHT) are clamped.
    pub fn for_node(node: &NodeName, weight: Weight) -> Vec<VirtualPoint> {
        let digests = clamp_weight(weight) as usize * DIGESTS_PER_WEIGHT;
        let mut points = Vec::with_capacity(digests * POINTS_PER_DIGEST);

        for digest_index in 0..digests {
            let tokens = Token::from_node_digest(node.as_str(), digest_index);
            for (word, token) in tokens.into_iter().enumerate() {
                let replica = (digest_index * POINTS_PER_DIGEST + word) as u32;
                points.push(VirtualPoint::new(token, node.clone(), replica));
            }
        }

        points.sort_unstable();
        points
    }

    #[inline]
    pub fn token(&self) -> Token {
        self.token
    }

    #[inline]
    pub fn node(&self) -> &str {
        self.node.as_str()
    }
}

impl std::fmt::Display for VirtualPoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}@{}#{}", self.node, self.token, self.replica)
    }
}
