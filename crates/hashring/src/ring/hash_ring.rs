//! The immutable ring value.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::node::{NodeName, Weight};
use crate::vnode::VirtualPoint;

/// One generation of the key → node mapping.
///
/// A `HashRing` is the sorted table of virtual points plus the weight map that
/// produced it. It is never modified after construction: the mutators in
/// [`mutate`](super::mutate) return a new generation and leave `self` as it
/// was. Both parts sit behind `Arc`, so cloning a ring (to hand a snapshot to
/// another thread, say) is O(1).
///
/// Two rings compare equal when their point tables and weight maps are equal,
/// which implies they route every key identically.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HashRing {
    /// Virtual points, strictly ascending by `(token, node, replica)`.
    pub(super) points: Arc<[VirtualPoint]>,
    /// Nodes with weight > 0.
    pub(super) weights: Arc<BTreeMap<NodeName, Weight>>,
}

impl HashRing {
    pub(super) fn from_parts(points: Vec<VirtualPoint>, weights: BTreeMap<NodeName, Weight>) -> Self {
        debug_assert!(points.windows(2).all(|w| w[0] < w[1]));
        Self {
            points: points.into(),
            weights: Arc::new(weights),
        }
    }

    /// Number of nodes on the ring.
    pub fn node_count(&self) -> usize {
        self.weights.len()
    }

    /// Number of virtual points on the ring.
    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// True when no node has a positive weight.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.weights.contains_key(name)
    }

    /// Weight of `name`, or `None` if the node is not on the ring.
    pub fn weight(&self, name: &str) -> Option<Weight> {
        self.weights.get(name).copied()
    }

    pub fn total_weight(&self) -> u64 {
        self.weights.values().map(|&w| u64::from(w)).sum()
    }

    /// Nodes and their weights, ordered by name.
    pub fn nodes(&self) -> impl Iterator<Item = (&str, Weight)> + '_ {
        self.weights.iter().map(|(name, &w)| (name.as_str(), w))
    }

    /// The sorted point table.
    pub fn points(&self) -> &[VirtualPoint] {
        &self.points
    }
}
