//! Producing new ring generations.
//!
//! Mutators never touch the receiver. Each one copies the points of the nodes
//! it does not affect in their existing order and merges in, or filters out,
//! only the affected node's points. Keys therefore move only to or from that
//! node; every other node keeps exactly the keys it had.
//!
//! Inputs that would not change the ring (zero weights, adding a present
//! node, removing or updating an absent one) return a clone of the receiver.

use std::cmp::Ordering;

use tracing::{debug, trace};

use super::HashRing;
use crate::node::{clamp_weight, NodeName, Weight, DEFAULT_WEIGHT};
use crate::vnode::VirtualPoint;

impl HashRing {
    /// Add `name` with the default weight.
    pub fn add_node(&self, name: impl Into<NodeName>) -> HashRing {
        self.add_weighted_node(name, DEFAULT_WEIGHT)
    }

    /// Add `name` with `weight`.
    ///
    /// Weights above [`MAX_WEIGHT`](crate::MAX_WEIGHT) are clamped. No-op
    /// when `weight` is 0 or `name` is already on the ring, whatever its
    /// weight; use [`update_weighted_node`](Self::update_weighted_node) to
    /// change an existing node.
    pub fn add_weighted_node(&self, name: impl Into<NodeName>, weight: Weight) -> HashRing {
        let name = name.into();
        let weight = clamp_weight(weight);
        if weight == 0 || self.weights.contains_key(&name) {
            trace!(node = %name, weight, "add is a no-op");
            return self.clone();
        }

        let added = VirtualPoint::for_node(&name, weight);
        let points = merge(self.points.iter().cloned(), added);

        let mut weights = (*self.weights).clone();
        weights.insert(name.clone(), weight);

        debug!(node = %name, weight, points = points.len(), "added node to ring");
        HashRing::from_parts(points, weights)
    }

    /// Remove `name` and all of its points. No-op when absent.
    pub fn remove_node(&self, name: &str) -> HashRing {
        if !self.weights.contains_key(name) {
            trace!(node = name, "remove is a no-op");
            return self.clone();
        }

        let points: Vec<VirtualPoint> = self
            .points
            .iter()
            .filter(|point| point.node.as_str() != name)
            .cloned()
            .collect();

        let mut weights = (*self.weights).clone();
        weights.remove(name);

        debug!(node = name, points = points.len(), "removed node from ring");
        HashRing::from_parts(points, weights)
    }

    /// Change the weight of a node already on the ring.
    ///
    /// No-op when `name` is absent (it is never added implicitly), when
    /// `weight` is 0 (this is not a removal), or when `weight`, clamped to
    /// [`MAX_WEIGHT`](crate::MAX_WEIGHT), equals the current weight.
    pub fn update_weighted_node(&self, name: &str, weight: Weight) -> HashRing {
        let weight = clamp_weight(weight);
        let (name, current) = match self.weights.get_key_value(name) {
            Some((name, &current)) if weight != 0 && weight != current => (name.clone(), current),
            _ => {
                trace!(node = name, weight, "update is a no-op");
                return self.clone();
            }
        };

        let retained = self
            .points
            .iter()
            .filter(|point| point.node != name)
            .cloned();
        let points = merge(retained, VirtualPoint::for_node(&name, weight));

        let mut weights = (*self.weights).clone();
        weights.insert(name.clone(), weight);

        debug!(
            node = %name,
            from = current,
            to = weight,
            points = points.len(),
            "reweighted node"
        );
        HashRing::from_parts(points, weights)
    }
}

/// Merge a sorted run of existing points with a sorted run of new ones.
fn merge<I>(existing: I, added: Vec<VirtualPoint>) -> Vec<VirtualPoint>
where
    I: Iterator<Item = VirtualPoint>,
{
    let (lower, upper) = existing.size_hint();
    let mut merged = Vec::with_capacity(upper.unwrap_or(lower) + added.len());
    let mut existing = existing.peekable();
    let mut added = added.into_iter().peekable();

    loop {
        let take_existing = match (existing.peek(), added.peek()) {
            (Some(a), Some(b)) => a.cmp(b) != Ordering::Greater,
            (Some(_), None) => true,
            (None, Some(_)) => false,
            (None, None) => break,
        };
        let next = if take_existing {
            existing.next()
        } else {
            added.next()
        };
        merged.extend(next);
    }

    merged
}
