//! Building a ring from a node set.

use std::collections::BTreeMap;

use tracing::debug;

use super::HashRing;
use crate::node::{clamp_weight, NodeName, Weight, DEFAULT_WEIGHT};
use crate::vnode::VirtualPoint;

/// Collects nodes and weights, then lays out the point table in one pass.
///
/// # Example
///
/// ```rust
/// use hashring::RingBuilder;
///
/// let ring = RingBuilder::new()
///     .node("a")
///     .weighted_node("b", 2)
///     .node("c")
///     .build();
///
/// assert_eq!(ring.node_count(), 3);
/// assert_eq!(ring.point_count(), 80 * 4);
/// ```
#[derive(Debug, Clone, Default)]
pub struct RingBuilder {
    weights: BTreeMap<NodeName, Weight>,
}

impl RingBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node with the default weight.
    ///
    /// A name that is already present keeps its existing entry; repeating a
    /// node never adds weight.
    pub fn node(mut self, name: impl Into<NodeName>) -> Self {
        self.weights.entry(name.into()).or_insert(DEFAULT_WEIGHT);
        self
    }

    /// Set a node's weight, replacing any earlier entry. Weight 0 drops the
    /// node; weights above [`MAX_WEIGHT`](crate::MAX_WEIGHT) are clamped.
    pub fn weighted_node(mut self, name: impl Into<NodeName>, weight: Weight) -> Self {
        let name = name.into();
        let weight = clamp_weight(weight);
        if weight == 0 {
            self.weights.remove(&name);
        } else {
            self.weights.insert(name, weight);
        }
        self
    }

    /// Lay out every node's virtual points and sort them.
    pub fn build(self) -> HashRing {
        let capacity = self
            .weights
            .values()
            .map(|&w| crate::token::points_for_weight(w))
            .fold(0usize, usize::saturating_add);

        let mut points = Vec::with_capacity(capacity);
        for (name, &weight) in &self.weights {
            points.extend(VirtualPoint::for_node(name, weight));
        }
        points.sort_unstable();

        debug!(
            nodes = self.weights.len(),
            points = points.len(),
            "built hash ring"
        );
        HashRing::from_parts(points, self.weights)
    }
}

impl HashRing {
    /// Ring over `nodes`, each with the default weight. Duplicates collapse.
    ///
    /// ```rust
    /// use hashring::HashRing;
    ///
    /// let ring = HashRing::new(["a", "b", "c"]);
    /// assert_eq!(ring.get_node("test"), Some("a"));
    /// ```
    pub fn new<I>(nodes: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<NodeName>,
    {
        nodes
            .into_iter()
            .fold(RingBuilder::new(), |builder, name| builder.node(name))
            .build()
    }

    /// Ring over a node → weight mapping. Nodes with weight 0 are left out.
    pub fn with_weights<I, N>(weights: I) -> Self
    where
        I: IntoIterator<Item = (N, Weight)>,
        N: Into<NodeName>,
    {
        weights
            .into_iter()
            .fold(RingBuilder::new(), |builder, (name, weight)| {
                builder.weighted_node(name, weight)
            })
            .build()
    }
}
