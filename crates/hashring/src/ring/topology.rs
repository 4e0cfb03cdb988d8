//! Keyspace ownership of a ring.
//!
//! Each distinct point token owns the arc from the previous distinct token
//! (exclusive) to itself (inclusive). When several points share a token the
//! first one in ring order owns the arc, matching what lookups do.

use std::collections::BTreeMap;

use super::HashRing;
use crate::token::Token;
use crate::vnode::VirtualPoint;

/// Size of the circular token space.
pub const TOKEN_SPACE: u64 = 1 << 32;

/// The arc `(start, end]` of the ring. `start == end` is the whole circle.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TokenRange {
    pub start: Token,
    pub end: Token,
}

impl TokenRange {
    pub fn new(start: Token, end: Token) -> Self {
        Self { start, end }
    }

    /// True when the range passes through zero.
    pub fn wraps(&self) -> bool {
        self.start >= self.end
    }

    /// Number of tokens in the range.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> u64 {
        if self.start == self.end {
            TOKEN_SPACE
        } else {
            u64::from(self.start.distance_to(&self.end))
        }
    }

    pub fn contains(&self, token: Token) -> bool {
        if self.start == self.end {
            true
        } else if self.start < self.end {
            self.start < token && token <= self.end
        } else {
            token > self.start || token <= self.end
        }
    }
}

impl std::fmt::Display for TokenRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}]", self.start, self.end)
    }
}

impl HashRing {
    /// Points that actually own an arc: the first point of every run of
    /// equal tokens.
    fn owning_points(&self) -> Vec<&VirtualPoint> {
        let mut owners: Vec<&VirtualPoint> = Vec::with_capacity(self.points.len());
        for point in self.points.iter() {
            if owners.last().map_or(true, |last| last.token != point.token) {
                owners.push(point);
            }
        }
        owners
    }

    /// Arcs paired with the node owning each, in ring order.
    fn arcs(&self) -> Vec<(&str, TokenRange)> {
        let owners = self.owning_points();
        let Some(last) = owners.last() else {
            return Vec::new();
        };

        let mut prev = last.token;
        owners
            .iter()
            .map(|point| {
                let range = TokenRange::new(prev, point.token);
                prev = point.token;
                (point.node(), range)
            })
            .collect()
    }

    /// Token ranges whose keys route to `name`, in ring order.
    ///
    /// The first range may wrap through zero.
    pub fn ranges(&self, name: &str) -> Vec<TokenRange> {
        self.arcs()
            .into_iter()
            .filter(|(node, _)| *node == name)
            .map(|(_, range)| range)
            .collect()
    }

    /// Fraction of the token space owned by each node.
    ///
    /// Sums to 1.0 for a non-empty ring; empty for an empty ring.
    pub fn ownership(&self) -> BTreeMap<&str, f64> {
        let mut owned: BTreeMap<&str, u64> = self.nodes().map(|(name, _)| (name, 0)).collect();
        for (node, range) in self.arcs() {
            *owned.entry(node).or_default() += range.len();
        }
        owned
            .into_iter()
            .map(|(node, tokens)| (node, tokens as f64 / TOKEN_SPACE as f64))
            .collect()
    }
}
