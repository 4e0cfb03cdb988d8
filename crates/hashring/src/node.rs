//! Node abstractions for the consistent hash ring.
//!
//! A node is an opaque caller-supplied name. The ring stores one handle per
//! virtual point, so names are shared `Arc<str>` values that clone without
//! allocating.

use std::borrow::Borrow;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use crate::error::Error;

/// Relative capacity of a node. Zero means "not on the ring".
pub type Weight = u32;

/// Weight used when a node is added without one.
pub const DEFAULT_WEIGHT: Weight = 1;

/// Largest weight a node can carry, 800 000 virtual points.
///
/// Ring constructors and mutators clamp larger weights to this value; the
/// `NAME=WEIGHT` parser rejects them.
pub const MAX_WEIGHT: Weight = 10_000;

#[inline]
pub(crate) fn clamp_weight(weight: Weight) -> Weight {
    weight.min(MAX_WEIGHT)
}

/// Identifier of a node on the ring.
///
/// Compared, ordered and hashed by its string content, so it can be looked up
/// in maps with a plain `&str`.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NodeName(Arc<str>);

impl NodeName {
    pub fn new(name: impl AsRef<str>) -> Self {
        Self(Arc::from(name.as_ref()))
    }

    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&*self.0, f)
    }
}

impl fmt::Display for NodeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for NodeName {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for NodeName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for NodeName {
    fn from(name: &str) -> Self {
        Self(Arc::from(name))
    }
}

impl From<String> for NodeName {
    fn from(name: String) -> Self {
        Self(Arc::from(name))
    }
}

impl From<&String> for NodeName {
    fn from(name: &String) -> Self {
        Self::from(name.as_str())
    }
}

impl From<&NodeName> for NodeName {
    fn from(name: &NodeName) -> Self {
        name.clone()
    }
}

/// A node name paired with its weight, parsed from `NAME` or `NAME=WEIGHT`.
///
/// ```
/// use hashring::WeightedNode;
///
/// let node: WeightedNode = "cache-1:11211=3".parse().unwrap();
/// assert_eq!(node.name.as_str(), "cache-1:11211");
/// assert_eq!(node.weight, 3);
/// ```
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WeightedNode {
    pub name: NodeName,
    pub weight: Weight,
}

impl WeightedNode {
    pub fn new(name: impl Into<NodeName>, weight: Weight) -> Self {
        Self {
            name: name.into(),
            weight,
        }
    }
}

impl FromStr for WeightedNode {
    type Err = Error;

    /// The weight is split off at the last `=`, so names may contain `=`
    /// only when a weight is given explicitly.
    fn from_str(spec: &str) -> Result<Self, Self::Err> {
        let (name, weight) = match spec.rsplit_once('=') {
            Some((name, weight)) => {
                let weight = weight
                    .trim()
                    .parse::<Weight>()
                    .map_err(|source| Error::InvalidWeight {
                        spec: spec.to_string(),
                        source,
                    })?;
                (name.trim(), weight)
            }
            None => (spec.trim(), DEFAULT_WEIGHT),
        };

        if name.is_empty() {
            return Err(Error::EmptyNodeName(spec.to_string()));
        }
        if weight > MAX_WEIGHT {
            return Err(Error::WeightTooLarge {
                spec: spec.to_string(),
                max: MAX_WEIGHT,
            });
        }
        Ok(Self::new(name, weight))
    }
}
