//! Replica placement results.

use std::fmt;

/// Nodes holding a key: the primary owner, then fallbacks in ring order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplicaPlacement {
    pub primary: String,
    pub replicas: Vec<String>,
}

impl ReplicaPlacement {
    /// Build a placement from a candidate list, primary first.
    ///
    /// Returns `None` for an empty list.
    pub fn from_candidates<I, S>(candidates: I) -> Option<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut candidates = candidates.into_iter().map(Into::into);
        let primary = candidates.next()?;
        Some(Self {
            primary,
            replicas: candidates.collect(),
        })
    }

    /// Every node, primary first.
    pub fn all(&self) -> impl Iterator<Item = &str> + '_ {
        std::iter::once(self.primary.as_str()).chain(self.replicas.iter().map(String::as_str))
    }

    /// Number of nodes, primary included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        1 + self.replicas.len()
    }

    pub fn contains(&self, node: &str) -> bool {
        self.all().any(|n| n == node)
    }
}

impl fmt::Display for ReplicaPlacement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.primary)?;
        for replica in &self.replicas {
            write!(f, ", {replica}")?;
        }
        Ok(())
    }
}
