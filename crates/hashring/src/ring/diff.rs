//! Comparing two ring generations.

use super::HashRing;

/// A key whose owner differs between two generations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyMove<'a> {
    pub key: &'a str,
    /// Owner in the old generation (`None` if it was empty).
    pub from: Option<&'a str>,
    /// Owner in the new generation (`None` if it is empty).
    pub to: Option<&'a str>,
}

impl HashRing {
    /// Keys from `keys` whose primary node changes going from `old` to `new`,
    /// in input order.
    ///
    /// ```rust
    /// use hashring::HashRing;
    ///
    /// let old = HashRing::new(["a", "b", "c"]);
    /// let new = old.remove_node("b");
    /// let moves = HashRing::diff(&old, &new, ["test", "test1"]);
    ///
    /// assert_eq!(moves.len(), 1);
    /// assert_eq!(moves[0].key, "test1");
    /// assert_eq!((moves[0].from, moves[0].to), (Some("b"), Some("c")));
    /// ```
    pub fn diff<'a, I>(old: &'a HashRing, new: &'a HashRing, keys: I) -> Vec<KeyMove<'a>>
    where
        I: IntoIterator<Item = &'a str>,
    {
        keys.into_iter()
            .filter_map(|key| {
                let from = old.get_node(key);
                let to = new.get_node(key);
                (from != to).then_some(KeyMove { key, from, to })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diff_identical_rings() {
        let ring = HashRing::new(["a", "b"]);
        assert!(HashRing::diff(&ring, &ring.clone(), ["x", "y", "z"]).is_empty());
    }

    #[test]
    fn test_diff_from_empty() {
        let old = HashRing::default();
        let new = old.add_node("a");
        let moves = HashRing::diff(&old, &new, ["k"]);
        assert_eq!(
            moves,
            vec![KeyMove {
                key: "k",
                from: None,
                to: Some("a")
            }]
        );
    }

    #[test]
    fn test_diff_add_only_moves_to_new_node() {
        let old = HashRing::new(["a", "b", "c"]);
        let new = old.add_node("d");
        let keys = ["test", "test1", "test2", "test3", "test4", "test5", "aaaa", "bbbb"];
        let moves = HashRing::diff(&old, &new, keys);

        let moved: Vec<&str> = moves.iter().map(|m| m.key).collect();
        assert_eq!(moved, vec!["test", "test2", "test3"]);
        assert!(moves.iter().all(|m| m.to == Some("d")));
    }
}
