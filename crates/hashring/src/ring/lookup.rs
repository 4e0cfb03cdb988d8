//! Key lookups.
//!
//! All lookups are pure functions of the ring and the key. An empty ring
//! answers `None` to everything.

use super::HashRing;
use crate::token::Token;

impl HashRing {
    /// Index of the point that owns `key`: the first point whose token is
    /// `>=` the key's token, wrapping to index 0 past the last point.
    ///
    /// # Performance
    /// O(log P), P = point count.
    pub fn get_node_pos(&self, key: &str) -> Option<usize> {
        if self.points.is_empty() {
            return None;
        }

        let token = Token::from_key(key);
        let idx = self.points.partition_point(|point| point.token < token);
        Some(if idx == self.points.len() { 0 } else { idx })
    }

    /// The node that owns `key`.
    pub fn get_node(&self, key: &str) -> Option<&str> {
        self.get_node_pos(key)
            .map(|idx| self.points[idx].node.as_str())
    }

    /// `count` distinct nodes for `key`, in ring order starting at the
    /// owner.
    ///
    /// Walks clockwise from [`get_node_pos`](Self::get_node_pos), wrapping at
    /// most once and skipping nodes already collected. Index 0 is always the
    /// node [`get_node`](Self::get_node) returns; the rest are fallback
    /// candidates by keyspace proximity.
    ///
    /// Returns `None` when the ring is empty or holds fewer than `count`
    /// distinct nodes.
    ///
    /// ```rust
    /// use hashring::HashRing;
    ///
    /// let ring = HashRing::with_weights([("a", 1), ("b", 2), ("c", 1)]);
    /// assert_eq!(ring.get_nodes("test", 2), Some(vec!["b", "a"]));
    /// assert_eq!(ring.get_nodes("test", 4), None);
    /// ```
    pub fn get_nodes(&self, key: &str, count: usize) -> Option<Vec<&str>> {
        let pos = self.get_node_pos(key)?;
        if count > self.weights.len() {
            return None;
        }

        let mut nodes: Vec<&str> = Vec::with_capacity(count);
        if count == 0 {
            return Some(nodes);
        }

        let (before, after) = self.points.split_at(pos);
        for point in after.iter().chain(before) {
            let node = point.node.as_str();
            if !nodes.contains(&node) {
                nodes.push(node);
                if nodes.len() == count {
                    break;
                }
            }
        }

        // Every weighted node owns at least one point, so a full scan always
        // finds `count <= node_count` distinct nodes.
        debug_assert_eq!(nodes.len(), count);
        Some(nodes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_ring() {
        let ring = HashRing::default();
        assert_eq!(ring.get_node("test"), None);
        assert_eq!(ring.get_node_pos("test"), None);
        assert_eq!(ring.get_nodes("test", 1), None);
        assert_eq!(ring.get_nodes("test", 0), None);
    }

    #[test]
    fn test_pos_points_at_first_token_not_below_key() {
        let ring = HashRing::new(["a", "b", "c"]);
        let token = Token::from_key("test");
        let pos = ring.get_node_pos("test").unwrap();

        assert!(ring.points()[pos].token >= token);
        if pos > 0 {
            assert!(ring.points()[pos - 1].token < token);
        }
        assert_eq!(pos, 198);
    }

    #[test]
    fn test_wraps_past_last_point() {
        // Token of "769" is above every point of this ring.
        let ring = HashRing::new(["a", "b", "c"]);
        assert!(Token::from_key("769") > ring.points().last().unwrap().token);
        assert_eq!(ring.get_node_pos("769"), Some(0));
        assert_eq!(ring.get_node("769"), Some("a"));

        let single = HashRing::new(["a"]);
        assert_eq!(single.get_node_pos("18"), Some(0));
        assert_eq!(single.get_node("18"), Some("a"));
    }

    #[test]
    fn test_get_nodes_starts_at_owner() {
        let ring = HashRing::new(["a", "b", "c", "d", "e"]);
        for key in ["alpha", "beta", "gamma", "delta"] {
            let nodes = ring.get_nodes(key, 3).unwrap();
            assert_eq!(Some(nodes[0]), ring.get_node(key));
        }
    }

    #[test]
    fn test_get_nodes_zero_count() {
        let ring = HashRing::new(["a"]);
        assert_eq!(ring.get_nodes("test", 0), Some(vec![]));
    }

    #[test]
    fn test_get_nodes_all() {
        let ring = HashRing::new(["a", "b", "c"]);
        assert_eq!(ring.get_nodes("test", 3), Some(vec!["a", "b", "c"]));
        assert_eq!(ring.get_nodes("test1", 3), Some(vec!["b", "c", "a"]));
        assert_eq!(ring.get_nodes("test", 4), None);
    }
}
