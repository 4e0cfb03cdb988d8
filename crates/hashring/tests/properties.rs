//! Property-based tests for ring generations (using proptest).

use std::collections::BTreeMap;

use hashring::{HashRing, Weight};
use proptest::prelude::*;

fn weight_map() -> impl Strategy<Value = BTreeMap<String, Weight>> {
    prop::collection::btree_map("[a-z]{1,6}", 1u32..4, 0..6)
}

fn keys() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec("[ -~]{0,12}", 1..64)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    /// Adding a node only moves keys onto that node.
    #[test]
    fn add_moves_keys_only_to_new_node(
        weights in weight_map(),
        name in "[A-Z]{1,4}",
        weight in 1u32..4,
        keys in keys(),
    ) {
        let before = HashRing::with_weights(weights);
        let after = before.add_weighted_node(name.as_str(), weight);

        for key in &keys {
            let (old, new) = (before.get_node(key), after.get_node(key));
            if old != new {
                prop_assert_eq!(new, Some(name.as_str()));
            }
        }
    }

    /// Removing a node only moves the keys it owned.
    #[test]
    fn remove_moves_only_owned_keys(weights in weight_map(), keys in keys(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!weights.is_empty());
        let victim = pick.get(&weights.keys().collect::<Vec<_>>()).to_string();

        let before = HashRing::with_weights(weights);
        let after = before.remove_node(&victim);

        for key in &keys {
            let (old, new) = (before.get_node(key), after.get_node(key));
            if old != new {
                prop_assert_eq!(old, Some(victim.as_str()));
            }
        }
    }

    /// Reweighting only moves keys to or from the reweighted node.
    #[test]
    fn update_moves_only_affected_keys(
        weights in weight_map(),
        keys in keys(),
        pick in any::<prop::sample::Index>(),
        weight in 1u32..6,
    ) {
        prop_assume!(!weights.is_empty());
        let target = pick.get(&weights.keys().collect::<Vec<_>>()).to_string();

        let before = HashRing::with_weights(weights);
        let after = before.update_weighted_node(&target, weight);

        for key in &keys {
            let (old, new) = (before.get_node(key), after.get_node(key));
            if old != new {
                prop_assert!(old == Some(target.as_str()) || new == Some(target.as_str()));
            }
        }
    }

    /// Mutated generations equal rings built from scratch.
    #[test]
    fn mutations_match_fresh_build(weights in weight_map(), name in "[a-z]{1,6}", weight in 1u32..4) {
        let ring = HashRing::with_weights(weights.clone());

        let mut expected = weights.clone();
        expected.entry(name.clone()).or_insert(weight);
        prop_assert_eq!(ring.add_weighted_node(name.as_str(), weight), HashRing::with_weights(expected));

        let mut expected = weights.clone();
        expected.remove(&name);
        prop_assert_eq!(ring.remove_node(&name), HashRing::with_weights(expected));

        let mut expected = weights.clone();
        if let Some(w) = expected.get_mut(&name) {
            *w = weight;
        }
        prop_assert_eq!(ring.update_weighted_node(&name, weight), HashRing::with_weights(expected));
    }

    /// Adding twice is the same as adding once.
    #[test]
    fn add_is_idempotent(weights in weight_map(), name in "[a-z]{1,6}") {
        let ring = HashRing::with_weights(weights);
        let once = ring.add_node(name.as_str());
        prop_assert_eq!(once.add_node(name.as_str()), once);
    }

    /// N-way lookups return distinct nodes, led by the primary.
    #[test]
    fn get_nodes_distinct(weights in weight_map(), keys in keys(), count in 0usize..8) {
        let ring = HashRing::with_weights(weights);

        for key in &keys {
            match ring.get_nodes(key, count) {
                Some(nodes) => {
                    prop_assert!(!ring.is_empty());
                    prop_assert_eq!(nodes.len(), count);
                    let mut unique = nodes.clone();
                    unique.sort_unstable();
                    unique.dedup();
                    prop_assert_eq!(unique.len(), count);
                    if let Some(first) = nodes.first() {
                        prop_assert_eq!(Some(*first), ring.get_node(key));
                    }
                }
                None => {
                    prop_assert!(ring.is_empty() || count > ring.node_count());
                }
            }
        }
    }

    /// The chosen position is the first point at or after the key's token.
    #[test]
    fn position_is_successor(weights in weight_map(), keys in keys()) {
        let ring = HashRing::with_weights(weights);
        for key in &keys {
            let Some(pos) = ring.get_node_pos(key) else {
                prop_assert!(ring.is_empty());
                continue;
            };
            let token = hashring::Token::from_key(key);
            let points = ring.points();
            if points[pos].token() >= token {
                prop_assert!(pos == 0 || points[pos - 1].token() < token);
            } else {
                prop_assert_eq!(pos, 0);
                prop_assert!(points.iter().all(|p| p.token() < token));
            }
        }
    }
}
