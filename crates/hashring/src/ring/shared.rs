//! Publishing ring generations to concurrent readers.
//!
//! Rings are immutable, so readers never need a lock while routing keys. The
//! only shared mutable state is "which generation is current", kept here
//! behind a `parking_lot::RwLock`. Its write side is held just long enough to
//! replace a `HashRing` (two `Arc` bumps); computing the replacement only
//! holds the upgradable read side, which excludes other writers but not
//! readers.

use parking_lot::{RwLock, RwLockUpgradableReadGuard};
use tracing::debug;

use super::HashRing;

#[derive(Debug, Default)]
struct Published {
    ring: HashRing,
    generation: u64,
}

/// The current ring generation, shared between readers and a writer.
///
/// Readers call [`load`](Self::load) and route against the returned snapshot
/// for as long as they like; a concurrent [`update`](Self::update) does not
/// affect snapshots already taken.
///
/// ```rust
/// use hashring::{HashRing, SharedRing};
///
/// let shared = SharedRing::new(HashRing::new(["a", "b", "c"]));
/// let snapshot = shared.load();
///
/// shared.update(|ring| ring.remove_node("b"));
///
/// assert_eq!(snapshot.get_node("test1"), Some("b"));
/// assert_eq!(shared.load().get_node("test1"), Some("c"));
/// assert_eq!(shared.generation(), 1);
/// ```
#[derive(Debug, Default)]
pub struct SharedRing {
    current: RwLock<Published>,
}

impl SharedRing {
    pub fn new(ring: HashRing) -> Self {
        Self {
            current: RwLock::new(Published { ring, generation: 0 }),
        }
    }

    /// Snapshot of the current generation.
    pub fn load(&self) -> HashRing {
        self.current.read().ring.clone()
    }

    /// Number of generations published since construction.
    pub fn generation(&self) -> u64 {
        self.current.read().generation
    }

    /// Replace the current generation. Returns the new generation number.
    pub fn store(&self, ring: HashRing) -> u64 {
        let mut current = self.current.write();
        current.ring = ring;
        current.generation += 1;
        debug!(
            generation = current.generation,
            nodes = current.ring.node_count(),
            "published ring generation"
        );
        current.generation
    }

    /// Derive the next generation from the current one and publish it.
    ///
    /// Writers are serialized, so concurrent updates never lose each other's
    /// changes. `f` runs under an upgradable read lock: readers keep loading
    /// the current generation while it computes, and the write lock is only
    /// taken to swap in the result. When `f` returns a ring equal to the
    /// current one (a mutator no-op), nothing is published and the generation
    /// number stays put.
    pub fn update<F>(&self, f: F) -> HashRing
    where
        F: FnOnce(&HashRing) -> HashRing,
    {
        let current = self.current.upgradable_read();
        let next = f(&current.ring);
        if next != current.ring {
            let mut current = RwLockUpgradableReadGuard::upgrade(current);
            current.ring = next.clone();
            current.generation += 1;
            debug!(
                generation = current.generation,
                nodes = current.ring.node_count(),
                "published ring generation"
            );
        }
        next
    }
}

impl From<HashRing> for SharedRing {
    fn from(ring: HashRing) -> Self {
        Self::new(ring)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_update_keeps_generation() {
        let shared = SharedRing::new(HashRing::new(["a"]));
        shared.update(|ring| ring.add_node("a"));
        shared.update(|ring| ring.update_weighted_node("a", 0));
        assert_eq!(shared.generation(), 0);

        shared.update(|ring| ring.add_node("b"));
        assert_eq!(shared.generation(), 1);
        assert_eq!(shared.load().node_count(), 2);
    }

    #[test]
    fn test_store_replaces() {
        let shared = SharedRing::default();
        assert!(shared.load().is_empty());

        assert_eq!(shared.store(HashRing::new(["x"])), 1);
        assert_eq!(shared.load().get_node("anything"), Some("x"));
    }

    #[test]
    fn test_concurrent_readers_see_whole_generations() {
        let shared = SharedRing::new(HashRing::new(["a", "b", "c"]));
        let abc = HashRing::new(["a", "b", "c"]);
        let abcd = HashRing::new(["a", "b", "c", "d"]);

        crossbeam::thread::scope(|s| {
            for _ in 0..4 {
                s.spawn(|_| {
                    for i in 0..2_000 {
                        let snapshot = shared.load();
                        assert!(snapshot == abc || snapshot == abcd);

                        let key = i.to_string();
                        let node = snapshot.get_node(&key);
                        assert_eq!(node, snapshot.get_node(&key));
                    }
                });
            }

            s.spawn(|_| {
                for _ in 0..50 {
                    shared.update(|ring| ring.add_node("d"));
                    shared.update(|ring| ring.remove_node("d"));
                }
            });
        })
        .unwrap();

        assert_eq!(shared.generation(), 100);
        assert_eq!(shared.load(), abc);
    }

    #[test]
    fn test_readers_not_blocked_while_update_computes() {
        use std::sync::mpsc;
        use std::time::{Duration, Instant};

        let shared = SharedRing::new(HashRing::new(["a", "b", "c"]));
        let (started, wait_started) = mpsc::channel();

        let writer = &shared;
        crossbeam::thread::scope(|s| {
            s.spawn(move |_| {
                writer.update(|ring| {
                    started.send(()).unwrap();
                    std::thread::sleep(Duration::from_millis(500));
                    ring.add_node("d")
                });
            });

            wait_started.recv().unwrap();
            let begin = Instant::now();
            let snapshot = shared.load();
            let generation = shared.generation();
            let waited = begin.elapsed();

            assert_eq!(snapshot.node_count(), 3);
            assert_eq!(generation, 0);
            assert!(waited < Duration::from_millis(250), "load waited {waited:?}");
        })
        .unwrap();

        assert_eq!(shared.generation(), 1);
        assert_eq!(shared.load().node_count(), 4);
    }
}
