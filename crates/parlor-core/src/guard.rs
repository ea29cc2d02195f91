//! Keyed one-shot latch.

use std::collections::HashSet;
use std::hash::Hash;

/// Keyed latch ensuring a side effect fires at most once per distinct key.
///
/// The guard is keyed rather than a single boolean: a new key (say, a fresh
/// call URL issued after the previous one expired) restores eligibility
/// without affecting keys that already fired.
#[derive(Debug, Default)]
pub struct OneShotGuard<K> {
    fired: HashSet<K>,
}

impl<K: Eq + Hash> OneShotGuard<K> {
    /// Create a guard with no fired keys.
    pub fn new() -> Self {
        Self { fired: HashSet::new() }
    }

    /// Claim the side effect for `key`.
    ///
    /// Returns `true` exactly once per distinct key over the guard's
    /// lifetime; every later call with the same key returns `false`.
    pub fn attempt(&mut self, key: K) -> bool {
        self.fired.insert(key)
    }

    /// Whether `key` has already fired.
    pub fn has_fired(&self, key: &K) -> bool {
        self.fired.contains(key)
    }
}
