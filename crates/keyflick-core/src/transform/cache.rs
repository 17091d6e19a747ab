// Keyflick Resolution Cache
// Memoized modifier resolution, keyed by base key name then modifier set

use std::collections::HashMap;

use crate::{KeyValue, ModifierSet};

/// Memoized resolutions
///
/// Removed results are stored as the removed sentinel, so a cached
/// "gone" answer is distinct from a miss. Entries are never invalidated:
/// the transform tables are static.
#[derive(Debug, Clone)]
pub struct ResolutionCache {
    cache: HashMap<String, HashMap<ModifierSet, KeyValue>>,
}

impl ResolutionCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            cache: HashMap::new(),
        }
    }

    /// Look up a resolution
    pub fn lookup(&self, name: &str, mods: &ModifierSet) -> Option<&KeyValue> {
        self.cache.get(name)?.get(mods)
    }

    /// Record a resolution
    pub fn insert(&mut self, name: &str, mods: ModifierSet, value: KeyValue) {
        self.cache
            .entry(name.to_string())
            .or_default()
            .insert(mods, value);
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Number of cached (name, modifier set) pairs
    pub fn len(&self) -> usize {
        self.cache.values().map(HashMap::len).sum()
    }
}

impl Default for ResolutionCache {
    fn default() -> Self {
        Self::new()
    }
}
