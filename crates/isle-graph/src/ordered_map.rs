//! Insertion-ordered module map.

use indexmap::IndexMap;
use rustc_hash::FxHasher;
use std::hash::BuildHasherDefault;

use crate::ModuleName;

type FxIndexMap<K, V> = IndexMap<K, V, BuildHasherDefault<FxHasher>>;

/// Map from module name to `V` that remembers insertion order.
///
/// Iteration yields entries in the order they were first inserted. A second
/// insert for a name that is already present is ignored, which is exactly the
/// deduplication rule for bundle entries.
#[derive(Debug, Clone)]
pub struct ModuleMap<V> {
    entries: FxIndexMap<ModuleName, V>,
}

impl<V> Default for ModuleMap<V> {
    fn default() -> Self {
        Self {
            entries: FxIndexMap::default(),
        }
    }
}

impl<V> ModuleMap<V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert `value` unless `name` is already present.
    ///
    /// Returns `true` when the entry was added.
    pub fn insert_if_absent(&mut self, name: ModuleName, value: V) -> bool {
        match self.entries.entry(name) {
            indexmap::map::Entry::Occupied(_) => false,
            indexmap::map::Entry::Vacant(slot) => {
                slot.insert(value);
                true
            }
        }
    }

    pub fn get(&self, name: &ModuleName) -> Option<&V> {
        self.entries.get(name)
    }

    /// Position of `name` in insertion order.
    pub fn index_of(&self, name: &ModuleName) -> Option<usize> {
        self.entries.get_index_of(name)
    }

    pub fn contains(&self, name: &ModuleName) -> bool {
        self.entries.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ModuleName, &V)> {
        self.entries.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &ModuleName> {
        self.entries.keys()
    }
}

impl<V> IntoIterator for ModuleMap<V> {
    type Item = (ModuleName, V);
    type IntoIter = indexmap::map::IntoIter<ModuleName, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}
