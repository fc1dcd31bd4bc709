//! Recency Map Module
//!
//! An ordered key-value map where the iteration order is the eviction order.

use indexmap::IndexMap;

// == Recency Map ==
/// Key-value map ordered by how recently each key was touched.
///
/// Keys are kept in an `IndexMap` where:
/// - Front = Least recently touched (next eviction candidate)
/// - Back = Most recently touched
///
/// Values and order live in one structure, so a key can never be present in
/// one without the other.
#[derive(Debug)]
pub struct RecencyMap<V> {
    /// Entries in least-recent-first order
    entries: IndexMap<String, V>,
}

impl<V> RecencyMap<V> {
    // == Constructor ==
    /// Creates a new empty map.
    pub fn new() -> Self {
        Self {
            entries: IndexMap::new(),
        }
    }

    // == Insert ==
    /// Stores `value` under `key` at the most recent end.
    ///
    /// Any previous occurrence of the key is removed first, so the key ends up
    /// exactly once in the order. Returns the replaced value, if any.
    pub fn insert(&mut self, key: String, value: V) -> Option<V> {
        let previous = self.entries.shift_remove(&key);
        self.entries.insert(key, value);
        previous
    }

    // == Touch ==
    /// Moves `key` to the most recent end and returns its value.
    ///
    /// Returns None and changes nothing if the key is absent.
    pub fn touch(&mut self, key: &str) -> Option<&V> {
        let index = self.entries.get_index_of(key)?;
        let last = self.entries.len() - 1;
        self.entries.move_index(index, last);
        self.entries.get_index(last).map(|(_, value)| value)
    }

    // == Get ==
    /// Returns the value for `key` without changing its position.
    pub fn get(&self, key: &str) -> Option<&V> {
        self.entries.get(key)
    }

    // == Remove ==
    /// Removes `key`, preserving the order of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        self.entries.shift_remove(key)
    }

    // == Pop Oldest ==
    /// Removes and returns the least recently touched entry.
    ///
    /// Returns None if the map is empty.
    pub fn pop_oldest(&mut self) -> Option<(String, V)> {
        self.entries.shift_remove_index(0)
    }

    // == Clear ==
    /// Removes every entry and returns how many there were.
    pub fn clear(&mut self) -> usize {
        let count = self.entries.len();
        self.entries.clear();
        count
    }

    /// Keys in least-recent-first order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }
}

impl<V> Default for RecencyMap<V> {
    fn default() -> Self {
        Self::new()
    }
}
