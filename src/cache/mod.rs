use dashmap::DashMap;
use std::hash::Hash;
use std::sync::Arc;

mod macros;

/// Process-wide, append-only memo table
///
/// Entries live until the process exits. Concurrent inserts for the same key
/// keep the first value written; later writers get that value back.
#[derive(Debug)]
pub struct MemoCache<K, V>
where
    K: Eq + Hash,
{
    entries: Arc<DashMap<K, V>>,
}

impl<K, V> Clone for MemoCache<K, V>
where
    K: Eq + Hash,
{
    fn clone(&self) -> Self {
        Self {
            entries: Arc::clone(&self.entries),
        }
    }
}

impl<K, V> Default for MemoCache<K, V>
where
    K: Eq + Hash,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash,
{
    pub fn new() -> Self {
        Self {
            entries: Arc::new(DashMap::new()),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K, V> MemoCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    /// Returns a copy of the cached value, if any
    pub fn get_from_cache(&self, key: &K) -> Option<V> {
        self.entries.get(key).map(|entry| entry.value().clone())
    }

    /// Stores `value` unless the key is already present, returning the stored value
    pub fn insert(&self, key: K, value: V) -> V {
        self.entries.entry(key).or_insert(value).value().clone()
    }
}
