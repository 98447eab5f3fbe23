use core::{
    fmt,
    hash::Hash,
    iter::FusedIterator,
};
use std::collections::HashMap;

/// Map that iterates in key insertion order
/// 
/// Values are stored contiguously in the order their key was first inserted, with a hash map from key to index next to them.
/// Replacing the value of an existing key keeps its original position.
#[derive(Clone)]
pub struct OrderedMap<K, V> {
    keys    : Vec<K>,
    values  : Vec<V>,
    /// Mapping from key to an index
    mapping : HashMap<K, usize>,
}

impl<K: Hash + Eq + Clone, V> OrderedMap<K, V> {
    /// Create a new empty map
    pub fn new() -> Self {
        Self { keys: Vec::new(), values: Vec::new(), mapping: HashMap::new() }
    }

    /// Create a new empty map with space for at least `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self { keys: Vec::with_capacity(capacity), values: Vec::with_capacity(capacity), mapping: HashMap::with_capacity(capacity) }
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if the map contains no entries
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Append an entry to the map
    /// 
    /// Returns `false` and leaves the map untouched when the key is already present
    pub fn push(&mut self, key: K, value: V) -> bool {
        match self.mapping.get(&key) {
            Some(_) => false,
            None => {
                self.push_unchecked(key, value);
                true
            }
        }
    }

    /// Insert an entry, returning the previous value if the key was already present
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.mapping.get(&key) {
            Some(idx) => Some(core::mem::replace(&mut self.values[*idx], value)),
            None => {
                self.push_unchecked(key, value);
                None
            }
        }
    }

    /// Get the value for `key`, inserting the result of `create` first when the key isn't present yet
    pub fn get_or_insert_with<F: FnOnce() -> V>(&mut self, key: K, create: F) -> &mut V {
        let idx = match self.mapping.get(&key) {
            Some(idx) => *idx,
            None => self.push_unchecked(key, create()),
        };
        &mut self.values[idx]
    }

    fn push_unchecked(&mut self, key: K, value: V) -> usize {
        let idx = self.values.len();
        self.keys.push(key.clone());
        self.values.push(value);
        self.mapping.insert(key, idx);
        idx
    }

    /// Get the insertion index of a key
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.mapping.get(key).copied()
    }

    /// Get the value for a key
    pub fn get(&self, key: &K) -> Option<&V> {
        self.mapping.get(key).map(|idx| &self.values[*idx])
    }

    /// Get a mutable reference to the value for a key
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        self.mapping.get(key).map(|idx| &mut self.values[*idx])
    }

    /// Get the entry at a given insertion index
    pub fn get_index(&self, idx: usize) -> Option<(&K, &V)> {
        Some((self.keys.get(idx)?, &self.values[idx]))
    }

    /// Check if the map contains a key
    pub fn contains_key(&self, key: &K) -> bool {
        self.mapping.contains_key(key)
    }

    /// Keys, in insertion order
    pub fn keys(&self) -> &[K] {
        &self.keys
    }

    /// Values, in insertion order
    pub fn values(&self) -> &[V] {
        &self.values
    }

    /// Iterate over all entries in insertion order
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter { keys: self.keys.iter(), values: self.values.iter() }
    }
}

impl<K: Hash + Eq + Clone, V> Default for OrderedMap<K, V> {
    fn default() -> Self {
        Self::new()
    }
}

/// Two maps are equal when they contain the same entries in the same order
impl<K: PartialEq, V: PartialEq> PartialEq for OrderedMap<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.keys == other.keys && self.values == other.values
    }
}

impl<K: Eq, V: Eq> Eq for OrderedMap<K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for OrderedMap<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.keys.iter().zip(self.values.iter())).finish()
    }
}

impl<K: Hash + Eq + Clone, V> FromIterator<(K, V)> for OrderedMap<K, V> {
    /// Later duplicates of a key replace the value, but keep the position of the first occurance
    fn from_iter<T: IntoIterator<Item = (K, V)>>(iter: T) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a, K: Hash + Eq + Clone, V> IntoIterator for &'a OrderedMap<K, V> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over the entries of an `OrderedMap`, in insertion order
pub struct Iter<'a, K, V> {
    keys   : core::slice::Iter<'a, K>,
    values : core::slice::Iter<'a, V>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        Some((self.keys.next()?, self.values.next()?))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.values.size_hint()
    }
}

impl<'a, K, V> DoubleEndedIterator for Iter<'a, K, V> {
    fn next_back(&mut self) -> Option<Self::Item> {
        Some((self.keys.next_back()?, self.values.next_back()?))
    }
}

impl<'a, K, V> ExactSizeIterator for Iter<'a, K, V> {}
impl<'a, K, V> FusedIterator for Iter<'a, K, V> {}
