//! Keyed, insertion-ordered storage for the records a world persists.

// keys are hashed with seahash, like the other keepers
use core::hash::BuildHasherDefault;
use indexmap::IndexMap;
use seahash::SeaHasher;
use std::borrow::Borrow;
use std::hash::Hash;

use crate::datatype::{Collection, Record};

pub type KeyHasher = BuildHasherDefault<SeaHasher>;

// ------------- PersistedSet -------------
/// Ordered keyed storage for persisted records.
///
/// Iteration follows insertion order. Replacing the value of an existing key
/// keeps its position, and removal keeps the order of the remaining entries.
#[derive(Debug, Clone)]
pub struct PersistedSet<K, R> {
    entries: IndexMap<K, R, KeyHasher>,
}

impl<K: Eq + Hash, R> PersistedSet<K, R> {
    pub fn new() -> Self {
        Self {
            entries: IndexMap::default(),
        }
    }
    /// Inserts or replaces, returning the replaced value if any.
    pub fn insert(&mut self, key: K, value: R) -> Option<R> {
        self.entries.insert(key, value)
    }
    pub fn get<Q>(&self, key: &Q) -> Option<&R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.get(key)
    }
    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.contains_key(key)
    }
    pub fn remove<Q>(&mut self, key: &Q) -> Option<R>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.entries.shift_remove(key)
    }
    /// The key `value` is stored under, if `value` is a record held by this set.
    ///
    /// Records are matched by address: an equal record living elsewhere is not
    /// a member.
    pub fn key_of_entry(&self, value: &R) -> Option<&K> {
        self.entries
            .iter()
            .find(|(_, stored)| std::ptr::eq(*stored, value))
            .map(|(key, _)| key)
    }
    pub fn iter(&self) -> impl Iterator<Item = (&K, &R)> {
        self.entries.iter()
    }
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.keys()
    }
    pub fn values(&self) -> impl Iterator<Item = &R> {
        self.entries.values()
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Eq + Hash, R> Default for PersistedSet<K, R> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash, R> FromIterator<(K, R)> for PersistedSet<K, R> {
    fn from_iter<I: IntoIterator<Item = (K, R)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

impl<K: 'static, R: Record> Collection for PersistedSet<K, R> {
    type Item = R;
}
