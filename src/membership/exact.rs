//! Exact, hash-based dictionary backend.

use std::fmt;

use ahash::AHashSet;

use crate::membership::{Backend, Canonicalizer, MembershipSet, string_canonicalizer};

/// A dictionary that stores the canonical form of every key it is given.
pub struct ExactSet<K: ?Sized> {
    /// Canonical forms of all inserted keys.
    entries: AHashSet<String>,
    /// Number of insertions, duplicates included.
    inserted: usize,
    canonicalize: Canonicalizer<K>,
}

impl ExactSet<str> {
    /// Create an empty set of strings.
    pub fn for_strings() -> Self {
        ExactSet::with_canonicalizer(string_canonicalizer())
    }
}

impl<K: ?Sized> ExactSet<K> {
    /// Create an empty set that stores `canonicalize(key)` for every key.
    pub fn with_canonicalizer(canonicalize: Canonicalizer<K>) -> Self {
        ExactSet {
            entries: AHashSet::new(),
            inserted: 0,
            canonicalize,
        }
    }

    /// Number of distinct canonical keys.
    pub fn distinct_len(&self) -> usize {
        self.entries.len()
    }
}

impl<K: ?Sized> MembershipSet<K> for ExactSet<K> {
    fn insert(&mut self, key: &K) {
        self.entries.insert((self.canonicalize)(key));
        self.inserted += 1;
    }

    fn contains(&self, key: &K) -> bool {
        self.entries.contains(&(self.canonicalize)(key))
    }

    fn len(&self) -> usize {
        self.inserted
    }

    fn backend(&self) -> Backend {
        Backend::Exact
    }
}

impl<K: ?Sized> fmt::Debug for ExactSet<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExactSet")
            .field("distinct", &self.entries.len())
            .field("inserted", &self.inserted)
            .finish()
    }
}
