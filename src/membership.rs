//! Dictionary membership testing.
//!
//! A dictionary is anything implementing [`MembershipSet`]. Two backends are
//! provided: [`ExactSet`], a hash set that never lies, and [`BloomFilter`], a
//! compact probabilistic set that may report false positives but never false
//! negatives. Both hash keys through an explicit [`Canonicalizer`] instead of
//! relying on a key's `Display` or `Hash` implementation.

pub mod bloom;
pub mod exact;

pub use bloom::*;
pub use exact::*;

/// Turns a key into the string that is stored or hashed for it.
pub type Canonicalizer<K> = Box<dyn Fn(&K) -> String + Send + Sync>;

/// Identity canonicalization for string keys.
pub fn string_canonicalizer() -> Canonicalizer<str> {
    Box::new(|key: &str| key.to_string())
}

/// Which backend a [`MembershipSet`] uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    /// Exact hash set.
    Exact,
    /// Probabilistic Bloom filter.
    Bloom,
}

/// The membership-testing capability shared by every dictionary backend.
///
/// Once a key has been inserted, `contains` returns `true` for it for the
/// rest of the set's lifetime. There is no removal.
pub trait MembershipSet<K: ?Sized>: Send + Sync {
    /// Insert a key.
    fn insert(&mut self, key: &K);

    /// Check whether a key may have been inserted.
    fn contains(&self, key: &K) -> bool;

    /// Number of `insert` calls the set has absorbed.
    fn len(&self) -> usize;

    /// Whether nothing has been inserted yet.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The backend implementing this set.
    fn backend(&self) -> Backend;

    /// Probability that `contains` answers `true` for a key never inserted,
    /// given the current number of insertions. `None` for exact sets.
    fn false_positive_probability(&self) -> Option<f64> {
        None
    }
}
