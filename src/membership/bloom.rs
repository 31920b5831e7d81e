//! Bloom filter dictionary backend.
//!
//! The filter owns an `m`-bit array and applies `k` hash rounds per key. Round
//! `x` hashes the canonical key with the decimal form of `x` appended, takes the
//! first four digest bytes as a big-endian `u32` and sets bit `v mod m`. Bits are
//! only ever set, so the filter has no false negatives.
//!
//! Parameters can be chosen three ways:
//!
//! - explicitly, as bits per element `c`, expected elements `n` and rounds `k`;
//! - from a target false positive probability `p`: `k = ceil(-log2 p)`, `c = k / ln 2`;
//! - from a total bit budget `m`: `c = m / n`, `k = round(c ln 2)`.
//!
//! In every case `m = ceil(c n)`.
//!
//! # Example
//!
//! ```
//! use bloomspell::membership::{BloomFilter, BloomParameters, MembershipSet};
//!
//! let params = BloomParameters::from_false_positive_probability(0.1, 1000).unwrap();
//! assert_eq!(params.hash_rounds(), 4);
//! assert_eq!(params.num_bits(), 5771);
//!
//! let mut filter = BloomFilter::for_strings(params, Default::default());
//! filter.insert("book");
//! assert!(filter.contains("book"));
//! ```

use std::f64::consts::LN_2;
use std::fmt;
use std::fmt::Write;

use bit_vec::BitVec;
use serde::{Deserialize, Serialize};

use crate::digest::Digester;
use crate::error::{BloomspellError, Result};
use crate::membership::{Backend, Canonicalizer, MembershipSet, string_canonicalizer};

/// Sizing of a Bloom filter, fixed at construction.
///
/// Only the validating constructors produce values of this type, so
/// `n > 0`, `c > 0`, `k > 0` and `m = ceil(c n) > 0` always hold. Deserialized
/// values go through the same checks.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawBloomParameters")]
pub struct BloomParameters {
    bits_per_element: f64,
    expected_elements: usize,
    hash_rounds: u32,
    num_bits: usize,
}

/// Unchecked wire form of [`BloomParameters`].
#[derive(Deserialize)]
struct RawBloomParameters {
    bits_per_element: f64,
    expected_elements: usize,
    hash_rounds: u32,
    num_bits: usize,
}

impl TryFrom<RawBloomParameters> for BloomParameters {
    type Error = BloomspellError;

    fn try_from(raw: RawBloomParameters) -> Result<Self> {
        let params =
            BloomParameters::explicit(raw.bits_per_element, raw.expected_elements, raw.hash_rounds)?;
        if params.num_bits != raw.num_bits {
            return Err(BloomspellError::invalid_parameter(format!(
                "bit set size {} does not match ceil(c n) = {}",
                raw.num_bits, params.num_bits
            )));
        }
        Ok(params)
    }
}

impl BloomParameters {
    /// Parameters from explicit bits per element, expected elements and hash rounds.
    pub fn explicit(
        bits_per_element: f64,
        expected_elements: usize,
        hash_rounds: u32,
    ) -> Result<Self> {
        if expected_elements == 0 {
            return Err(BloomspellError::invalid_parameter(
                "expected elements must be greater than zero",
            ));
        }
        if !bits_per_element.is_finite() || bits_per_element <= 0.0 {
            return Err(BloomspellError::invalid_parameter(format!(
                "bits per element must be a positive finite number, got {bits_per_element}"
            )));
        }
        if hash_rounds == 0 {
            return Err(BloomspellError::invalid_parameter(
                "hash rounds must be greater than zero",
            ));
        }

        let num_bits = (bits_per_element * expected_elements as f64).ceil();
        if num_bits >= usize::MAX as f64 {
            return Err(BloomspellError::invalid_parameter(format!(
                "a filter of {num_bits} bits cannot be allocated"
            )));
        }

        Ok(BloomParameters {
            bits_per_element,
            expected_elements,
            hash_rounds,
            num_bits: num_bits as usize,
        })
    }

    /// Parameters meeting a target false positive probability for `expected_elements`.
    pub fn from_false_positive_probability(
        false_positive_probability: f64,
        expected_elements: usize,
    ) -> Result<Self> {
        let p = false_positive_probability;
        if !(p > 0.0 && p < 1.0) {
            return Err(BloomspellError::invalid_parameter(format!(
                "false positive probability must lie strictly between 0 and 1, got {p}"
            )));
        }

        let hash_rounds = (-p.log2()).ceil();
        if hash_rounds > u32::MAX as f64 {
            return Err(BloomspellError::invalid_parameter(format!(
                "false positive probability {p} needs too many hash rounds"
            )));
        }
        let hash_rounds = (hash_rounds as u32).max(1);

        BloomParameters::explicit(hash_rounds as f64 / LN_2, expected_elements, hash_rounds)
    }

    /// Parameters for a fixed bit budget, using the optimal round count for it.
    pub fn from_bit_set_size(num_bits: usize, expected_elements: usize) -> Result<Self> {
        if num_bits == 0 {
            return Err(BloomspellError::invalid_parameter(
                "bit set size must be greater than zero",
            ));
        }
        if expected_elements == 0 {
            return Err(BloomspellError::invalid_parameter(
                "expected elements must be greater than zero",
            ));
        }

        let bits_per_element = num_bits as f64 / expected_elements as f64;
        let hash_rounds = ((bits_per_element * LN_2).round() as u32).max(1);
        BloomParameters::explicit(bits_per_element, expected_elements, hash_rounds)
    }

    /// Bits allocated per expected element (`c`).
    pub fn bits_per_element(&self) -> f64 {
        self.bits_per_element
    }

    /// Number of elements the filter is sized for (`n`).
    pub fn expected_elements(&self) -> usize {
        self.expected_elements
    }

    /// Hash rounds per element (`k`).
    pub fn hash_rounds(&self) -> u32 {
        self.hash_rounds
    }

    /// Total size of the bit array (`m = ceil(c n)`).
    pub fn num_bits(&self) -> usize {
        self.num_bits
    }

    /// `(1 - e^(-k count / m))^k`: the false positive probability after `count` insertions.
    pub fn false_positive_probability(&self, count: f64) -> f64 {
        let k = self.hash_rounds as f64;
        (1.0 - (-k * count / self.num_bits as f64).exp()).powf(k)
    }

    /// The false positive probability once `expected_elements` have been inserted.
    pub fn expected_false_positive_probability(&self) -> f64 {
        self.false_positive_probability(self.expected_elements as f64)
    }
}

/// A Bloom filter over keys of type `K`.
pub struct BloomFilter<K: ?Sized> {
    bits: BitVec,
    params: BloomParameters,
    /// Number of insertions; never decremented.
    inserted: usize,
    digester: Digester,
    canonicalize: Canonicalizer<K>,
}

impl BloomFilter<str> {
    /// Create an empty filter over strings.
    pub fn for_strings(params: BloomParameters, digester: Digester) -> Self {
        BloomFilter::with_canonicalizer(params, digester, string_canonicalizer())
    }
}

impl<K: ?Sized> BloomFilter<K> {
    /// Create an empty filter hashing `canonicalize(key)` for every key.
    pub fn with_canonicalizer(
        params: BloomParameters,
        digester: Digester,
        canonicalize: Canonicalizer<K>,
    ) -> Self {
        BloomFilter {
            bits: BitVec::from_elem(params.num_bits, false),
            params,
            inserted: 0,
            digester,
            canonicalize,
        }
    }

    /// The filter's sizing.
    pub fn parameters(&self) -> &BloomParameters {
        &self.params
    }

    /// Size of the bit array (`m`).
    pub fn num_bits(&self) -> usize {
        self.params.num_bits
    }

    /// Hash rounds per key (`k`).
    pub fn hash_rounds(&self) -> u32 {
        self.params.hash_rounds
    }

    /// Bits allocated per expected element (`c`).
    pub fn bits_per_element(&self) -> f64 {
        self.params.bits_per_element
    }

    /// Number of elements the filter was sized for (`n`).
    pub fn expected_elements(&self) -> usize {
        self.params.expected_elements
    }

    /// The digest provider backing the hash family.
    pub fn digester(&self) -> Digester {
        self.digester
    }

    /// Read a single bit.
    pub fn bit(&self, index: usize) -> bool {
        self.bits.get(index).unwrap_or(false)
    }

    /// Number of bits currently set.
    pub fn count_ones(&self) -> usize {
        self.bits.iter().filter(|bit| *bit).count()
    }

    /// The `k` bit positions a key maps to, in round order.
    pub fn bit_indices(&self, key: &K) -> Vec<usize> {
        let canonical = (self.canonicalize)(key);
        let mut input = String::with_capacity(canonical.len() + 4);
        (0..self.params.hash_rounds)
            .map(|round| {
                input.clear();
                input.push_str(&canonical);
                // Writing into a String cannot fail.
                let _ = write!(input, "{round}");
                let value = self.digester.prefix_u32(input.as_bytes()) as u64;
                (value % self.params.num_bits as u64) as usize
            })
            .collect()
    }

    /// False positive probability after `count` insertions.
    pub fn false_positive_probability_for(&self, count: f64) -> f64 {
        self.params.false_positive_probability(count)
    }

    /// False positive probability at the expected element count.
    pub fn expected_false_positive_probability(&self) -> f64 {
        self.params.expected_false_positive_probability()
    }
}

impl<K: ?Sized> MembershipSet<K> for BloomFilter<K> {
    fn insert(&mut self, key: &K) {
        for index in self.bit_indices(key) {
            self.bits.set(index, true);
        }
        self.inserted += 1;
    }

    fn contains(&self, key: &K) -> bool {
        self.bit_indices(key).into_iter().all(|index| self.bit(index))
    }

    fn len(&self) -> usize {
        self.inserted
    }

    fn backend(&self) -> Backend {
        Backend::Bloom
    }

    fn false_positive_probability(&self) -> Option<f64> {
        Some(self.false_positive_probability_for(self.inserted as f64))
    }
}

impl<K: ?Sized> fmt::Debug for BloomFilter<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BloomFilter")
            .field("params", &self.params)
            .field("inserted", &self.inserted)
            .field("digest", &self.digester.algorithm())
            .finish()
    }
}
