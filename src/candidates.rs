//! Edit candidate generation.
//!
//! A word of length `L` over an alphabet of `A` letters has
//! `L` deletions, `L - 1` adjacent transpositions, `A L` substitutions and
//! `A (L + 1)` insertions, i.e. `53 L + 25` candidates for the 26-letter
//! English alphabet. Candidates are produced in that order and never
//! deduplicated; substituting a letter with itself yields the word unchanged.
//!
//! Distance-2 candidates come from applying the generator again to every
//! distance-1 candidate. That closure is quadratic in the distance-1 count, so
//! [`EditGenerator::edits2`] yields it lazily instead of collecting it.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{BloomspellError, Result};

/// The lowercase English alphabet.
pub const ENGLISH_ALPHABET: &str = "abcdefghijklmnopqrstuvwxyz";

/// Edit distance of a candidate from the word it was generated from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditRound {
    /// One primitive edit away.
    One,
    /// Two primitive edits away.
    Two,
}

impl EditRound {
    /// The number of edits this round represents.
    pub fn distance(&self) -> usize {
        match self {
            EditRound::One => 1,
            EditRound::Two => 2,
        }
    }
}

impl fmt::Display for EditRound {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "distance {}", self.distance())
    }
}

/// A generated word together with its corpus frequency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Candidate {
    /// The candidate word.
    pub word: String,
    /// How often the word occurs in the corpus.
    pub frequency: u32,
    /// How far the candidate is from the original word.
    pub round: EditRound,
}

impl Candidate {
    /// Create a new candidate.
    pub fn new(word: String, frequency: u32, round: EditRound) -> Self {
        Candidate {
            word,
            frequency,
            round,
        }
    }
}

/// Generates every string one primitive edit away from a word.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditGenerator {
    alphabet: Vec<char>,
}

impl EditGenerator {
    /// Create a generator over the lowercase English alphabet.
    pub fn new() -> Self {
        EditGenerator {
            alphabet: ENGLISH_ALPHABET.chars().collect(),
        }
    }

    /// Create a generator over a custom alphabet.
    pub fn with_alphabet(alphabet: &str) -> Result<Self> {
        if alphabet.is_empty() {
            return Err(BloomspellError::invalid_parameter(
                "edit alphabet must contain at least one letter",
            ));
        }
        Ok(EditGenerator {
            alphabet: alphabet.chars().collect(),
        })
    }

    /// The letters used for substitutions and insertions.
    pub fn alphabet(&self) -> &[char] {
        &self.alphabet
    }

    /// Number of candidates [`EditGenerator::edits`] yields for a word of `len` chars.
    pub fn candidate_count(&self, len: usize) -> usize {
        let letters = self.alphabet.len();
        len + len.saturating_sub(1) + letters * len + letters * (len + 1)
    }

    /// All distance-1 candidates of `word`, in generation order.
    pub fn edits(&self, word: &str) -> Vec<String> {
        let chars: Vec<char> = word.chars().collect();
        let mut edits = Vec::with_capacity(self.candidate_count(chars.len()));

        self.deletions(&chars, &mut edits);
        self.transpositions(&chars, &mut edits);
        self.substitutions(&chars, &mut edits);
        self.insertions(&chars, &mut edits);

        edits
    }

    /// All distance-2 candidates reachable through `first_round`, the
    /// distance-1 candidates of some word.
    pub fn edits2<'a>(&'a self, first_round: &'a [String]) -> impl Iterator<Item = String> + 'a {
        first_round.iter().flat_map(move |word| self.edits(word))
    }

    fn deletions(&self, chars: &[char], edits: &mut Vec<String>) {
        for i in 0..chars.len() {
            edits.push(chars[..i].iter().chain(&chars[i + 1..]).collect());
        }
    }

    fn transpositions(&self, chars: &[char], edits: &mut Vec<String>) {
        for i in 0..chars.len().saturating_sub(1) {
            let mut swapped = chars.to_vec();
            swapped.swap(i, i + 1);
            edits.push(swapped.into_iter().collect());
        }
    }

    fn substitutions(&self, chars: &[char], edits: &mut Vec<String>) {
        for i in 0..chars.len() {
            for &letter in &self.alphabet {
                let mut replaced = chars.to_vec();
                replaced[i] = letter;
                edits.push(replaced.into_iter().collect());
            }
        }
    }

    fn insertions(&self, chars: &[char], edits: &mut Vec<String>) {
        for i in 0..=chars.len() {
            for &letter in &self.alphabet {
                let mut inserted = String::with_capacity(chars.len() + 1);
                inserted.extend(&chars[..i]);
                inserted.push(letter);
                inserted.extend(&chars[i..]);
                edits.push(inserted);
            }
        }
    }
}

impl Default for EditGenerator {
    fn default() -> Self {
        Self::new()
    }
}
