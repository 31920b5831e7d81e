//! Word frequency table built from a training corpus.
//!
//! Corpus text is lowercased and split into runs of ASCII word characters
//! (`[0-9A-Za-z_]`); every run bumps its
//! word's count by one. The table is the language model the corrector uses to
//! rank candidates.

use std::io::BufRead;
use std::sync::LazyLock;

use ahash::AHashMap;
use log::{info, warn};
use regex::Regex;

use crate::error::Result;

static WORD_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?-u:\w)+").expect("word pattern is valid"));

/// Iterate over the lowercase word runs of `text`.
pub fn corpus_words(text: &str) -> impl Iterator<Item = String> + '_ {
    WORD_PATTERN
        .find_iter(text)
        .map(|word| word.as_str().to_lowercase())
}

/// Word to occurrence count index.
#[derive(Debug, Clone, Default)]
pub struct FrequencyTable {
    counts: AHashMap<String, u32>,
    /// Total number of observed words.
    total: u64,
}

impl FrequencyTable {
    /// Create an empty table.
    pub fn new() -> Self {
        FrequencyTable::default()
    }

    /// Build a table from a block of text.
    pub fn from_text(text: &str) -> Self {
        let mut table = FrequencyTable::new();
        table.observe(text);
        table
    }

    /// Build a table from a corpus reader, one line at a time.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self> {
        let mut table = FrequencyTable::new();
        table.observe_reader(reader)?;
        Ok(table)
    }

    /// Count the words of every line of `reader`. Returns the number of lines read.
    pub fn observe_reader<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut lines = 0usize;
        for line in reader.lines() {
            self.observe(&line?);
            lines += 1;
        }

        if self.is_empty() {
            warn!("Corpus source is empty; no corrections can be suggested");
        } else {
            info!(
                "Loaded corpus: {lines} lines, {} words, {} distinct",
                self.total,
                self.counts.len()
            );
        }
        Ok(lines)
    }

    /// Count every word run in `text`.
    pub fn observe(&mut self, text: &str) {
        for word in corpus_words(text) {
            self.increment(word);
        }
    }

    /// Count one occurrence of an already normalized word.
    pub fn increment(&mut self, word: String) {
        *self.counts.entry(word).or_insert(0) += 1;
        self.total += 1;
    }

    /// Occurrences of `word`; zero when never seen.
    pub fn count(&self, word: &str) -> u32 {
        self.counts.get(word).copied().unwrap_or(0)
    }

    /// Whether `word` was observed at least once.
    pub fn contains(&self, word: &str) -> bool {
        self.count(word) > 0
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// Whether the table has no words.
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// Total number of observed words, duplicates included.
    pub fn total_count(&self) -> u64 {
        self.total
    }

    /// The `limit` most frequent words, highest count first and
    /// alphabetically among equal counts.
    pub fn most_frequent(&self, limit: usize) -> Vec<(String, u32)> {
        let mut word_freq: Vec<(String, u32)> = self
            .counts
            .iter()
            .map(|(word, count)| (word.clone(), *count))
            .collect();

        word_freq.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        word_freq.truncate(limit);
        word_freq
    }
}
