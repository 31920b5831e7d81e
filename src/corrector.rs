//! Frequency-ranked edit-distance spelling corrector.
//!
//! A word the corpus already knows is returned unchanged. Otherwise its
//! distance-1 candidates are looked up in the frequency table and the most
//! frequent known one wins; only when none is known are distance-2 candidates
//! tried the same way. Equal frequencies are broken by picking the
//! lexicographically smallest word, so results do not depend on generation or
//! hash order.
//!
//! Distance-2 generation costs `O((53 L + 25)^2)` strings for a word of length
//! `L`. Words longer than [`CorrectorConfig::max_distance_two_len`] skip that
//! round.

use std::fmt;

use log::debug;
use serde::{Deserialize, Serialize};

use crate::candidates::{Candidate, EditGenerator, EditRound};
use crate::error::{BloomspellError, Result};
use crate::frequency::FrequencyTable;

/// Rendered in place of a suggestion when nothing plausible was found.
pub const NO_CORRECTION_MARKER: &str = "no possible corrections found";

/// Configuration for the corrector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CorrectorConfig {
    /// Deepest edit round to search, 1 or 2.
    pub max_distance: usize,
    /// Longest word (in chars) for which distance-2 candidates are generated.
    pub max_distance_two_len: usize,
}

impl Default for CorrectorConfig {
    fn default() -> Self {
        CorrectorConfig {
            max_distance: 2,
            max_distance_two_len: 24,
        }
    }
}

impl CorrectorConfig {
    /// Check the configuration for out-of-range values.
    pub fn validate(&self) -> Result<()> {
        if !(1..=2).contains(&self.max_distance) {
            return Err(BloomspellError::invalid_parameter(format!(
                "max distance must be 1 or 2, got {}",
                self.max_distance
            )));
        }
        Ok(())
    }
}

/// Outcome of correcting one word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", content = "word", rename_all = "snake_case")]
pub enum CorrectionResult {
    /// The corpus knows the word as is.
    AlreadyCorrect(String),
    /// The most likely intended word.
    Suggestion(String),
    /// No known word within reach.
    NoSuggestionFound,
}

impl CorrectionResult {
    /// The word to show for this result, if any.
    pub fn word(&self) -> Option<&str> {
        match self {
            CorrectionResult::AlreadyCorrect(word) | CorrectionResult::Suggestion(word) => {
                Some(word)
            }
            CorrectionResult::NoSuggestionFound => None,
        }
    }

    /// Whether a replacement word was proposed.
    pub fn is_suggestion(&self) -> bool {
        matches!(self, CorrectionResult::Suggestion(_))
    }
}

impl fmt::Display for CorrectionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.word().unwrap_or(NO_CORRECTION_MARKER))
    }
}

/// Spelling corrector backed by a corpus frequency table.
#[derive(Debug, Clone, Default)]
pub struct Corrector {
    table: FrequencyTable,
    generator: EditGenerator,
    config: CorrectorConfig,
}

impl Corrector {
    /// Create a corrector with the default configuration.
    pub fn new(table: FrequencyTable) -> Self {
        Corrector {
            table,
            generator: EditGenerator::new(),
            config: CorrectorConfig::default(),
        }
    }

    /// Create a corrector with a custom configuration.
    pub fn with_config(table: FrequencyTable, config: CorrectorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Corrector {
            table,
            generator: EditGenerator::new(),
            config,
        })
    }

    /// Replace the candidate generator, e.g. to use another alphabet.
    pub fn with_generator(mut self, generator: EditGenerator) -> Self {
        self.generator = generator;
        self
    }

    /// The frequency table used for ranking.
    pub fn table(&self) -> &FrequencyTable {
        &self.table
    }

    /// Mutable access to the table while the corpus is being loaded.
    pub fn table_mut(&mut self) -> &mut FrequencyTable {
        &mut self.table
    }

    /// The active configuration.
    pub fn config(&self) -> &CorrectorConfig {
        &self.config
    }

    /// Correct a lowercase word.
    pub fn correct(&self, word: &str) -> CorrectionResult {
        if self.table.contains(word) {
            return CorrectionResult::AlreadyCorrect(word.to_string());
        }

        match self.suggest(word) {
            Some(candidate) => CorrectionResult::Suggestion(candidate.word),
            None => CorrectionResult::NoSuggestionFound,
        }
    }

    /// The best known candidate for `word`, searching distance 1 before distance 2.
    pub fn suggest(&self, word: &str) -> Option<Candidate> {
        if self.table.is_empty() {
            return None;
        }

        let first_round = self.generator.edits(word);
        if let Some(best) = self.best_known(first_round.iter().cloned(), EditRound::One) {
            debug!(
                "'{word}' -> '{}' ({}, frequency {})",
                best.word, best.round, best.frequency
            );
            return Some(best);
        }

        if self.config.max_distance < 2 {
            return None;
        }

        let len = word.chars().count();
        if len > self.config.max_distance_two_len {
            debug!(
                "'{word}' has {len} chars, over the distance-2 limit of {}",
                self.config.max_distance_two_len
            );
            return None;
        }

        let best = self.best_known(self.generator.edits2(&first_round), EditRound::Two);
        match &best {
            Some(best) => debug!(
                "'{word}' -> '{}' ({}, frequency {})",
                best.word, best.round, best.frequency
            ),
            None => debug!("'{word}' has no known word within distance 2"),
        }
        best
    }

    /// The most frequent known word among `candidates`.
    fn best_known<I>(&self, candidates: I, round: EditRound) -> Option<Candidate>
    where
        I: IntoIterator<Item = String>,
    {
        let mut best: Option<(String, u32)> = None;

        for candidate in candidates {
            let frequency = self.table.count(&candidate);
            if frequency == 0 {
                continue;
            }

            let better = match &best {
                None => true,
                Some((word, count)) => {
                    frequency > *count || (frequency == *count && candidate < *word)
                }
            };
            if better {
                best = Some((candidate, frequency));
            }
        }

        best.map(|(word, frequency)| Candidate::new(word, frequency, round))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn corrector_for(corpus: &str) -> Corrector {
        Corrector::new(FrequencyTable::from_text(corpus))
    }

    #[test]
    fn test_known_word_is_already_correct() {
        let corrector = corrector_for("the cat sat on the mat");
        assert_eq!(
            corrector.correct("the"),
            CorrectionResult::AlreadyCorrect("the".to_string())
        );
    }

    #[test]
    fn test_transposition_correction() {
        let corrector = corrector_for("the cat sat on the mat");
        assert_eq!(
            corrector.correct("hte"),
            CorrectionResult::Suggestion("the".to_string())
        );
    }

    #[test]
    fn test_no_suggestion() {
        let corrector = corrector_for("cat dog");
        assert_eq!(corrector.correct("xyzzyx"), CorrectionResult::NoSuggestionFound);
        assert_eq!(
            corrector.correct("xyzzyx").to_string(),
            NO_CORRECTION_MARKER
        );
    }

    #[test]
    fn test_highest_frequency_wins() {
        let corrector = corrector_for("car cat cat");
        assert_eq!(
            corrector.correct("caz"),
            CorrectionResult::Suggestion("cat".to_string())
        );
    }

    #[test]
    fn test_ties_break_lexicographically() {
        let corrector = corrector_for("cat car");
        assert_eq!(
            corrector.correct("caz"),
            CorrectionResult::Suggestion("car".to_string())
        );

        let corrector = corrector_for("car cat");
        assert_eq!(
            corrector.correct("caz"),
            CorrectionResult::Suggestion("car".to_string())
        );
    }

    #[test]
    fn test_distance_one_beats_more_frequent_distance_two() {
        // "word" is one insertion away from "wrd", "world" two.
        let corrector = corrector_for("word world world world");
        let candidate = corrector.suggest("wrd").unwrap();
        assert_eq!(candidate.word, "word");
        assert_eq!(candidate.round, EditRound::One);
        assert_eq!(candidate.frequency, 1);
    }

    #[test]
    fn test_distance_two_correction() {
        let corrector = corrector_for("hello world");
        let candidate = corrector.suggest("wrd").unwrap();
        assert_eq!(candidate.word, "world");
        assert_eq!(candidate.round, EditRound::Two);
        assert_eq!(
            corrector.correct("wrd"),
            CorrectionResult::Suggestion("world".to_string())
        );
    }

    #[test]
    fn test_max_distance_one_skips_second_round() {
        let config = CorrectorConfig {
            max_distance: 1,
            ..Default::default()
        };
        let corrector =
            Corrector::with_config(FrequencyTable::from_text("hello world"), config).unwrap();
        assert_eq!(corrector.correct("wrd"), CorrectionResult::NoSuggestionFound);
    }

    #[test]
    fn test_long_words_skip_second_round() {
        let config = CorrectorConfig {
            max_distance_two_len: 2,
            ..Default::default()
        };
        let corrector =
            Corrector::with_config(FrequencyTable::from_text("hello world"), config).unwrap();
        assert_eq!(corrector.correct("wrd"), CorrectionResult::NoSuggestionFound);
        // Distance 1 is unaffected by the limit.
        assert_eq!(
            corrector.correct("wrld"),
            CorrectionResult::Suggestion("world".to_string())
        );
    }

    #[test]
    fn test_invalid_config() {
        for max_distance in [0, 3] {
            let config = CorrectorConfig {
                max_distance,
                ..Default::default()
            };
            let err = Corrector::with_config(FrequencyTable::new(), config).unwrap_err();
            assert!(matches!(err, BloomspellError::InvalidParameter(_)));
        }
    }

    #[test]
    fn test_empty_table_never_suggests() {
        let corrector = Corrector::new(FrequencyTable::new());
        assert_eq!(corrector.correct("anything"), CorrectionResult::NoSuggestionFound);
    }

    #[test]
    fn test_result_serialization() {
        let json = serde_json::to_string(&CorrectionResult::Suggestion("the".to_string())).unwrap();
        assert_eq!(json, r#"{"outcome":"suggestion","word":"the"}"#);

        let json = serde_json::to_string(&CorrectionResult::NoSuggestionFound).unwrap();
        assert_eq!(json, r#"{"outcome":"no_suggestion_found"}"#);
    }
}
