//! Per-token lookup: dictionary check, punctuation retries, then correction.
//!
//! A token is lowercased and looked up as is. If that fails, the first of
//! these punctuation shapes the token has is stripped and looked up once more:
//!
//! 1. a leading `"`;
//! 2. one trailing `.`, `,`, `!`, `;` or `:`;
//! 3. a trailing `,"`, `."`, `?"` or `!"`.
//!
//! Only one shape is ever stripped. A token that still is not found goes, with
//! that shape removed, to the [`Corrector`].

use serde::{Deserialize, Serialize};

use crate::corrector::{CorrectionResult, Corrector};
use crate::membership::MembershipSet;

const OPENING_QUOTE: char = '"';
const TRAILING_PUNCTUATION: [char; 5] = ['.', ',', '!', ';', ':'];
const CLOSING_QUOTE_SUFFIXES: [&str; 4] = [",\"", ".\"", "?\"", "!\""];

/// Where a token ended up in the lookup state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LookupState {
    /// The lowercased token, or the token without its trailing punctuation,
    /// is in the dictionary.
    ExactMatch,
    /// The token is in the dictionary once its opening quote is stripped.
    PunctuationStrippedMatch,
    /// The corrector produced a word for the token.
    Corrected,
    /// Neither the dictionary nor the corrector knew the token.
    NoSuggestion,
}

impl LookupState {
    /// Whether the dictionary accepted the token.
    pub fn is_match(&self) -> bool {
        matches!(
            self,
            LookupState::ExactMatch | LookupState::PunctuationStrippedMatch
        )
    }
}

/// The dictionary-only part of a lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The dictionary accepted the token.
    Matched(LookupState),
    /// The dictionary rejected the token; holds the normalized word to correct.
    Unresolved(String),
}

/// The result of checking one token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenReport {
    /// The token as it appeared in the input.
    pub token: String,
    /// Final lookup state.
    pub state: LookupState,
    /// The normalized word handed to the corrector, if it was consulted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lookup_word: Option<String>,
    /// The corrector's verdict, if it was consulted.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correction: Option<CorrectionResult>,
}

impl TokenReport {
    /// Whether the token is spelled correctly according to the dictionary.
    pub fn is_correct(&self) -> bool {
        self.state.is_match()
    }

    /// Text to show for this token: the token itself when the dictionary
    /// accepted it, otherwise the corrector's rendering.
    pub fn render(&self) -> String {
        match &self.correction {
            Some(correction) => correction.to_string(),
            None => self.token.clone(),
        }
    }
}

/// Runs the lookup state machine against a dictionary and a corrector.
pub struct LookupOrchestrator<'a> {
    dictionary: &'a dyn MembershipSet<str>,
    corrector: &'a Corrector,
}

impl<'a> LookupOrchestrator<'a> {
    /// Create an orchestrator over borrowed components.
    pub fn new(dictionary: &'a dyn MembershipSet<str>, corrector: &'a Corrector) -> Self {
        LookupOrchestrator {
            dictionary,
            corrector,
        }
    }

    /// Check a token against the dictionary only.
    pub fn resolve(&self, token: &str) -> Resolution {
        let word = token.to_lowercase();
        if self.dictionary.contains(&word) {
            return Resolution::Matched(LookupState::ExactMatch);
        }

        let rules: [(fn(&str) -> Option<&str>, LookupState); 3] = [
            (strip_opening_quote, LookupState::PunctuationStrippedMatch),
            (strip_trailing_punctuation, LookupState::ExactMatch),
            (strip_closing_quote, LookupState::ExactMatch),
        ];

        // The first matching shape decides; a failed retest is final.
        for (strip, state) in rules {
            if let Some(stripped) = strip(&word) {
                if self.dictionary.contains(stripped) {
                    return Resolution::Matched(state);
                }
                return Resolution::Unresolved(stripped.to_string());
            }
        }

        Resolution::Unresolved(word)
    }

    /// Check a token, consulting the corrector when the dictionary rejects it.
    pub fn check(&self, token: &str) -> TokenReport {
        match self.resolve(token) {
            Resolution::Matched(state) => TokenReport {
                token: token.to_string(),
                state,
                lookup_word: None,
                correction: None,
            },
            Resolution::Unresolved(word) => {
                let correction = self.corrector.correct(&word);
                let state = match correction {
                    CorrectionResult::NoSuggestionFound => LookupState::NoSuggestion,
                    _ => LookupState::Corrected,
                };
                TokenReport {
                    token: token.to_string(),
                    state,
                    lookup_word: Some(word),
                    correction: Some(correction),
                }
            }
        }
    }
}

fn strip_opening_quote(word: &str) -> Option<&str> {
    word.strip_prefix(OPENING_QUOTE)
        .filter(|rest| !rest.is_empty())
}

fn strip_trailing_punctuation(word: &str) -> Option<&str> {
    word.strip_suffix(TRAILING_PUNCTUATION)
        .filter(|rest| !rest.is_empty())
}

fn strip_closing_quote(word: &str) -> Option<&str> {
    CLOSING_QUOTE_SUFFIXES
        .iter()
        .find_map(|suffix| word.strip_suffix(suffix))
        .filter(|rest| !rest.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::frequency::FrequencyTable;
    use crate::membership::ExactSet;

    fn dictionary(words: &[&str]) -> ExactSet<str> {
        let mut set = ExactSet::for_strings();
        for word in words {
            set.insert(word);
        }
        set
    }

    #[test]
    fn test_exact_match_keeps_token() {
        let dict = dictionary(&["book"]);
        let corrector = Corrector::new(FrequencyTable::new());
        let lookup = LookupOrchestrator::new(&dict, &corrector);

        let report = lookup.check("Book");
        assert_eq!(report.state, LookupState::ExactMatch);
        assert_eq!(report.render(), "Book");
        assert!(report.correction.is_none());
    }

    #[test]
    fn test_trailing_punctuation_resolves_without_corrector() {
        let dict = dictionary(&["book"]);
        // An empty corpus: if the corrector were consulted it would find nothing.
        let corrector = Corrector::new(FrequencyTable::new());
        let lookup = LookupOrchestrator::new(&dict, &corrector);

        for token in ["book.", "book,", "book!", "book;", "book:"] {
            let report = lookup.check(token);
            assert!(report.is_correct(), "{token}");
            assert_eq!(report.state, LookupState::ExactMatch);
            assert!(report.correction.is_none());
            assert_eq!(report.render(), token);
        }
    }

    #[test]
    fn test_quote_shapes() {
        let dict = dictionary(&["she", "said"]);
        let corrector = Corrector::new(FrequencyTable::new());
        let lookup = LookupOrchestrator::new(&dict, &corrector);

        assert_eq!(
            lookup.resolve("\"She"),
            Resolution::Matched(LookupState::PunctuationStrippedMatch)
        );
        for token in ["said,\"", "said.\"", "said?\"", "said!\""] {
            assert_eq!(
                lookup.resolve(token),
                Resolution::Matched(LookupState::ExactMatch),
                "{token}"
            );
        }
    }

    #[test]
    fn test_only_first_matching_shape_is_stripped() {
        let dict = dictionary(&["she", "book"]);
        let corrector = Corrector::new(FrequencyTable::from_text("she book"));
        let lookup = LookupOrchestrator::new(&dict, &corrector);

        // The opening quote goes, the period stays.
        assert_eq!(lookup.resolve("\"she."), Resolution::Unresolved("she.".into()));
        // Only one trailing comma is removed.
        assert_eq!(lookup.resolve("book,,"), Resolution::Unresolved("book,".into()));

        let report = lookup.check("\"She.");
        assert!(!report.is_correct());
        assert_eq!(report.lookup_word.as_deref(), Some("she."));
        assert_eq!(report.render(), "she");
    }

    #[test]
    fn test_unsupported_shapes_are_unresolved() {
        let dict = dictionary(&["book"]);
        let corrector = Corrector::new(FrequencyTable::new());
        let lookup = LookupOrchestrator::new(&dict, &corrector);

        // '?' alone is not a stripped trailing character, nor is a closing paren.
        assert_eq!(lookup.resolve("book?"), Resolution::Unresolved("book?".into()));
        assert_eq!(lookup.resolve("(book"), Resolution::Unresolved("(book".into()));
        // A lone quote is not stripped down to nothing.
        assert_eq!(lookup.resolve("\""), Resolution::Unresolved("\"".into()));
    }

    #[test]
    fn test_unresolved_token_is_corrected() {
        let dict = dictionary(&["the"]);
        let corrector = Corrector::new(FrequencyTable::from_text("the the cat"));
        let lookup = LookupOrchestrator::new(&dict, &corrector);

        let report = lookup.check("Teh.");
        assert_eq!(report.state, LookupState::Corrected);
        assert_eq!(report.lookup_word.as_deref(), Some("teh"));
        assert_eq!(
            report.correction,
            Some(CorrectionResult::Suggestion("the".to_string()))
        );
        assert_eq!(report.render(), "the");
    }

    #[test]
    fn test_unresolved_token_without_suggestion() {
        let dict = dictionary(&["cat"]);
        let corrector = Corrector::new(FrequencyTable::from_text("cat dog"));
        let lookup = LookupOrchestrator::new(&dict, &corrector);

        let report = lookup.check("xyzzyx");
        assert_eq!(report.state, LookupState::NoSuggestion);
        assert_eq!(report.render(), crate::corrector::NO_CORRECTION_MARKER);
    }

    #[test]
    fn test_corpus_word_missing_from_dictionary() {
        let dict = dictionary(&["cat"]);
        let corrector = Corrector::new(FrequencyTable::from_text("cat dog"));
        let lookup = LookupOrchestrator::new(&dict, &corrector);

        let report = lookup.check("Dog");
        assert_eq!(report.state, LookupState::Corrected);
        assert_eq!(
            report.correction,
            Some(CorrectionResult::AlreadyCorrect("dog".to_string()))
        );
    }
}
