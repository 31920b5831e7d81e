//! Batch spell checking over dictionary, corpus and input sources.

use std::io::BufRead;

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::config::CheckerConfig;
use crate::corrector::Corrector;
use crate::error::Result;
use crate::frequency::FrequencyTable;
use crate::lookup::{LookupOrchestrator, TokenReport};
use crate::membership::{Backend, BloomParameters, MembershipSet};

/// Reports for every token of one input line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineReport {
    /// One-based line number.
    pub line_number: usize,
    /// The line as read.
    pub text: String,
    /// Reports for the whitespace-separated tokens, left to right.
    pub tokens: Vec<TokenReport>,
}

impl LineReport {
    /// Tokens the dictionary did not accept.
    pub fn misspelled(&self) -> impl Iterator<Item = &TokenReport> {
        self.tokens.iter().filter(|report| !report.is_correct())
    }
}

/// Summary of the loaded dictionary and corpus.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CheckerStats {
    /// Dictionary backend.
    pub backend: Backend,
    /// Words inserted into the dictionary.
    pub dictionary_entries: usize,
    /// Filter sizing, for the Bloom backends.
    pub bloom: Option<BloomParameters>,
    /// False positive probability at the current dictionary size.
    pub false_positive_probability: Option<f64>,
    /// Distinct corpus words.
    pub corpus_words: usize,
    /// Total corpus words, duplicates included.
    pub corpus_total: u64,
    /// Whether an empty source leaves the checker unable to do its job.
    pub degraded: bool,
}

/// Spell checker owning a dictionary and a corrector.
pub struct SpellChecker {
    dictionary: Box<dyn MembershipSet<str>>,
    corrector: Corrector,
    config: CheckerConfig,
}

impl SpellChecker {
    /// Create a checker with an empty dictionary and an empty corpus.
    pub fn new(config: CheckerConfig) -> Result<Self> {
        config.validate()?;
        let dictionary = config.dictionary.build(config.digester())?;
        let corrector = Corrector::with_config(FrequencyTable::new(), config.corrector.clone())?;

        Ok(SpellChecker {
            dictionary,
            corrector,
            config,
        })
    }

    /// The active configuration.
    pub fn config(&self) -> &CheckerConfig {
        &self.config
    }

    /// The dictionary.
    pub fn dictionary(&self) -> &dyn MembershipSet<str> {
        self.dictionary.as_ref()
    }

    /// The corrector.
    pub fn corrector(&self) -> &Corrector {
        &self.corrector
    }

    /// Insert one dictionary word.
    pub fn add_dictionary_word(&mut self, word: &str) {
        self.dictionary.insert(word);
    }

    /// Insert every whitespace-separated word of every line. Returns the
    /// number of words inserted.
    pub fn load_dictionary<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut added = 0;
        for line in reader.lines() {
            for word in line?.split_whitespace() {
                self.dictionary.insert(word);
                added += 1;
            }
        }

        if added == 0 {
            warn!("Dictionary source is empty; every token will be treated as misspelled");
        } else {
            info!("Loaded {added} dictionary words");
        }
        if let Some(expected) = self
            .config
            .dictionary
            .bloom_parameters()?
            .map(|params| params.expected_elements())
            && self.dictionary.len() > expected
        {
            warn!(
                "Dictionary holds {} words but the filter was sized for {expected}; \
                 false positives will exceed the target rate",
                self.dictionary.len()
            );
        }
        Ok(added)
    }

    /// Count the words of every corpus line.
    pub fn load_corpus<R: BufRead>(&mut self, reader: R) -> Result<()> {
        self.corrector.table_mut().observe_reader(reader)?;
        Ok(())
    }

    /// Whether an empty dictionary or corpus limits the checker.
    pub fn is_degraded(&self) -> bool {
        self.dictionary.is_empty() || self.corrector.table().is_empty()
    }

    /// Check a single token.
    pub fn check_token(&self, token: &str) -> TokenReport {
        self.orchestrator().check(token)
    }

    /// Check every whitespace-separated token of a line, left to right.
    pub fn check_line(&self, line: &str) -> Vec<TokenReport> {
        let lookup = self.orchestrator();
        line.split_whitespace()
            .map(|token| lookup.check(token))
            .collect()
    }

    /// Check every line of `reader` in order.
    pub fn check_reader<R: BufRead>(&self, reader: R) -> Result<Vec<LineReport>> {
        let mut reports = Vec::new();
        for (index, line) in reader.lines().enumerate() {
            let text = line?;
            let tokens = self.check_line(&text);
            reports.push(LineReport {
                line_number: index + 1,
                text,
                tokens,
            });
        }
        Ok(reports)
    }

    /// Check a block of text line by line.
    pub fn check_text(&self, text: &str) -> Vec<LineReport> {
        text.lines()
            .enumerate()
            .map(|(index, line)| LineReport {
                line_number: index + 1,
                text: line.to_string(),
                tokens: self.check_line(line),
            })
            .collect()
    }

    /// Summarize the loaded sources.
    pub fn stats(&self) -> Result<CheckerStats> {
        let table = self.corrector.table();
        Ok(CheckerStats {
            backend: self.dictionary.backend(),
            dictionary_entries: self.dictionary.len(),
            bloom: self.config.dictionary.bloom_parameters()?,
            false_positive_probability: self.dictionary.false_positive_probability(),
            corpus_words: table.len(),
            corpus_total: table.total_count(),
            degraded: self.is_degraded(),
        })
    }

    fn orchestrator(&self) -> LookupOrchestrator<'_> {
        LookupOrchestrator::new(self.dictionary.as_ref(), &self.corrector)
    }
}
