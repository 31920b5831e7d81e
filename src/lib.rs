//! # Bloomspell
//!
//! Spell checking against a Bloom filter dictionary, with corrections ranked
//! by corpus frequency.
//!
//! ## Features
//!
//! - Bloom filter dictionaries sized by false positive rate, bits per element
//!   or total bit budget
//! - Exact hash set dictionaries for comparison
//! - Bloom hash family built on SHA-2 digests
//! - Norvig-style correction at edit distance 1, then 2
//! - Punctuation-tolerant token lookup
//!
//! ```
//! use std::io::Cursor;
//! use bloomspell::prelude::*;
//!
//! let mut checker = SpellChecker::new(CheckerConfig::default()).unwrap();
//! checker.load_dictionary(Cursor::new("the cat sat on the mat")).unwrap();
//! checker.load_corpus(Cursor::new("the cat sat on the mat")).unwrap();
//!
//! assert!(checker.check_token("mat.").is_correct());
//! assert_eq!(checker.check_token("hte").render(), "the");
//! ```

pub mod candidates;
pub mod checker;
pub mod cli;
pub mod config;
pub mod corrector;
pub mod digest;
pub mod error;
pub mod frequency;
pub mod lookup;
pub mod membership;

pub mod prelude {
    pub use crate::checker::{LineReport, SpellChecker};
    pub use crate::config::{CheckerConfig, DictionaryConfig};
    pub use crate::corrector::{CorrectionResult, Corrector, CorrectorConfig};
    pub use crate::digest::{DigestAlgorithm, Digester};
    pub use crate::error::{BloomspellError, Result};
    pub use crate::frequency::FrequencyTable;
    pub use crate::lookup::{LookupOrchestrator, LookupState, TokenReport};
    pub use crate::membership::{BloomFilter, BloomParameters, ExactSet, MembershipSet};
}

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
