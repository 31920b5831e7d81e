//! Spell checker configuration.
//!
//! Configurations are plain `serde` structs and can be read from JSON:
//!
//! ```
//! use bloomspell::config::{CheckerConfig, DictionaryConfig};
//!
//! let config = CheckerConfig::from_json_str(
//!     r#"{ "dictionary": { "backend": "bloom", "false_positive_probability": 0.01, "expected_elements": 5000 } }"#,
//! )
//! .unwrap();
//! assert!(matches!(config.dictionary, DictionaryConfig::Bloom { .. }));
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::corrector::CorrectorConfig;
use crate::digest::{DigestAlgorithm, Digester};
use crate::error::{BloomspellError, Result};
use crate::membership::{BloomFilter, BloomParameters, ExactSet, MembershipSet};

/// False positive probability used when none is configured.
pub const DEFAULT_FALSE_POSITIVE_PROBABILITY: f64 = 0.24;

/// Expected dictionary size used when none is configured.
pub const DEFAULT_EXPECTED_ELEMENTS: usize = 99_000;

/// How the dictionary is stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "backend", rename_all = "snake_case")]
pub enum DictionaryConfig {
    /// An exact hash set.
    Exact,
    /// A Bloom filter sized for a target false positive probability.
    Bloom {
        false_positive_probability: f64,
        expected_elements: usize,
    },
    /// A Bloom filter with explicit sizing.
    BloomExplicit {
        bits_per_element: f64,
        expected_elements: usize,
        hash_rounds: u32,
    },
    /// A Bloom filter with a fixed bit budget.
    BloomSized {
        bit_set_size: usize,
        expected_elements: usize,
    },
}

impl Default for DictionaryConfig {
    fn default() -> Self {
        DictionaryConfig::Bloom {
            false_positive_probability: DEFAULT_FALSE_POSITIVE_PROBABILITY,
            expected_elements: DEFAULT_EXPECTED_ELEMENTS,
        }
    }
}

impl DictionaryConfig {
    /// Filter sizing for the Bloom backends, `None` for the exact backend.
    pub fn bloom_parameters(&self) -> Result<Option<BloomParameters>> {
        let params = match *self {
            DictionaryConfig::Exact => return Ok(None),
            DictionaryConfig::Bloom {
                false_positive_probability,
                expected_elements,
            } => BloomParameters::from_false_positive_probability(
                false_positive_probability,
                expected_elements,
            )?,
            DictionaryConfig::BloomExplicit {
                bits_per_element,
                expected_elements,
                hash_rounds,
            } => BloomParameters::explicit(bits_per_element, expected_elements, hash_rounds)?,
            DictionaryConfig::BloomSized {
                bit_set_size,
                expected_elements,
            } => BloomParameters::from_bit_set_size(bit_set_size, expected_elements)?,
        };
        Ok(Some(params))
    }

    /// Build an empty dictionary for this configuration.
    pub fn build(&self, digester: Digester) -> Result<Box<dyn MembershipSet<str>>> {
        Ok(match self.bloom_parameters()? {
            Some(params) => Box::new(BloomFilter::for_strings(params, digester)),
            None => Box::new(ExactSet::for_strings()),
        })
    }
}

/// Top-level spell checker configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckerConfig {
    /// Dictionary backend and sizing.
    pub dictionary: DictionaryConfig,
    /// Digest algorithm behind the Bloom filter hash family.
    pub digest: DigestAlgorithm,
    /// Corrector settings.
    pub corrector: CorrectorConfig,
}

impl CheckerConfig {
    /// Parse a configuration from JSON and validate it.
    ///
    /// An unknown `digest` name fails with [`BloomspellError::DigestUnavailable`].
    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if let Some(name) = value.get("digest").and_then(|digest| digest.as_str()) {
            name.parse::<DigestAlgorithm>()?;
        }
        let config: CheckerConfig = serde_json::from_value(value)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON configuration file and validate it.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|e| {
            BloomspellError::config(format!("cannot read {}: {e}", path.display()))
        })?;
        Self::from_json_str(&json)
    }

    /// Reject out-of-range parameters.
    pub fn validate(&self) -> Result<()> {
        self.dictionary.bloom_parameters()?;
        self.corrector.validate()
    }

    /// The configured digest provider.
    pub fn digester(&self) -> Digester {
        Digester::new(self.digest)
    }
}
