//! Digest provider used to derive the hash family of the Bloom filter.
//!
//! Every call to [`Digester::digest`] builds a fresh hashing context, so a
//! single `Digester` can be shared freely between filters and threads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha224, Sha256, Sha384, Sha512};

use crate::error::{BloomspellError, Result};

/// Cryptographic hash algorithms available to the digest provider.
///
/// Serialized under its canonical name; deserialized through [`FromStr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String")]
pub enum DigestAlgorithm {
    /// SHA-224 (28 byte output).
    #[serde(rename = "SHA-224")]
    Sha224,
    /// SHA-256 (32 byte output).
    #[default]
    #[serde(rename = "SHA-256")]
    Sha256,
    /// SHA-384 (48 byte output).
    #[serde(rename = "SHA-384")]
    Sha384,
    /// SHA-512 (64 byte output).
    #[serde(rename = "SHA-512")]
    Sha512,
}

impl DigestAlgorithm {
    /// Canonical algorithm name.
    pub fn name(&self) -> &'static str {
        match self {
            DigestAlgorithm::Sha224 => "SHA-224",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Digest output length in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            DigestAlgorithm::Sha224 => 28,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        }
    }
}

impl fmt::Display for DigestAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DigestAlgorithm {
    type Err = BloomspellError;

    /// Parse an algorithm name. Case and the dash are ignored, so `sha256`,
    /// `SHA-256` and `Sha-256` all resolve to [`DigestAlgorithm::Sha256`].
    fn from_str(name: &str) -> Result<Self> {
        let normalized: String = name
            .chars()
            .filter(|c| *c != '-' && *c != '_')
            .collect::<String>()
            .to_ascii_uppercase();

        match normalized.as_str() {
            "SHA224" => Ok(DigestAlgorithm::Sha224),
            "SHA256" => Ok(DigestAlgorithm::Sha256),
            "SHA384" => Ok(DigestAlgorithm::Sha384),
            "SHA512" => Ok(DigestAlgorithm::Sha512),
            _ => Err(BloomspellError::digest_unavailable(format!(
                "no digest algorithm named '{name}' (available: SHA-224, SHA-256, SHA-384, SHA-512)"
            ))),
        }
    }
}

impl TryFrom<String> for DigestAlgorithm {
    type Error = BloomspellError;

    fn try_from(name: String) -> Result<Self> {
        name.parse()
    }
}

/// Stateless digest provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Digester {
    algorithm: DigestAlgorithm,
}

impl Digester {
    /// Create a digester for the given algorithm.
    pub fn new(algorithm: DigestAlgorithm) -> Self {
        Digester { algorithm }
    }

    /// Look up an algorithm by name.
    ///
    /// Fails with [`BloomspellError::DigestUnavailable`] when the name is unknown;
    /// there is no fallback hash.
    pub fn from_name(name: &str) -> Result<Self> {
        Ok(Digester::new(name.parse()?))
    }

    /// The algorithm this digester uses.
    pub fn algorithm(&self) -> DigestAlgorithm {
        self.algorithm
    }

    /// Digest `data`. Identical input always yields identical output.
    pub fn digest(&self, data: &[u8]) -> Vec<u8> {
        match self.algorithm {
            DigestAlgorithm::Sha224 => Sha224::digest(data).to_vec(),
            DigestAlgorithm::Sha256 => Sha256::digest(data).to_vec(),
            DigestAlgorithm::Sha384 => Sha384::digest(data).to_vec(),
            DigestAlgorithm::Sha512 => Sha512::digest(data).to_vec(),
        }
    }

    /// First four digest bytes of `data` read as a big-endian `u32`.
    pub fn prefix_u32(&self, data: &[u8]) -> u32 {
        let digest = self.digest(data);
        u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]])
    }
}
