//! Error types for the Bloomspell library.
//!
//! All fallible operations return [`Result`], whose error side is the
//! [`BloomspellError`] enum. Only construction and I/O can fail; checking or
//! correcting a token never produces an error (a missing correction is
//! reported as data, see [`crate::corrector::CorrectionResult`]).
//!
//! # Examples
//!
//! ```
//! use bloomspell::error::{BloomspellError, Result};
//!
//! fn example_operation() -> Result<()> {
//!     Err(BloomspellError::invalid_parameter("expected elements must be positive"))
//! }
//!
//! match example_operation() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::io;

use thiserror::Error;

/// The main error type for Bloomspell operations.
#[derive(Error, Debug)]
pub enum BloomspellError {
    /// I/O errors (reading dictionaries, corpora, input text)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A construction parameter was out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The requested digest algorithm is not available
    #[error("Digest unavailable: {0}")]
    DigestUnavailable(String),

    /// Configuration errors (malformed or inconsistent settings)
    #[error("Configuration error: {0}")]
    Config(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for operations that may fail with BloomspellError.
pub type Result<T> = std::result::Result<T, BloomspellError>;

impl BloomspellError {
    /// Create a new invalid parameter error.
    pub fn invalid_parameter<S: Into<String>>(msg: S) -> Self {
        BloomspellError::InvalidParameter(msg.into())
    }

    /// Create a new digest unavailable error.
    pub fn digest_unavailable<S: Into<String>>(msg: S) -> Self {
        BloomspellError::DigestUnavailable(msg.into())
    }

    /// Create a new configuration error.
    pub fn config<S: Into<String>>(msg: S) -> Self {
        BloomspellError::Config(msg.into())
    }
}
