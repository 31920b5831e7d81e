//! Command line argument parsing for the Bloomspell CLI using clap.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

/// Bloomspell - Bloom filter dictionaries and edit-distance spelling correction
#[derive(Parser, Debug, Clone)]
#[command(name = "bloomspell")]
#[command(about = "Spell check text against a Bloom filter dictionary and suggest corrections")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct BloomspellArgs {
    /// Verbosity level (0=quiet, 1=normal, 2=verbose, 3=debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Quiet mode (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// JSON configuration file
    #[arg(long, value_name = "CONFIG_FILE", env = "BLOOMSPELL_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl BloomspellArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            match self.verbose {
                0 => 1, // Default to normal
                n => n,
            }
        }
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Check text against a dictionary and suggest corrections
    Check(CheckArgs),

    /// Suggest corrections for individual words
    Correct(CorrectArgs),

    /// Show Bloom filter parameters and false positive rates
    Filter(FilterArgs),

    /// Show dictionary and corpus statistics
    Stats(StatsArgs),
}

/// Dictionary backend overrides shared by several commands
#[derive(Args, Debug, Clone, Default)]
pub struct DictionaryArgs {
    /// Store the dictionary in an exact hash set instead of a Bloom filter
    #[arg(long, conflicts_with_all = ["false_positive", "expected"])]
    pub exact: bool,

    /// Target false positive probability of the Bloom filter
    #[arg(short = 'p', long)]
    pub false_positive: Option<f64>,

    /// Number of dictionary words the Bloom filter is sized for
    #[arg(short = 'n', long)]
    pub expected: Option<usize>,

    /// Digest algorithm for the Bloom filter hash family (e.g. SHA-256)
    #[arg(long)]
    pub digest: Option<String>,
}

/// Arguments for checking text
#[derive(Parser, Debug, Clone)]
pub struct CheckArgs {
    /// Dictionary file (whitespace-separated words)
    #[arg(short, long, value_name = "DICTIONARY_FILE")]
    pub dictionary: PathBuf,

    /// Training corpus used to rank corrections
    #[arg(short = 'C', long, value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Text to check (reads stdin when omitted)
    #[arg(value_name = "INPUT_FILE")]
    pub input: Option<PathBuf>,

    /// Report every token, not only misspelled ones
    #[arg(long)]
    pub all: bool,

    #[command(flatten)]
    pub backend: DictionaryArgs,
}

/// Arguments for correcting words
#[derive(Parser, Debug, Clone)]
pub struct CorrectArgs {
    /// Training corpus used to rank corrections
    #[arg(short = 'C', long, value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Only search one edit away
    #[arg(long)]
    pub single_edit: bool,

    /// Words to correct
    #[arg(value_name = "WORD", required = true)]
    pub words: Vec<String>,
}

/// Arguments for inspecting Bloom filter parameters
#[derive(Parser, Debug, Clone)]
pub struct FilterArgs {
    /// Target false positive probability
    #[arg(short = 'p', long, conflicts_with_all = ["bits_per_element", "bit_set_size"])]
    pub false_positive: Option<f64>,

    /// Bits per element (requires --hash-rounds)
    #[arg(short = 'c', long, requires = "hash_rounds", conflicts_with = "bit_set_size")]
    pub bits_per_element: Option<f64>,

    /// Hash rounds per element
    #[arg(short = 'k', long)]
    pub hash_rounds: Option<u32>,

    /// Total bit budget of the filter
    #[arg(short = 'm', long)]
    pub bit_set_size: Option<usize>,

    /// Number of elements the filter is sized for
    #[arg(short = 'n', long)]
    pub expected: usize,

    /// Also report the false positive rate after this many insertions
    #[arg(long)]
    pub count: Option<f64>,
}

/// Arguments for dictionary and corpus statistics
#[derive(Parser, Debug, Clone)]
pub struct StatsArgs {
    /// Dictionary file (whitespace-separated words)
    #[arg(short, long, value_name = "DICTIONARY_FILE")]
    pub dictionary: PathBuf,

    /// Training corpus
    #[arg(short = 'C', long, value_name = "CORPUS_FILE")]
    pub corpus: PathBuf,

    /// Number of most frequent corpus words to list
    #[arg(long, default_value = "10")]
    pub top: usize,

    #[command(flatten)]
    pub backend: DictionaryArgs,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable output
    Human,
    /// JSON output
    Json,
}
