//! Command implementations for the Bloomspell CLI.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Cursor};
use std::path::Path;
use std::str::FromStr;

use log::{info, warn};

use crate::checker::SpellChecker;
use crate::cli::args::*;
use crate::cli::output::*;
use crate::config::{
    CheckerConfig, DEFAULT_EXPECTED_ELEMENTS, DEFAULT_FALSE_POSITIVE_PROBABILITY, DictionaryConfig,
};
use crate::corrector::{Corrector, CorrectorConfig};
use crate::digest::DigestAlgorithm;
use crate::error::{BloomspellError, Result};
use crate::frequency::FrequencyTable;
use crate::membership::BloomParameters;

/// Execute a CLI command.
pub fn execute_command(args: BloomspellArgs) -> Result<()> {
    match &args.command {
        Command::Check(check_args) => check_text(check_args.clone(), &args),
        Command::Correct(correct_args) => correct_words(correct_args.clone(), &args),
        Command::Filter(filter_args) => show_filter(filter_args.clone(), &args),
        Command::Stats(stats_args) => show_stats(stats_args.clone(), &args),
    }
}

/// Check an input file (or stdin) line by line.
fn check_text(args: CheckArgs, cli_args: &BloomspellArgs) -> Result<()> {
    let config = resolve_config(cli_args, &args.backend)?;
    let checker = load_checker(config, &args.dictionary, &args.corpus)?;

    let lines = match &args.input {
        Some(path) => {
            info!("Checking {}", path.display());
            checker.check_reader(BufReader::new(File::open(path)?))?
        }
        None => {
            info!("Checking standard input");
            checker.check_reader(io::stdin().lock())?
        }
    };

    let tokens_checked = lines.iter().map(|line| line.tokens.len()).sum();
    let misspelled = lines.iter().map(|line| line.misspelled().count()).sum();
    let results = CheckResults {
        lines,
        tokens_checked,
        misspelled,
        degraded: checker.is_degraded(),
    };

    output_check_results(&results, args.all, cli_args)
}

/// Correct words given on the command line.
fn correct_words(args: CorrectArgs, cli_args: &BloomspellArgs) -> Result<()> {
    let mut config = match &cli_args.config {
        Some(path) => CheckerConfig::from_json_file(path)?.corrector,
        None => CorrectorConfig::default(),
    };
    if args.single_edit {
        config.max_distance = 1;
    }

    let table = FrequencyTable::from_reader(open_source(&args.corpus, "corpus")?)?;
    let corrector = Corrector::with_config(table, config)?;

    let corrections = args
        .words
        .iter()
        .map(|word| {
            let word = word.to_lowercase();
            let result = corrector.correct(&word);
            WordCorrection { word, result }
        })
        .collect();

    output_corrections(&CorrectionResults { corrections }, cli_args)
}

/// Derive Bloom filter parameters from the given options.
fn show_filter(args: FilterArgs, cli_args: &BloomspellArgs) -> Result<()> {
    let parameters = match (
        args.false_positive,
        args.bits_per_element,
        args.hash_rounds,
        args.bit_set_size,
    ) {
        (Some(probability), None, None, None) => {
            BloomParameters::from_false_positive_probability(probability, args.expected)?
        }
        (None, Some(bits_per_element), Some(hash_rounds), None) => {
            BloomParameters::explicit(bits_per_element, args.expected, hash_rounds)?
        }
        (None, None, None, Some(bit_set_size)) => {
            BloomParameters::from_bit_set_size(bit_set_size, args.expected)?
        }
        _ => {
            return Err(BloomspellError::invalid_parameter(
                "specify exactly one of --false-positive, --bits-per-element with \
                 --hash-rounds, or --bit-set-size",
            ));
        }
    };

    let false_positive_probability_at_count =
        args.count.map(|count| parameters.false_positive_probability(count));
    let report = FilterReport {
        parameters,
        expected_false_positive_probability: parameters.expected_false_positive_probability(),
        count: args.count,
        false_positive_probability_at_count,
    };

    output_filter_report(&report, cli_args)
}

/// Show dictionary and corpus statistics.
fn show_stats(args: StatsArgs, cli_args: &BloomspellArgs) -> Result<()> {
    let config = resolve_config(cli_args, &args.backend)?;
    let checker = load_checker(config, &args.dictionary, &args.corpus)?;

    let report = StatsReport {
        stats: checker.stats()?,
        top_words: checker.corrector().table().most_frequent(args.top),
    };

    output_stats(&report, cli_args)
}

/// Load the configuration file, if any, and apply command line overrides.
fn resolve_config(cli_args: &BloomspellArgs, overrides: &DictionaryArgs) -> Result<CheckerConfig> {
    let mut config = match &cli_args.config {
        Some(path) => {
            info!("Loading configuration from {}", path.display());
            CheckerConfig::from_json_file(path)?
        }
        None => CheckerConfig::default(),
    };

    apply_overrides(&mut config, overrides)?;
    config.validate()?;
    Ok(config)
}

/// Apply `--exact`, `-p`, `-n` and `--digest` on top of a configuration.
fn apply_overrides(config: &mut CheckerConfig, overrides: &DictionaryArgs) -> Result<()> {
    if overrides.exact {
        config.dictionary = DictionaryConfig::Exact;
    } else if overrides.false_positive.is_some() || overrides.expected.is_some() {
        let (probability, expected) = match config.dictionary {
            DictionaryConfig::Bloom {
                false_positive_probability,
                expected_elements,
            } => (false_positive_probability, expected_elements),
            _ => (DEFAULT_FALSE_POSITIVE_PROBABILITY, DEFAULT_EXPECTED_ELEMENTS),
        };
        config.dictionary = DictionaryConfig::Bloom {
            false_positive_probability: overrides.false_positive.unwrap_or(probability),
            expected_elements: overrides.expected.unwrap_or(expected),
        };
    }

    if let Some(name) = &overrides.digest {
        config.digest = DigestAlgorithm::from_str(name)?;
    }
    Ok(())
}

/// Build a checker and load its dictionary and corpus.
fn load_checker(config: CheckerConfig, dictionary: &Path, corpus: &Path) -> Result<SpellChecker> {
    let mut checker = SpellChecker::new(config)?;
    checker.load_dictionary(open_source(dictionary, "dictionary")?)?;
    checker.load_corpus(open_source(corpus, "corpus")?)?;
    Ok(checker)
}

/// Open a dictionary or corpus file. A missing file reads as empty.
fn open_source(path: &Path, kind: &str) -> Result<Box<dyn BufRead>> {
    match File::open(path) {
        Ok(file) => {
            info!("Reading {kind} from {}", path.display());
            Ok(Box::new(BufReader::new(file)))
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("{kind} file {} not found; continuing without it", path.display());
            Ok(Box::new(Cursor::new(Vec::new())))
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn temp_file(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_overrides() {
        let mut config = CheckerConfig::default();
        let overrides = DictionaryArgs {
            expected: Some(500),
            digest: Some("sha512".to_string()),
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides).unwrap();
        assert_eq!(
            config.dictionary,
            DictionaryConfig::Bloom {
                false_positive_probability: DEFAULT_FALSE_POSITIVE_PROBABILITY,
                expected_elements: 500,
            }
        );
        assert_eq!(config.digest, DigestAlgorithm::Sha512);

        let overrides = DictionaryArgs {
            exact: true,
            ..Default::default()
        };
        apply_overrides(&mut config, &overrides).unwrap();
        assert_eq!(config.dictionary, DictionaryConfig::Exact);
    }

    #[test]
    fn test_unknown_digest_override() {
        let mut config = CheckerConfig::default();
        let overrides = DictionaryArgs {
            digest: Some("MD2".to_string()),
            ..Default::default()
        };
        let err = apply_overrides(&mut config, &overrides).unwrap_err();
        assert!(matches!(err, BloomspellError::DigestUnavailable(_)));
    }

    #[test]
    fn test_missing_source_reads_empty() {
        let mut reader = open_source(Path::new("/nonexistent/corpus.txt"), "corpus").unwrap();
        let mut line = String::new();
        assert_eq!(reader.read_line(&mut line).unwrap(), 0);
    }

    #[test]
    fn test_load_checker_from_files() {
        let dictionary = temp_file("the quick brown fox\njumps over lazy dog\n");
        let corpus = temp_file("The quick brown fox jumps over the lazy dog.");
        let config = CheckerConfig {
            dictionary: DictionaryConfig::Exact,
            ..Default::default()
        };

        let checker = load_checker(config, dictionary.path(), corpus.path()).unwrap();
        assert!(!checker.is_degraded());
        assert!(checker.check_token("fox,").is_correct());
        assert_eq!(checker.check_token("qiuck").render(), "quick");
    }

    #[test]
    fn test_load_checker_with_missing_corpus() {
        let dictionary = temp_file("word");
        let checker = load_checker(
            CheckerConfig::default(),
            dictionary.path(),
            Path::new("/nonexistent/corpus.txt"),
        )
        .unwrap();
        assert!(checker.is_degraded());
    }
}
