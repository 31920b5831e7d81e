//! Output formatting for CLI commands.

use serde::{Deserialize, Serialize};

use crate::checker::{CheckerStats, LineReport};
use crate::cli::args::{BloomspellArgs, OutputFormat};
use crate::corrector::CorrectionResult;
use crate::error::Result;
use crate::membership::BloomParameters;

/// Result structure for the check command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CheckResults {
    pub lines: Vec<LineReport>,
    pub tokens_checked: usize,
    pub misspelled: usize,
    pub degraded: bool,
}

/// A single word correction.
#[derive(Debug, Serialize, Deserialize)]
pub struct WordCorrection {
    pub word: String,
    pub result: CorrectionResult,
}

/// Result structure for the correct command.
#[derive(Debug, Serialize, Deserialize)]
pub struct CorrectionResults {
    pub corrections: Vec<WordCorrection>,
}

/// Result structure for the filter command.
#[derive(Debug, Serialize, Deserialize)]
pub struct FilterReport {
    pub parameters: BloomParameters,
    pub expected_false_positive_probability: f64,
    pub count: Option<f64>,
    pub false_positive_probability_at_count: Option<f64>,
}

/// Result structure for the stats command.
#[derive(Debug, Serialize, Deserialize)]
pub struct StatsReport {
    pub stats: CheckerStats,
    pub top_words: Vec<(String, u32)>,
}

/// Output check results in the requested format.
pub fn output_check_results(
    results: &CheckResults,
    show_all: bool,
    args: &BloomspellArgs,
) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(results, args),
        OutputFormat::Human => {
            if results.degraded && args.verbosity() > 0 {
                println!("Warning: dictionary or corpus is empty; results are best effort");
                println!();
            }

            for line in &results.lines {
                println!("{}", line.text);
                for report in &line.tokens {
                    if !report.is_correct() {
                        println!("  Suggestions for {} are: {}", report.token, report.render());
                    } else if show_all {
                        println!("  {}: ok", report.token);
                    }
                }
            }

            if args.verbosity() > 1 {
                println!();
                println!(
                    "Checked {} tokens, {} misspelled",
                    results.tokens_checked, results.misspelled
                );
            }
            Ok(())
        }
    }
}

/// Output word corrections in the requested format.
pub fn output_corrections(results: &CorrectionResults, args: &BloomspellArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(results, args),
        OutputFormat::Human => {
            for correction in &results.corrections {
                match &correction.result {
                    CorrectionResult::AlreadyCorrect(_) => {
                        println!("{}: correct", correction.word)
                    }
                    result => println!("{}: {result}", correction.word),
                }
            }
            Ok(())
        }
    }
}

/// Output a filter report in the requested format.
pub fn output_filter_report(report: &FilterReport, args: &BloomspellArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human => {
            let params = &report.parameters;
            println!("Bloom Filter Parameters:");
            println!("════════════════════════");
            println!("Expected elements (n): {}", params.expected_elements());
            println!("Bits per element (c):  {:.4}", params.bits_per_element());
            println!("Hash rounds (k):       {}", params.hash_rounds());
            println!(
                "Bit array size (m):    {} ({})",
                params.num_bits(),
                format_bits(params.num_bits())
            );
            println!(
                "False positive rate at n: {:.6}",
                report.expected_false_positive_probability
            );
            if let (Some(count), Some(probability)) =
                (report.count, report.false_positive_probability_at_count)
            {
                println!("False positive rate at {count}: {probability:.6}");
            }
            Ok(())
        }
    }
}

/// Output statistics in the requested format.
pub fn output_stats(report: &StatsReport, args: &BloomspellArgs) -> Result<()> {
    match args.output_format {
        OutputFormat::Json => output_json(report, args),
        OutputFormat::Human => {
            let stats = &report.stats;
            println!("Dictionary Statistics:");
            println!("══════════════════════");
            println!("Backend: {:?}", stats.backend);
            println!("Entries: {}", stats.dictionary_entries);
            if let Some(params) = &stats.bloom {
                println!(
                    "Filter: m={} ({}), k={}, n={}",
                    params.num_bits(),
                    format_bits(params.num_bits()),
                    params.hash_rounds(),
                    params.expected_elements()
                );
            }
            if let Some(probability) = stats.false_positive_probability {
                println!("Current false positive rate: {probability:.6}");
            }

            println!();
            println!("Corpus Statistics:");
            println!("══════════════════");
            println!("Distinct words: {}", stats.corpus_words);
            println!("Total words: {}", stats.corpus_total);

            if !report.top_words.is_empty() {
                println!();
                println!("Most frequent words:");
                for (word, count) in &report.top_words {
                    println!("  {word} ({count})");
                }
            }

            if stats.degraded {
                println!();
                println!("Warning: dictionary or corpus is empty");
            }
            Ok(())
        }
    }
}

/// Output in JSON format.
fn output_json<T: Serialize>(result: &T, args: &BloomspellArgs) -> Result<()> {
    let json = if args.pretty {
        serde_json::to_string_pretty(result)?
    } else {
        serde_json::to_string(result)?
    };

    println!("{json}");
    Ok(())
}

/// Format a bit count as a human-readable byte size.
fn format_bits(bits: usize) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    let bytes = bits.div_ceil(8);
    let mut size = bytes as f64;
    let mut unit_index = 0;

    while size >= 1024.0 && unit_index < UNITS.len() - 1 {
        size /= 1024.0;
        unit_index += 1;
    }

    let unit = UNITS[unit_index];
    if unit_index == 0 {
        format!("{bytes} {unit}")
    } else {
        format!("{size:.1} {unit}")
    }
}
