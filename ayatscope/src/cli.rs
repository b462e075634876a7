// ayatscope/src/cli.rs
//! This file defines the command-line interface (CLI) for the ayatscope application,
//! including all available commands and their arguments.
//! License: MIT OR Apache-2.0

use ayatscope_core::TokenLevel;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Top-level CLI definition.
#[derive(Parser, Debug)]
#[command(
    name = "ayatscope",
    author = "Relay",
    version = env!("CARGO_PKG_VERSION"),
    about = "Entropy and word-transition statistics for verse-segmented corpora",
    long_about = "ayatscope loads a verse-segmented corpus (surah|ayat|text lines or the converted CSV form), scores every verse by Shannon entropy, aggregates the scores per surah and per Makkiyah/Madaniyah category, tests whether the two categories differ, and builds an order-1 word-transition table over the whole corpus.",
    arg_required_else_help = true
)]
pub struct Cli {
    /// Disable informational messages
    #[arg(long, short = 'q', global = true, help = "Suppress all informational and debug messages.")]
    pub quiet: bool,

    /// Enable debug logging (overrides RUST_LOG)
    #[arg(long, short = 'd', global = true, conflicts_with = "quiet", help = "Enable debug logging.")]
    pub debug: bool,

    /// Path to an analysis configuration file (YAML).
    #[arg(long = "config", value_name = "FILE", global = true, env = "AYATSCOPE_CONFIG", help = "Path to an analysis configuration file (YAML).")]
    pub config: Option<PathBuf>,

    /// Path to a custom surah catalog (YAML).
    #[arg(long = "catalog", value_name = "FILE", global = true, help = "Use a custom surah catalog instead of the built-in one.")]
    pub catalog: Option<PathBuf>,

    /// Specify the path to a custom YAML theme file.
    #[arg(long = "theme", value_name = "FILE", global = true, help = "Specify the path to a custom YAML theme file.")]
    pub theme: Option<PathBuf>,

    /// The subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// All available commands for the `ayatscope` CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Converts a raw `surah|ayat|text` dump into the CSV corpus form.
    #[command(about = "Convert a raw 'surah|ayat|text' dump into CSV.")]
    Convert(ConvertCommand),

    /// Scores verses by Shannon entropy and averages them per surah.
    #[command(about = "Score verses by Shannon entropy and average them per surah.")]
    Entropy(EntropyCommand),

    /// Compares Makkiyah and Madaniyah verse entropies.
    #[command(about = "Compare Makkiyah and Madaniyah verse entropies with a t-test.")]
    Compare(CompareCommand),

    /// Queries the word-transition table.
    #[command(about = "Show the most likely words following a given word.")]
    Transitions(TransitionsCommand),

    /// Runs the full analysis and writes a JSON report.
    #[command(about = "Run the full analysis and write a JSON report.")]
    Report(ReportCommand),
}

/// Arguments for the `convert` command.
#[derive(Parser, Debug)]
pub struct ConvertCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Raw corpus file with one 'surah|ayat|text' line per verse.")]
    pub input_file: PathBuf,

    /// Write CSV to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,
}

/// Arguments for the `entropy` command.
#[derive(Parser, Debug)]
pub struct EntropyCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Corpus file (.csv, or raw 'surah|ayat|text' lines).")]
    pub input_file: PathBuf,

    /// Token granularity; overrides the configured level.
    #[arg(long, value_enum, help = "Tokenize into words or characters (overrides the config file).")]
    pub level: Option<LevelChoice>,

    #[arg(long, help = "List every verse instead of per-surah means.")]
    pub verses: bool,

    #[arg(long, help = "Print results as JSON to stdout.")]
    pub json: bool,
}

/// Arguments for the `compare` command.
#[derive(Parser, Debug)]
pub struct CompareCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Corpus file (.csv, or raw 'surah|ayat|text' lines).")]
    pub input_file: PathBuf,

    #[arg(long, value_enum, help = "Tokenize into words or characters (overrides the config file).")]
    pub level: Option<LevelChoice>,

    #[arg(long, help = "Use Welch's t-test instead of the pooled-variance test.")]
    pub welch: bool,

    #[arg(long, help = "Print results as JSON to stdout.")]
    pub json: bool,
}

/// Arguments for the `transitions` command.
#[derive(Parser, Debug)]
pub struct TransitionsCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Corpus file (.csv, or raw 'surah|ayat|text' lines).")]
    pub input_file: PathBuf,

    /// The predecessor word; normalized like corpus text.
    #[arg(long, short = 'w', value_name = "WORD", help = "Word whose successors are shown.")]
    pub word: String,

    #[arg(long, short = 'n', value_name = "N", value_parser = clap::value_parser!(u64).range(1..), help = "Show at most N successors (overrides the config file).")]
    pub top: Option<u64>,

    #[arg(long = "per-verse", help = "Do not count transitions across verse boundaries.")]
    pub per_verse: bool,

    #[arg(long, help = "Print results as JSON to stdout.")]
    pub json: bool,
}

/// Arguments for the `report` command.
#[derive(Parser, Debug)]
pub struct ReportCommand {
    #[arg(long, short = 'i', value_name = "FILE", help = "Corpus file (.csv, or raw 'surah|ayat|text' lines).")]
    pub input_file: PathBuf,

    /// Write the report to this file instead of stdout.
    #[arg(long, short = 'o', value_name = "FILE", help = "Write output to a specified file instead of stdout.")]
    pub output: Option<PathBuf>,
}

/// Token granularity accepted on the command line.
#[derive(Debug, Clone, Copy, ValueEnum, PartialEq, Eq)]
pub enum LevelChoice {
    /// Whitespace-separated words.
    Word,
    /// Individual characters, spaces removed.
    Char,
}

impl From<LevelChoice> for TokenLevel {
    fn from(choice: LevelChoice) -> Self {
        match choice {
            LevelChoice::Word => TokenLevel::Word,
            LevelChoice::Char => TokenLevel::Char,
        }
    }
}
