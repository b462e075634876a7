// ayatscope-core/src/lib.rs
//! # ayatscope Core Library
//!
//! `ayatscope-core` provides the platform-independent logic for exploring the
//! statistics of a verse-segmented text corpus: per-verse Shannon entropy,
//! per-surah and per-category aggregation, a Makkiyah/Madaniyah significance
//! test, and an order-1 word-transition model.
//!
//! The library is pure: every stage consumes the previous stage's output and
//! returns a new immutable value. Nothing is persisted.
//!
//! ## Modules
//!
//! * `corpus`: Loads verses from the raw `surah|ayat|text` dump or the CSV form.
//! * `catalog`: Surah names and Makkiyah/Madaniyah classification.
//! * `analysis`: Tokenization and per-verse entropy scoring.
//! * `aggregate`: Group and category means, plus the category comparison.
//! * `significance`: Student and Welch two-sample t-tests.
//! * `transition`: Token interning and the order-1 transition table.
//! * `config`: YAML analysis configuration.
//! * `report`: One-shot pipeline run producing a serializable report.
//! * `errors`: The library error type.
//!
//! ## Usage Example
//!
//! ```rust
//! use ayatscope_core::{AnalysisConfig, Corpus, SurahCatalog, Verse, run_analysis};
//!
//! let corpus = Corpus::from_verses(vec![
//!     Verse::new(1, 1, "Dia Dia Dia"),
//!     Verse::new(1, 2, "Allah Maha Besar"),
//! ]);
//! let report = run_analysis(&corpus, SurahCatalog::default_catalog(), &AnalysisConfig::default())?;
//! assert_eq!(report.groups.len(), 1);
//! # Ok::<(), ayatscope_core::AnalysisError>(())
//! ```
//!
//! ---
//! License: MIT OR Apache-2.0

pub mod aggregate;
pub mod analysis;
pub mod catalog;
pub mod config;
pub mod corpus;
pub mod errors;
pub mod report;
pub mod significance;
pub mod transition;

/// Re-exports the corpus types.
pub use corpus::{Corpus, CorpusFormat, LoadSummary, Verse};

/// Re-exports the surah catalog and the classifier seam used by aggregation.
pub use catalog::{Category, GroupClassifier, SurahCatalog, SURAH_COUNT};

/// Re-exports per-verse scoring.
pub use analysis::{score_verses, tokenize_corpus, TokenLevel, VerseStat};

/// Re-exports the aggregation stage.
pub use aggregate::{
    aggregate_by_category, aggregate_by_group, compare_categories, CategoryBreakdown,
    CategoryComparison, CategoryStat, GroupStat, SignificanceTest,
};

/// Re-exports the two-sample t-test.
pub use significance::{independent_t_test, TTestKind, TTestResult};

/// Re-exports the transition model.
pub use transition::{
    StreamMode, SuccessorDistribution, TokenId, TokenInterner, TransitionCounts, TransitionTable,
};

/// Re-exports configuration types.
pub use config::{AnalysisConfig, ComparisonConfig, TransitionConfig};

/// Re-exports the one-shot pipeline.
pub use report::{analyze, run_analysis, Analysis, AnalysisReport};

/// Re-exports the custom error type for clear error reporting.
pub use errors::AnalysisError;
