//! errors.rs - Custom error types for the ayatscope-core library.
//!
//! License: MIT OR Apache-2.0

use std::path::PathBuf;
use thiserror::Error;

/// All error types produced by the `ayatscope-core` library.
///
/// Marked `#[non_exhaustive]` so new variants can be added without breaking
/// downstream matches.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisError {
    #[error("Failed to read corpus file {path}: {source}")]
    CorpusRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse CSV corpus: {0}")]
    Csv(#[from] csv::Error),

    #[error("Corpus contains no verses")]
    EmptyCorpus,

    #[error("Group {0} has no entry in the surah catalog")]
    UnknownGroup(u32),

    #[error("Invalid surah catalog: {0}")]
    InvalidCatalog(String),

    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_yml::Error),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),
}
