//! Terminal presentation: colour theme and output formatting.

pub mod output_format;
pub mod theme;
