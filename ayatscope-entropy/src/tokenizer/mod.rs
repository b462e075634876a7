// ayatscope-entropy/src/tokenizer/mod.rs
//! Verse normalization and tokenization.
//!
//! Both tokenizers share one normalization step: the text is lowercased and
//! every character that is neither alphanumeric nor whitespace is dropped.

extern crate alloc;
use alloc::string::{String, ToString};
use alloc::vec::Vec;

/// Lowercases `text` and strips everything that is not alphanumeric or whitespace.
pub fn normalize(text: &str) -> String {
    text.to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace())
        .collect()
}

/// Splits a verse into normalized word tokens.
///
/// Empty and punctuation-only input yield an empty sequence.
pub fn tokenize_words(text: &str) -> Vec<String> {
    normalize(text)
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

/// Splits a verse into single-character tokens.
///
/// Only the space character is removed after normalization; other whitespace
/// (tabs, newlines) survives as a token.
pub fn tokenize_chars(text: &str) -> Vec<String> {
    normalize(text)
        .chars()
        .filter(|&c| c != ' ')
        .map(|c| c.to_string())
        .collect()
}
