//! Per-verse tokenization and entropy scoring.

use serde::{Deserialize, Serialize};

use ayatscope_entropy::entropy::token_entropy;
use ayatscope_entropy::tokenizer::{tokenize_chars, tokenize_words};
use ayatscope_entropy::EntropyScore;

use crate::corpus::{Corpus, Verse};

/// Granularity of the tokens fed to the entropy calculator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TokenLevel {
    #[default]
    Word,
    Char,
}

impl TokenLevel {
    pub fn tokenize(&self, text: &str) -> Vec<String> {
        match self {
            TokenLevel::Word => tokenize_words(text),
            TokenLevel::Char => tokenize_chars(text),
        }
    }
}

/// Entropy and length of a single verse.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VerseStat {
    pub group_id: u32,
    pub index_in_group: u32,
    pub token_count: usize,
    pub entropy: EntropyScore,
}

impl VerseStat {
    pub fn from_verse(verse: &Verse, level: TokenLevel) -> Self {
        let tokens = level.tokenize(&verse.text);
        Self {
            group_id: verse.group_id,
            index_in_group: verse.index_in_group,
            token_count: tokens.len(),
            entropy: token_entropy(&tokens),
        }
    }
}

/// Scores every verse of the corpus, preserving reading order.
pub fn score_verses(corpus: &Corpus, level: TokenLevel) -> Vec<VerseStat> {
    corpus
        .iter()
        .map(|verse| VerseStat::from_verse(verse, level))
        .collect()
}

/// Tokenizes every verse of the corpus, preserving reading order.
pub fn tokenize_corpus(corpus: &Corpus, level: TokenLevel) -> Vec<Vec<String>> {
    corpus.iter().map(|verse| level.tokenize(&verse.text)).collect()
}

/// `(group_id, entropy)` pairs, the aggregator's input.
pub fn entropy_pairs(stats: &[VerseStat]) -> impl Iterator<Item = (u32, EntropyScore)> + '_ {
    stats.iter().map(|s| (s.group_id, s.entropy))
}
