//! Order-1 word-transition model.
//!
//! Tokens are interned to dense [`TokenId`]s so the counting loop hashes
//! small integers instead of strings. Counting happens in
//! [`TransitionCounts`], a mergeable accumulator; [`TransitionCounts::normalize`]
//! turns it into an immutable [`TransitionTable`] of conditional probabilities.
//!
//! By default the whole corpus is one continuous stream: the last token of a
//! verse transitions into the first token of the next verse. This matches the
//! reference statistics and is kept deliberately; [`StreamMode::PerVerse`]
//! is the boundary-respecting alternative.
//!
//! License: MIT OR Apache-2.0

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};

/// Dense index of an interned token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TokenId(u32);

impl TokenId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// Arena of token strings with a reverse lookup.
#[derive(Debug, Clone, Default)]
pub struct TokenInterner {
    tokens: Vec<String>,
    ids: HashMap<String, TokenId>,
}

impl TokenInterner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the id of `token`, allocating one on first sight.
    pub fn intern(&mut self, token: &str) -> TokenId {
        if let Some(&id) = self.ids.get(token) {
            return id;
        }
        let id = TokenId(self.tokens.len() as u32);
        self.tokens.push(token.to_string());
        self.ids.insert(token.to_string(), id);
        id
    }

    pub fn get(&self, token: &str) -> Option<TokenId> {
        self.ids.get(token).copied()
    }

    /// # Panics
    ///
    /// Panics if `id` was not produced by this interner.
    pub fn resolve(&self, id: TokenId) -> &str {
        &self.tokens[id.index()]
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}

/// How verse boundaries are treated when building the stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StreamMode {
    /// All verses form one stream; cross-verse pairs are counted.
    #[default]
    Continuous,
    /// Each verse is its own stream; no pair spans two verses.
    PerVerse,
}

/// Raw bigram counts, keyed by predecessor id.
#[derive(Debug, Clone, Default)]
pub struct TransitionCounts {
    interner: TokenInterner,
    /// `rows[pred]` maps successor id to count.
    rows: Vec<HashMap<TokenId, u64>>,
    last: Option<TokenId>,
    total: u64,
}

impl TransitionCounts {
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, token: &str) -> TokenId {
        let id = self.interner.intern(token);
        if self.rows.len() <= id.index() {
            self.rows.resize_with(id.index() + 1, HashMap::new);
        }
        id
    }

    fn add(&mut self, pred: TokenId, succ: TokenId, count: u64) {
        *self.rows[pred.index()].entry(succ).or_insert(0) += count;
        self.total += count;
    }

    /// Appends one token to the current stream, counting the pair it closes.
    pub fn observe(&mut self, token: &str) {
        let id = self.intern(token);
        if let Some(prev) = self.last {
            self.add(prev, id, 1);
        }
        self.last = Some(id);
    }

    /// Appends every token of `tokens` to the current stream.
    pub fn observe_stream<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for token in tokens {
            self.observe(token.as_ref());
        }
    }

    /// Ends the current stream; the next token starts a new one.
    pub fn break_stream(&mut self) {
        self.last = None;
    }

    /// Feeds tokenized verses in order, honouring `mode` at verse boundaries.
    pub fn observe_sequences<S: AsRef<str>>(&mut self, sequences: &[Vec<S>], mode: StreamMode) {
        for sequence in sequences {
            if mode == StreamMode::PerVerse {
                self.break_stream();
            }
            self.observe_stream(sequence);
        }
    }

    /// Adds another accumulator's counts into this one.
    ///
    /// Counts are commutative, so partial tables built over disjoint chunks
    /// can be reduced in any order. The pair spanning two chunks is not
    /// part of either partial table. Merging ends the current stream.
    pub fn merge(&mut self, other: TransitionCounts) {
        for (pred_idx, row) in other.rows.into_iter().enumerate() {
            if row.is_empty() {
                continue;
            }
            let pred = self.intern(other.interner.resolve(TokenId(pred_idx as u32)));
            for (succ, count) in row {
                let succ = self.intern(other.interner.resolve(succ));
                self.add(pred, succ, count);
            }
        }
        self.last = None;
    }

    /// Total number of counted pairs.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Raw count of the pair `pred -> succ`.
    pub fn count(&self, pred: &str, succ: &str) -> u64 {
        match (self.interner.get(pred), self.interner.get(succ)) {
            (Some(p), Some(s)) => self.rows[p.index()].get(&s).copied().unwrap_or(0),
            _ => 0,
        }
    }

    /// Divides every row by its total, producing conditional probabilities.
    pub fn normalize(self) -> TransitionTable {
        let TransitionCounts {
            interner, rows, total, ..
        } = self;

        let mut bigrams = 0usize;
        let rows: Vec<Vec<(TokenId, f64)>> = rows
            .into_iter()
            .map(|row| {
                let row_total: u64 = row.values().sum();
                bigrams += row.len();
                let mut probs: Vec<(TokenId, f64)> = row
                    .into_iter()
                    .map(|(succ, count)| (succ, count as f64 / row_total as f64))
                    .collect();
                probs.sort_by(|a, b| {
                    b.1.total_cmp(&a.1)
                        .then_with(|| interner.resolve(a.0).cmp(interner.resolve(b.0)))
                });
                probs
            })
            .collect();

        debug!(
            "Normalized transition table: {} tokens, {} distinct bigrams, {} transitions.",
            interner.len(),
            bigrams,
            total
        );

        TransitionTable {
            interner,
            rows,
            bigram_count: bigrams,
            transition_count: total,
        }
    }
}

/// Immutable order-1 transition probabilities.
#[derive(Debug, Clone, Default)]
pub struct TransitionTable {
    interner: TokenInterner,
    /// `rows[pred]`: successors sorted by descending probability, then token.
    rows: Vec<Vec<(TokenId, f64)>>,
    bigram_count: usize,
    transition_count: u64,
}

impl TransitionTable {
    /// Builds a table from a single continuous token stream.
    pub fn build<I, S>(stream: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut counts = TransitionCounts::new();
        counts.observe_stream(stream);
        counts.normalize()
    }

    /// Builds a table from tokenized verses in reading order.
    pub fn from_sequences<S: AsRef<str>>(sequences: &[Vec<S>], mode: StreamMode) -> Self {
        let mut counts = TransitionCounts::new();
        counts.observe_sequences(sequences, mode);
        counts.normalize()
    }

    fn row(&self, token: &str) -> &[(TokenId, f64)] {
        self.interner
            .get(token)
            .map(|id| self.rows[id.index()].as_slice())
            .unwrap_or(&[])
    }

    /// Successor distribution of `token`; empty when `token` never precedes anything.
    pub fn successors(&self, token: &str) -> SuccessorDistribution<'_> {
        SuccessorDistribution {
            entries: self
                .row(token)
                .iter()
                .map(|&(succ, p)| (self.interner.resolve(succ), p))
                .collect(),
        }
    }

    /// `P(succ | pred)`, or 0.0 for an unseen pair.
    pub fn probability(&self, pred: &str, succ: &str) -> f64 {
        let Some(succ_id) = self.interner.get(succ) else {
            return 0.0;
        };
        self.row(pred)
            .iter()
            .find(|(id, _)| *id == succ_id)
            .map_or(0.0, |&(_, p)| p)
    }

    /// The most probable successor of `pred`; ties resolve to the smaller token.
    pub fn most_likely(&self, pred: &str) -> Option<(&str, f64)> {
        self.row(pred)
            .first()
            .map(|&(succ, p)| (self.interner.resolve(succ), p))
    }

    /// Tokens with at least one outgoing transition, in first-seen order.
    pub fn predecessors(&self) -> impl Iterator<Item = &str> + '_ {
        self.rows
            .iter()
            .enumerate()
            .filter(|(_, row)| !row.is_empty())
            .map(|(idx, _)| self.interner.tokens[idx].as_str())
    }

    /// Number of distinct tokens seen in the stream.
    pub fn vocabulary_size(&self) -> usize {
        self.interner.len()
    }

    pub fn predecessor_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_empty()).count()
    }

    /// Number of distinct `(pred, succ)` pairs.
    pub fn bigram_count(&self) -> usize {
        self.bigram_count
    }

    /// Number of counted pairs, including repeats.
    pub fn transition_count(&self) -> u64 {
        self.transition_count
    }
}

/// Successors of one token with their conditional probabilities.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SuccessorDistribution<'a> {
    entries: Vec<(&'a str, f64)>,
}

impl<'a> SuccessorDistribution<'a> {
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn get(&self, token: &str) -> Option<f64> {
        self.entries.iter().find(|(t, _)| *t == token).map(|&(_, p)| p)
    }

    /// Entries sorted by descending probability.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, f64)> + '_ {
        self.entries.iter().copied()
    }

    /// The `n` most probable successors.
    pub fn top(&self, n: usize) -> &[(&'a str, f64)] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn total_probability(&self) -> f64 {
        self.entries.iter().map(|(_, p)| p).sum()
    }

    pub fn to_map(&self) -> BTreeMap<&'a str, f64> {
        self.entries.iter().copied().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(s: &str) -> Vec<String> {
        s.split_whitespace().map(str::to_string).collect()
    }

    #[test]
    fn test_interner_is_stable() {
        let mut interner = TokenInterner::new();
        let a = interner.intern("allah");
        let b = interner.intern("maha");
        assert_eq!(interner.intern("allah"), a);
        assert_ne!(a, b);
        assert_eq!(interner.resolve(b), "maha");
        assert_eq!(interner.len(), 2);
        assert!(interner.get("besar").is_none());
    }

    #[test]
    fn test_cross_verse_stream() {
        let table = TransitionTable::build(words("dia dia dia allah maha besar"));
        let dia = table.successors("dia");
        assert_eq!(dia.len(), 2);
        assert!((dia.get("dia").unwrap() - 2.0 / 3.0).abs() < 1e-12);
        assert!((dia.get("allah").unwrap() - 1.0 / 3.0).abs() < 1e-12);
        assert_eq!(table.most_likely("dia"), Some(("dia", 2.0 / 3.0)));
        assert!(table.successors("besar").is_empty());
        assert_eq!(table.vocabulary_size(), 4);
        assert_eq!(table.transition_count(), 5);
        assert_eq!(table.bigram_count(), 4);
    }

    #[test]
    fn test_unseen_predecessor_is_empty() {
        let table = TransitionTable::build(words("a b c"));
        assert!(table.successors("zzz").is_empty());
        assert_eq!(table.probability("zzz", "a"), 0.0);
        assert_eq!(table.probability("a", "c"), 0.0);
        assert_eq!(table.most_likely("c"), None);

        let empty = TransitionTable::build(Vec::<String>::new());
        assert!(empty.successors("a").is_empty());
        assert_eq!(empty.vocabulary_size(), 0);
    }

    #[test]
    fn test_rows_sum_to_one() {
        let text = "dan apabila mereka berjumpa dengan orang yang beriman mereka berkata kami telah beriman \
                    dan bila mereka kembali kepada setan setan mereka mereka mengatakan sesungguhnya kami sependirian dengan kamu";
        let table = TransitionTable::build(words(text));
        assert!(table.predecessor_count() > 0);
        for pred in table.predecessors() {
            let dist = table.successors(pred);
            assert!((dist.total_probability() - 1.0).abs() < 1e-9, "row {pred} does not sum to 1");
            assert!(dist.iter().all(|(_, p)| p > 0.0 && p <= 1.0));
        }
    }

    #[test]
    fn test_per_verse_mode_drops_boundary_pairs() {
        let verses = vec![words("dia dia dia"), words("allah maha besar")];
        let continuous = TransitionTable::from_sequences(&verses, StreamMode::Continuous);
        let per_verse = TransitionTable::from_sequences(&verses, StreamMode::PerVerse);

        assert!(continuous.probability("dia", "allah") > 0.0);
        assert_eq!(per_verse.probability("dia", "allah"), 0.0);
        assert_eq!(per_verse.successors("dia").to_map(), BTreeMap::from([("dia", 1.0)]));
        assert_eq!(per_verse.transition_count(), 4);
    }

    #[test]
    fn test_merge_equals_single_pass_within_chunks() {
        let mut left = TransitionCounts::new();
        left.observe_stream(words("a b a"));
        let mut right = TransitionCounts::new();
        right.observe_stream(words("b a c"));

        let mut merged = TransitionCounts::new();
        merged.merge(right.clone());
        merged.merge(left.clone());

        let mut reference = TransitionCounts::new();
        reference.observe_stream(words("a b a"));
        reference.break_stream();
        reference.observe_stream(words("b a c"));

        assert_eq!(merged.total(), reference.total());
        for (p, s) in [("a", "b"), ("b", "a"), ("a", "c")] {
            assert_eq!(merged.count(p, s), reference.count(p, s), "{p}->{s}");
        }
        let table = merged.normalize();
        assert!((table.probability("a", "b") - 0.5).abs() < 1e-12);
        assert!((table.probability("a", "c") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_merge_into_table_with_different_token_order() {
        let mut left = TransitionCounts::new();
        left.observe_stream(words("c b c"));
        let mut right = TransitionCounts::new();
        right.observe_stream(words("a b a c"));

        left.merge(right);

        assert_eq!(left.total(), 5);
        assert_eq!(left.count("c", "b"), 1);
        assert_eq!(left.count("b", "c"), 1);
        assert_eq!(left.count("a", "b"), 1);
        assert_eq!(left.count("b", "a"), 1);
        assert_eq!(left.count("a", "c"), 1);
        assert_eq!(left.count("a", "a"), 0);

        let table = left.normalize();
        assert_eq!(table.vocabulary_size(), 3);
        assert!((table.probability("b", "a") - 0.5).abs() < 1e-12);
        assert!((table.probability("b", "c") - 0.5).abs() < 1e-12);
        assert!((table.probability("a", "c") - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_successor_ordering_and_top() {
        let table = TransitionTable::build(words("x b x a x a x c"));
        let dist = table.successors("x");
        let order: Vec<&str> = dist.iter().map(|(t, _)| t).collect();
        assert_eq!(order, vec!["a", "b", "c"]);
        assert_eq!(dist.top(1).len(), 1);
        assert_eq!(dist.top(10).len(), 3);
    }
}
