// ayatscope-entropy/src/entropy/mod.rs
extern crate alloc;
use alloc::collections::BTreeMap;
use libm::log2;

/// Calculates the Shannon entropy of a token sequence.
///
/// Returns the entropy in bits of the empirical token distribution. An empty
/// sequence has entropy `0.0`.
pub fn token_entropy<T: Ord>(tokens: &[T]) -> f64 {
    if tokens.is_empty() {
        return 0.0;
    }

    let mut frequencies: BTreeMap<&T, usize> = BTreeMap::new();
    for token in tokens {
        *frequencies.entry(token).or_insert(0) += 1;
    }

    let len = tokens.len() as f64;
    let mut entropy = 0.0;

    for &count in frequencies.values() {
        let p = count as f64 / len;
        entropy -= p * log2(p);
    }

    // A single distinct token gives -1.0 * log2(1.0) == -0.0.
    entropy.max(0.0)
}
