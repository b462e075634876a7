// ayatscope-entropy/src/lib.rs
#![no_std]

extern crate alloc;

#[cfg(feature = "std")]
extern crate std;

pub mod entropy;
pub mod statistics;
pub mod tokenizer;

/// Common type definitions
pub type EntropyScore = f64;
