//! # Training
//!
//! The incremental BPE trainer and the data structures it is built from: a
//! doubly-linked token sequence per corpus segment, and a pair-frequency
//! index with a lazily-validated priority heap.

mod pair_index;
mod token_sequence;
mod trainer;

pub use pair_index::{Handle, PairIndex};
pub use token_sequence::TokenSequence;
pub use trainer::{BpeTrainer, MergeStep};
