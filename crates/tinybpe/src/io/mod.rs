//! # File I/O
//!
//! Line-oriented readers/writers for the three on-disk formats: the
//! `.tinybpe`/`.tinymodel` merge list, the `.remaps`/`.map` byte
//! permutation, and the write-only `.vocab` human-readable dump.

pub mod model_file;
pub mod remap_file;
pub mod vocab_file;
