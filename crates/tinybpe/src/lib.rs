#![warn(missing_docs, unused)]
//! # `tinybpe`
//!
//! A byte-pair-encoding tokenizer library: learns a merge vocabulary from a
//! corpus, encodes text to token ids using that vocabulary, decodes ids
//! back to bytes, and supports streaming decode where partial multi-byte
//! characters are buffered across ids.
//!
//! ## Client Summary
//!
//! * [`training::BpeTrainer`] — drives iterative merge selection over a
//!   corpus of byte segments.
//! * [`TokenizerBuilder`] / [`Tokenizer`] — wires a learned merge list,
//!   vocab, optional byte remap, and special tokens into one
//!   `encode`/`decode` API.
//! * [`StreamDecoder`] — incremental UTF-8-safe decode, one id at a time.
//! * [`ByteRemap`] — the optional 0..255 byte permutation used to
//!   reproduce external (e.g. GPT-4-style) vocabularies.
//! * [`TextSpanner`] — regex-backed pre-tokenization chunking, so merges
//!   never cross word boundaries.
//!
//! ## Training a Model
//!
//! ```rust
//! use tinybpe::training::BpeTrainer;
//!
//! let corpus = vec![b"Hello TinyBPE".to_vec(), b"1234567890".to_vec()];
//! let mut trainer = BpeTrainer::new(corpus);
//! while trainer.merges_size() < 8 {
//!     if trainer.step().is_none() {
//!         break;
//!     }
//! }
//! ```
//!
//! ## Building and Using a Tokenizer
//!
//! ```rust
//! use tinybpe::TokenizerBuilder;
//!
//! let merges = vec![(104u32, 101u32), (256, 108)];
//! let tokenizer = TokenizerBuilder::new(merges).build().unwrap();
//! let ids = tokenizer.encode("hell").unwrap();
//! assert_eq!(tokenizer.decode(&ids).unwrap(), b"hell");
//! ```

pub mod byte_remap;
pub mod encoder;
pub mod errors;
pub mod io;
pub mod merges;
pub mod special;
pub mod spanner;
pub mod stream_decoder;
pub mod tokenizer;
pub mod training;
pub mod types;
pub mod vocab;

pub use byte_remap::ByteRemap;
pub use errors::{TBResult, TinyBpeError};
pub use merges::MergeTable;
pub use special::{Segment, SpecialTable};
pub use spanner::TextSpanner;
pub use stream_decoder::StreamDecoder;
pub use tokenizer::{Tokenizer, TokenizerBuilder};
pub use types::{Pair, TokenId, BYTE_RANGE};
pub use vocab::Vocab;
