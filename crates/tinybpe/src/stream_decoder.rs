//! # Streaming Decoder
//!
//! Emits UTF-8-safe text incrementally as ids arrive, buffering the
//! trailing bytes of any code point that hasn't fully arrived yet.
//!
//! UTF-8 boundary detection works directly on raw bytes: the byte buffer is
//! never decoded to a string until a complete prefix is known, so there is
//! no intermediate invalid-`str` state to worry about.

use std::sync::Arc;

use crate::errors::{TBResult, TinyBpeError};
use crate::special::SpecialTable;
use crate::types::TokenId;
use crate::vocab::Vocab;

/// Incremental UTF-8-safe decoder. Stateful and per-instance: not safe to
/// share across threads, unlike the read-only vocab and special table it
/// holds.
pub struct StreamDecoder {
    vocab: Arc<Vocab>,
    special: Arc<SpecialTable>,
    buf: Vec<u8>,
}

impl StreamDecoder {
    /// Build a streaming decoder over shared, read-only vocab state.
    pub fn new(
        vocab: Arc<Vocab>,
        special: Arc<SpecialTable>,
    ) -> Self {
        Self {
            vocab,
            special,
            buf: Vec::new(),
        }
    }

    /// Feed one id. Returns the longest newly-complete prefix of text, if
    /// any bytes became available to emit, or `None` if nothing is ready
    /// to emit yet.
    pub fn feed(
        &mut self,
        id: TokenId,
    ) -> TBResult<Option<String>> {
        let bytes = self
            .vocab
            .get(id)
            .or_else(|| self.special.bytes_of(id))
            .ok_or(TinyBpeError::UnknownId(id))?;
        self.buf.extend_from_slice(bytes);

        match std::str::from_utf8(&self.buf) {
            Ok(s) => {
                if s.is_empty() {
                    return Ok(None);
                }
                let out = s.to_string();
                self.buf.clear();
                Ok(Some(out))
            }
            Err(e) => {
                let valid_up_to = e.valid_up_to();
                if valid_up_to == 0 {
                    return Ok(None);
                }
                let out = String::from_utf8(self.buf[..valid_up_to].to_vec())
                    .expect("prefix validated by str::from_utf8");
                self.buf.drain(..valid_up_to);
                Ok(Some(out))
            }
        }
    }

    /// Clear any buffered partial bytes.
    pub fn clear(&mut self) {
        self.buf.clear();
    }

    /// Is there buffered, not-yet-emitted output?
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}
