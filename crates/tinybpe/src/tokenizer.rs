//! # Combined Tokenizer
//!
//! Wires the merge table, vocab, optional byte remap, special tokens, and
//! optional pre-tokenization spanner together behind one `encode`/`decode`
//! API. Immutable once built: the merge list and derived vocab are the
//! sole durable artifacts, shared read-only via `Arc` so a tokenizer can be
//! used from multiple threads at once (its `stream_decoder()` instances,
//! being stateful, cannot).

use std::sync::Arc;

use crate::byte_remap::ByteRemap;
use crate::encoder::encode_segment;
use crate::errors::{TBResult, TinyBpeError};
use crate::merges::MergeTable;
use crate::special::{Segment, SpecialTable};
use crate::spanner::TextSpanner;
use crate::stream_decoder::StreamDecoder;
use crate::types::{Pair, TokenId};
use crate::vocab::Vocab;

/// Builder for [`Tokenizer`].
pub struct TokenizerBuilder {
    merges: Vec<Pair>,
    remap: Option<ByteRemap>,
    special_entries: Vec<(Vec<u8>, TokenId)>,
    spanner_pattern: Option<String>,
}

impl TokenizerBuilder {
    /// Start a builder from a learned merge list.
    pub fn new(merges: Vec<Pair>) -> Self {
        Self {
            merges,
            remap: None,
            special_entries: Vec::new(),
            spanner_pattern: None,
        }
    }

    /// Configure a byte permutation.
    pub fn with_byte_remap(
        mut self,
        remap: ByteRemap,
    ) -> Self {
        self.remap = Some(remap);
        self
    }

    /// Reserve `id` for the literal string `text`.
    pub fn with_special(
        mut self,
        text: impl AsRef<[u8]>,
        id: TokenId,
    ) -> Self {
        self.special_entries.push((text.as_ref().to_vec(), id));
        self
    }

    /// Configure the pre-tokenization word-boundary pattern (see
    /// [`crate::spanner`] for ready-made constants). Without one, `encode`
    /// treats each non-special span of input as a single segment.
    pub fn with_spanner_pattern(
        mut self,
        pattern: impl Into<String>,
    ) -> Self {
        self.spanner_pattern = Some(pattern.into());
        self
    }

    /// Build the tokenizer.
    pub fn build(self) -> TBResult<Tokenizer> {
        let merge_table = MergeTable::new(self.merges);
        let vocab = Vocab::build(&merge_table, self.remap.as_ref());
        let special = SpecialTable::new(self.special_entries, merge_table.next_free_id())?;
        let spanner = self
            .spanner_pattern
            .map(|p| TextSpanner::from_pattern(&p))
            .transpose()?;

        Ok(Tokenizer {
            merges: Arc::new(merge_table),
            vocab: Arc::new(vocab),
            remap: self.remap.map(Arc::new),
            special: Arc::new(special),
            spanner: spanner.map(Arc::new),
        })
    }
}

/// A complete, immutable tokenizer: merge table, vocab, optional byte
/// remap, special tokens, and optional pre-tokenization spanner.
#[derive(Clone)]
pub struct Tokenizer {
    merges: Arc<MergeTable>,
    vocab: Arc<Vocab>,
    remap: Option<Arc<ByteRemap>>,
    special: Arc<SpecialTable>,
    spanner: Option<Arc<TextSpanner>>,
}

impl Tokenizer {
    /// The underlying merge table.
    pub fn merges(&self) -> &MergeTable {
        &self.merges
    }

    /// The underlying vocab table.
    pub fn vocab(&self) -> &Vocab {
        &self.vocab
    }

    /// The registered special tokens.
    pub fn special(&self) -> &SpecialTable {
        &self.special
    }

    /// Encode `text` to token ids: split around special tokens, split each
    /// remaining span along the configured pre-tokenization pattern (if
    /// any), and greedily merge each resulting segment.
    pub fn encode(
        &self,
        text: &str,
    ) -> TBResult<Vec<TokenId>> {
        let mut ids = Vec::new();
        for segment in self.special.split(text.as_bytes()) {
            match segment {
                Segment::Special(id) => ids.push(id),
                Segment::Plain(bytes) => {
                    self.encode_plain_span(bytes, &mut ids)?;
                }
            }
        }
        Ok(ids)
    }

    fn encode_plain_span(
        &self,
        bytes: &[u8],
        ids: &mut Vec<TokenId>,
    ) -> TBResult<()> {
        let Some(spanner) = &self.spanner else {
            ids.extend(encode_segment(bytes, &self.merges, self.remap.as_deref()));
            return Ok(());
        };

        let text = std::str::from_utf8(bytes).map_err(|e| {
            TinyBpeError::InvalidModelFile(format!(
                "plain span is not valid UTF-8 at byte {}",
                e.valid_up_to()
            ))
        })?;
        for chunk in spanner.split(text)? {
            ids.extend(encode_segment(chunk, &self.merges, self.remap.as_deref()));
        }
        Ok(())
    }

    /// Decode ids back to raw bytes. Invalid UTF-8 in the result is not an
    /// error here; only an unknown id is.
    pub fn decode(
        &self,
        ids: &[TokenId],
    ) -> TBResult<Vec<u8>> {
        let mut out = Vec::new();
        for &id in ids {
            let bytes = self
                .vocab
                .get(id)
                .or_else(|| self.special.bytes_of(id))
                .ok_or(TinyBpeError::UnknownId(id))?;
            out.extend_from_slice(bytes);
        }
        Ok(out)
    }

    /// A fresh, independent streaming decoder over this tokenizer's
    /// read-only vocab and special-token state.
    pub fn stream_decoder(&self) -> StreamDecoder {
        StreamDecoder::new(self.vocab.clone(), self.special.clone())
    }
}
