//! # Vocab Table
//!
//! Reconstructs the byte string of any merge-range id by transitive
//! expansion of the merge list, then packs every entry into a single dense
//! slab so lookups during decode are one index plus one slice, rather than
//! one allocation per id.

use crate::byte_remap::ByteRemap;
use crate::merges::MergeTable;
use crate::types::TokenId;

/// The `id -> bytes` table derived from a [`MergeTable`], covering ids
/// `0..next_free_id` (bytes and merges; special-token ids live outside this
/// table, see [`crate::special::SpecialTable`]).
#[derive(Debug, Clone)]
pub struct Vocab {
    index: Vec<(usize, usize)>,
    slab: Vec<u8>,
}

impl Vocab {
    /// Build the vocab table by walking the merge list in order:
    /// `vocab[256+i] = vocab[left_i] ++ vocab[right_i]`.
    ///
    /// Byte entries `0..256` are the single byte, passed through the
    /// *inverse* permutation if `remap` is given, so that `vocab[b]` is
    /// always the raw byte a caller should see on decode.
    pub fn build(
        merges: &MergeTable,
        remap: Option<&ByteRemap>,
    ) -> Self {
        let total = merges.next_free_id() as usize;
        let mut index = vec![(0usize, 0usize); total];
        let mut slab = Vec::new();

        for b in 0..256usize {
            let raw = match remap {
                Some(r) => r.inverse(b as u8),
                None => b as u8,
            };
            let start = slab.len();
            slab.push(raw);
            index[b] = (start, slab.len());
        }

        for (i, &(left, right)) in merges.merges().iter().enumerate() {
            let id = 256 + i;
            let left_span = index[left as usize];
            let right_span = index[right as usize];
            let start = slab.len();
            // left/right were already written (acyclicity: both < id), but
            // the slab may have grown since; copy out before extending.
            let left_bytes = slab[left_span.0..left_span.1].to_vec();
            let right_bytes = slab[right_span.0..right_span.1].to_vec();
            slab.extend_from_slice(&left_bytes);
            slab.extend_from_slice(&right_bytes);
            index[id] = (start, slab.len());
        }

        Self { index, slab }
    }

    /// The byte string for `id`, if it is within the byte or merge range.
    pub fn get(
        &self,
        id: TokenId,
    ) -> Option<&[u8]> {
        let idx = id as usize;
        let (start, end) = *self.index.get(idx)?;
        Some(&self.slab[start..end])
    }

    /// The first id this table does not cover (`256 + merges_len`).
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Is this table empty? Never true in practice: the byte range always
    /// populates 256 entries.
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_byte_entries() {
        let merges = MergeTable::new(vec![]);
        let vocab = Vocab::build(&merges, None);
        assert_eq!(vocab.get(b'a' as TokenId), Some(&b"a"[..]));
        assert_eq!(vocab.len(), 256);
    }

    #[test]
    fn test_merge_expansion() {
        let merges = MergeTable::new(vec![(97, 98), (256, 99)]);
        let vocab = Vocab::build(&merges, None);
        assert_eq!(vocab.get(256), Some(&b"ab"[..]));
        assert_eq!(vocab.get(257), Some(&b"abc"[..]));
    }

    #[test]
    fn test_out_of_range_is_none() {
        let merges = MergeTable::new(vec![(97, 98)]);
        let vocab = Vocab::build(&merges, None);
        assert_eq!(vocab.get(500), None);
    }

    #[test]
    fn test_byte_entries_reflect_inverse_remap() {
        let mut perm = [0u8; 256];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = i as u8;
        }
        perm.swap(b'a' as usize, b'z' as usize);
        let remap = ByteRemap::from_permutation(perm).unwrap();

        let merges = MergeTable::new(vec![]);
        let vocab = Vocab::build(&merges, Some(&remap));
        // id 'a' (97) in permuted-byte-id space should decode to raw 'z'.
        assert_eq!(vocab.get(b'a' as TokenId), Some(&b"z"[..]));
    }
}
