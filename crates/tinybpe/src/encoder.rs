//! # Encoder
//!
//! Applies a [`MergeTable`] to a single pre-chunked byte segment by
//! repeatedly finding the lowest-rank adjacent pair and merging every
//! non-overlapping occurrence of it in one pass.

use crate::byte_remap::ByteRemap;
use crate::merges::MergeTable;
use crate::types::TokenId;

/// Encode one byte segment into token ids, greedily applying the lowest-rank
/// merge available at each pass.
///
/// `remap`, if given, is applied to every input byte before merging begins.
pub fn encode_segment(
    segment: &[u8],
    merges: &MergeTable,
    remap: Option<&ByteRemap>,
) -> Vec<TokenId> {
    let mut ids: Vec<TokenId> = segment
        .iter()
        .map(|&b| match remap {
            Some(r) => r.forward(b) as TokenId,
            None => b as TokenId,
        })
        .collect();

    if ids.len() < 2 {
        return ids;
    }

    loop {
        let mut best_rank: Option<u32> = None;
        let mut best_pair_idx: Option<usize> = None;
        for i in 0..ids.len() - 1 {
            if let Some(rank) = merges.rank((ids[i], ids[i + 1])) {
                let improves = match best_rank {
                    Some(b) => rank < b,
                    None => true,
                };
                if improves {
                    best_rank = Some(rank);
                    best_pair_idx = Some(i);
                }
            }
        }

        let Some(first_idx) = best_pair_idx else {
            break;
        };
        let pair = (ids[first_idx], ids[first_idx + 1]);
        let new_id = merges.id_of(pair).expect("rank implies id_of");

        let mut merged = Vec::with_capacity(ids.len());
        let mut i = 0;
        while i < ids.len() {
            if i + 1 < ids.len() && (ids[i], ids[i + 1]) == pair {
                merged.push(new_id);
                i += 2;
            } else {
                merged.push(ids[i]);
                i += 1;
            }
        }
        ids = merged;

        if ids.len() < 2 {
            break;
        }
    }

    ids
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_no_merges() {
        let merges = MergeTable::new(vec![]);
        assert_eq!(encode_segment(b"ab", &merges, None), vec![97, 98]);
    }

    #[test]
    fn test_encode_single_merge() {
        let merges = MergeTable::new(vec![(97, 98)]);
        assert_eq!(encode_segment(b"ab", &merges, None), vec![256]);
    }

    #[test]
    fn test_encode_full_pass_non_overlapping() {
        // "aaaa" with merge (a,a) -> 256: full-pass merges both non-
        // overlapping occurrences in one scan.
        let merges = MergeTable::new(vec![(97, 97)]);
        assert_eq!(encode_segment(b"aaaa", &merges, None), vec![256, 256]);
    }

    #[test]
    fn test_encode_lowest_rank_first() {
        // merges: (b,c) rank 0, (a,b) rank 1. "abc" should merge (b,c) first
        // (lower rank), leaving (a, 256) unmerged since it's not a learned pair.
        let merges = MergeTable::new(vec![(98, 99), (97, 98)]);
        assert_eq!(encode_segment(b"abc", &merges, None), vec![97, 256]);
    }

    #[test]
    fn test_encode_chained_merges() {
        // "hello" with the scenario-1 prefix of merges: (h,e)->256, (256,l)->257
        let merges = MergeTable::new(vec![(104, 101), (256, 108)]);
        assert_eq!(encode_segment(b"he", &merges, None), vec![256]);
        assert_eq!(encode_segment(b"hel", &merges, None), vec![257]);
    }

    #[test]
    fn test_encode_applies_byte_remap() {
        let remap = ByteRemap::from_permutation({
            let mut perm = [0u8; 256];
            for (i, p) in perm.iter_mut().enumerate() {
                *p = i as u8;
            }
            perm.swap(b'a' as usize, b'z' as usize);
            perm
        })
        .unwrap();
        let merges = MergeTable::new(vec![]);
        // 'a' (97) maps to whatever 'z' mapped to (97 <-> 122 swapped).
        assert_eq!(
            encode_segment(b"a", &merges, Some(&remap)),
            vec![b'z' as TokenId]
        );
    }
}
