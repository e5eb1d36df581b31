//! # Pair-Frequency Index
//!
//! Maps every adjacent `(left, right)` pair currently alive across the
//! training corpus to its count and to the set of node handles where it
//! occurs, plus a lazily-validated max-heap for `top()`.

use core::cmp::Reverse;

use crate::training::token_sequence::TokenSequence;
use crate::types::{CommonHashMap, CommonHashSet, Pair, TokenId};
use dary_heap::OctonaryHeap;

/// A stable location: `(sequence_index, node_index)`, pointing at the left
/// node of an occurrence.
pub type Handle = (usize, usize);

/// A candidate entry on the priority heap.
///
/// Max-heap by count; ties broken towards the lexicographically *smaller*
/// pair via [`Reverse`], matching the deterministic tie-break in the data
/// model (`§3 Priority structure`).
#[derive(Debug, Eq, PartialEq)]
struct HeapEntry {
    count: i64,
    pair: Reverse<Pair>,
}

impl Ord for HeapEntry {
    fn cmp(
        &self,
        other: &Self,
    ) -> core::cmp::Ordering {
        (self.count, &self.pair).cmp(&(other.count, &other.pair))
    }
}

impl PartialOrd for HeapEntry {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<core::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

/// An index of pair counts and occurrence locations over a training corpus.
pub struct PairIndex {
    counts: CommonHashMap<Pair, i64>,
    locations: CommonHashMap<Pair, CommonHashSet<Handle>>,
    heap: OctonaryHeap<HeapEntry>,
}

impl PairIndex {
    /// Build an index by scanning every sequence once.
    pub fn build(sequences: &[TokenSequence]) -> Self {
        let mut counts: CommonHashMap<Pair, i64> = CommonHashMap::default();
        let mut locations: CommonHashMap<Pair, CommonHashSet<Handle>> = CommonHashMap::default();

        for (seq_idx, seq) in sequences.iter().enumerate() {
            for (pair, left_idx) in seq.iter_live_pairs() {
                *counts.entry(pair).or_insert(0) += 1;
                locations.entry(pair).or_default().insert((seq_idx, left_idx));
            }
        }

        let heap = counts
            .iter()
            .filter(|(_, &c)| c > 0)
            .map(|(&pair, &count)| HeapEntry {
                count,
                pair: Reverse(pair),
            })
            .collect();

        Self {
            counts,
            locations,
            heap,
        }
    }

    /// The pair with the maximum count, tie-broken towards the
    /// lexicographically smallest pair. `None` once no adjacent pair
    /// remains anywhere in the corpus.
    pub fn top(&mut self) -> Option<Pair> {
        loop {
            let entry = self.heap.pop()?;
            let pair = entry.pair.0;
            let current = *self.counts.get(&pair).unwrap_or(&0);
            if current <= 0 {
                // Fully stale: the pair no longer has any live occurrence.
                continue;
            }
            if current != entry.count {
                // Stale count: refresh and requeue.
                self.heap.push(HeapEntry {
                    count: current,
                    pair: Reverse(pair),
                });
                continue;
            }
            return Some(pair);
        }
    }

    /// Adjust the count (and, for additions, the location set) of `pair`
    /// by `delta`. `handle` is required when `delta > 0` and ignored
    /// otherwise (decrements are reconciled lazily; see module docs).
    fn bump(
        &mut self,
        pair: Pair,
        delta: i64,
        handle: Option<Handle>,
    ) {
        let count = {
            let c = self.counts.entry(pair).or_insert(0);
            *c += delta;
            *c
        };
        debug_assert!(count >= 0, "pair count went negative for {pair:?}");

        if delta > 0 {
            if let Some(h) = handle {
                self.locations.entry(pair).or_default().insert(h);
            }
            self.heap.push(HeapEntry {
                count,
                pair: Reverse(pair),
            });
        }

        if count <= 0 {
            self.counts.remove(&pair);
            self.locations.remove(&pair);
        }
    }

    /// Merge every live occurrence of `pair` into `new_id` across
    /// `sequences`, updating counts and locations for the three pairs each
    /// occurrence touches (left-neighbor, the merged pair itself,
    /// right-neighbor). Returns the number of occurrences actually merged.
    pub fn apply_merge(
        &mut self,
        pair: Pair,
        new_id: TokenId,
        sequences: &mut [TokenSequence],
    ) -> i64 {
        let handles = self.locations.remove(&pair).unwrap_or_default();
        self.counts.remove(&pair);

        let mut handles: Vec<Handle> = handles.into_iter().collect();
        handles.sort_unstable();

        let mut merged = 0i64;
        for (seq_idx, left_idx) in handles {
            let seq = &mut sequences[seq_idx];
            let Some(right_idx) = seq.validate_pair_location(left_idx, pair) else {
                continue;
            };

            let prev_id = seq.prev_of(left_idx).map(|p| seq.id_at(p));
            let next_id = seq.next_of(right_idx).map(|q| seq.id_at(q));

            let (prev_idx, next_idx) = seq.merge_at(left_idx, right_idx, new_id);
            merged += 1;

            if let (Some(prev_idx), Some(prev_id)) = (prev_idx, prev_id) {
                self.bump((prev_id, pair.0), -1, None);
                self.bump((prev_id, new_id), 1, Some((seq_idx, prev_idx)));
            }
            if let (Some(_next_idx), Some(next_id)) = (next_idx, next_id) {
                self.bump((pair.1, next_id), -1, None);
                self.bump((new_id, next_id), 1, Some((seq_idx, left_idx)));
            }
        }

        merged
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_counts_and_top() {
        let sequences = vec![
            TokenSequence::from_bytes(b"hello"),
            TokenSequence::from_bytes(b"help"),
        ];
        let mut index = PairIndex::build(&sequences);

        // 'he' and 'el' both occur twice ("hello" + "help"); 'el' wins the
        // tie because (101, 108) < (104, 101) lexicographically.
        assert_eq!(index.top(), Some((b'e' as TokenId, b'l' as TokenId)));
    }

    #[test]
    fn test_tie_break_smaller_pair_wins() {
        // Two distinct pairs each with count 1: (2,1) and (1,2); (1,2) should win.
        let sequences = vec![
            TokenSequence::from_bytes(&[2, 1]),
            TokenSequence::from_bytes(&[1, 2]),
        ];
        let mut index = PairIndex::build(&sequences);
        assert_eq!(index.top(), Some((1, 2)));
    }

    #[test]
    fn test_apply_merge_updates_neighbors() {
        // "aaa": merging (a,a) once should leave one 'a', with counts for
        // any stale (a,a) neighbor pair cleaned up.
        let mut sequences = vec![TokenSequence::from_bytes(b"aaa")];
        let mut index = PairIndex::build(&sequences);
        let pair = index.top().unwrap();
        assert_eq!(pair, (97, 97));

        let merged = index.apply_merge(pair, 300, &mut sequences);
        assert_eq!(merged, 1);
        assert_eq!(
            sequences[0].iter_live().collect::<Vec<_>>(),
            vec![(0, 300), (2, 97)]
        );
        // No more adjacent pairs: the lone surviving 'a' has no neighbor.
        assert_eq!(index.top(), None);
    }

    #[test]
    fn test_apply_merge_propagates_new_pairs() {
        // "abab": merge (a,b) -> X, should then expose (X,X) as the only pair.
        let mut sequences = vec![TokenSequence::from_bytes(b"abab")];
        let mut index = PairIndex::build(&sequences);
        let pair = index.top().unwrap();
        assert_eq!(pair, (97, 98));

        index.apply_merge(pair, 300, &mut sequences);
        assert_eq!(index.top(), Some((300, 300)));
    }
}
