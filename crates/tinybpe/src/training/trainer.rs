//! # BPE Trainer

use crate::errors::{TBResult, TinyBpeError};
use crate::training::pair_index::PairIndex;
use crate::training::token_sequence::TokenSequence;
use crate::types::{Pair, TokenId, BYTE_RANGE};

/// The outcome of one [`BpeTrainer::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeStep {
    /// The pair that was merged.
    pub pair: Pair,

    /// The id assigned to the merge (`256 + merges_size()` before this step).
    pub new_id: TokenId,

    /// The pre-merge occurrence count of `pair`.
    pub count: i64,
}

/// Drives incremental BPE training: repeatedly picks the most frequent
/// adjacent pair across a corpus and merges every live occurrence of it.
pub struct BpeTrainer {
    sequences: Vec<TokenSequence>,
    merges: Vec<Pair>,
    index: PairIndex,
}

impl BpeTrainer {
    /// Build a trainer from a corpus of byte segments.
    ///
    /// Each segment becomes its own sequence; merges never cross segment
    /// boundaries.
    pub fn new<I, S>(corpus: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<[u8]>,
    {
        let sequences: Vec<TokenSequence> = corpus
            .into_iter()
            .map(|s| TokenSequence::from_bytes(s.as_ref()))
            .collect();
        log::info!("building pair index over {} segments", sequences.len());
        let index = PairIndex::build(&sequences);
        Self {
            sequences,
            merges: Vec::new(),
            index,
        }
    }

    /// Replay a previously-learned merge list before resuming training.
    ///
    /// Each loaded merge is applied with its id fixed to `256 + position`.
    /// Fails if any merge references an id that is not yet defined at its
    /// position.
    pub fn load_merges(
        &mut self,
        merges: &[Pair],
    ) -> TBResult<()> {
        for (position, &(left, right)) in merges.iter().enumerate() {
            let limit = BYTE_RANGE + position as TokenId;
            if left >= limit || right >= limit {
                return Err(TinyBpeError::InvalidModelFile(format!(
                    "merge {position} references out-of-range id ({left}, {right}); limit is {limit}"
                )));
            }
            let new_id = limit;
            for seq in &mut self.sequences {
                seq.merge_all((left, right), new_id);
            }
            self.merges.push((left, right));
        }
        // Replaying merges invalidates the index; rebuild it once, rather
        // than maintaining it incrementally through a batch of merges
        // whose relative order is already fixed.
        self.index = PairIndex::build(&self.sequences);
        Ok(())
    }

    /// Pick the most frequent adjacent pair, merge every live occurrence of
    /// it, and record the merge. Returns `None` once no adjacent pair
    /// remains anywhere in the corpus.
    pub fn step(&mut self) -> Option<MergeStep> {
        let pair = self.index.top()?;
        let new_id = BYTE_RANGE + self.merges.len() as TokenId;
        let count = self.index.apply_merge(pair, new_id, &mut self.sequences);
        self.merges.push(pair);
        log::debug!(
            "merge {}: {:?} -> {new_id} ({count} occurrences)",
            self.merges.len() - 1,
            pair,
        );
        Some(MergeStep {
            pair,
            new_id,
            count,
        })
    }

    /// The merges learned so far, in order.
    pub fn merges(&self) -> &[Pair] {
        &self.merges
    }

    /// The number of merges learned so far.
    pub fn merges_size(&self) -> usize {
        self.merges.len()
    }

    /// Save the learned merges to `<prefix>.tinybpe`.
    pub fn save(
        &self,
        prefix: &str,
    ) -> TBResult<()> {
        log::info!("saving {} merges to {prefix}.tinybpe", self.merges.len());
        crate::io::model_file::save_model(prefix, &self.merges)
    }
}
