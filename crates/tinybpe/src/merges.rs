//! # Merge Table
//!
//! The immutable `(left, right) -> rank` lookup consulted by the encoder.
//! Rank is the merge's position in the learned merge list; lower rank is
//! applied first.

use crate::types::{CommonHashMap, Pair, TokenId, BYTE_RANGE};

/// An immutable, ranked merge table built from a learned merge list.
#[derive(Debug, Clone)]
pub struct MergeTable {
    merges: Vec<Pair>,
    ranks: CommonHashMap<Pair, u32>,
}

impl MergeTable {
    /// Build a merge table from an ordered merge list. Merge `i` is assigned
    /// id `256 + i` and rank `i`.
    pub fn new(merges: Vec<Pair>) -> Self {
        let ranks = merges
            .iter()
            .enumerate()
            .map(|(rank, &pair)| (pair, rank as u32))
            .collect();
        Self { merges, ranks }
    }

    /// The rank of `pair`, if it is a learned merge.
    pub fn rank(
        &self,
        pair: Pair,
    ) -> Option<u32> {
        self.ranks.get(&pair).copied()
    }

    /// The id a merge of `pair` would produce, if it is a learned merge.
    pub fn id_of(
        &self,
        pair: Pair,
    ) -> Option<TokenId> {
        self.rank(pair).map(|r| BYTE_RANGE + r)
    }

    /// The underlying merge list, in rank order.
    pub fn merges(&self) -> &[Pair] {
        &self.merges
    }

    /// The number of learned merges.
    pub fn len(&self) -> usize {
        self.merges.len()
    }

    /// Is this table empty (no merges learned)?
    pub fn is_empty(&self) -> bool {
        self.merges.is_empty()
    }

    /// The first id not assigned to a byte or a merge.
    pub fn next_free_id(&self) -> TokenId {
        BYTE_RANGE + self.merges.len() as TokenId
    }
}
