//! # Doubly-Linked Token Sequence
//!
//! A training corpus is a list of byte segments. Each segment is stored as
//! an arena of nodes with integer `prev`/`next` indices rather than boxed
//! pointers, so that location handles `(sequence_index, node_index)` stay
//! stable and cheap to index across the whole training run.

use crate::types::{Pair, TokenId};

/// A single node in a [`TokenSequence`].
#[derive(Debug, Clone, Copy)]
struct Node {
    id: TokenId,
    prev: Option<usize>,
    next: Option<usize>,
    alive: bool,
}

/// An arena-backed doubly-linked list of token ids.
///
/// Nodes are never physically freed during training: removal flips `alive`
/// to `false` and unlinks neighbors, so that `locations` sets held by the
/// [`super::pair_index::PairIndex`] can be lazily validated instead of
/// eagerly cleaned up.
#[derive(Debug, Clone)]
pub struct TokenSequence {
    nodes: Vec<Node>,
}

impl TokenSequence {
    /// Build a sequence with one node per byte.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let nodes = bytes
            .iter()
            .enumerate()
            .map(|(i, &b)| Node {
                id: b as TokenId,
                prev: i.checked_sub(1),
                next: if i + 1 < bytes.len() { Some(i + 1) } else { None },
                alive: true,
            })
            .collect();
        Self { nodes }
    }

    /// Number of nodes ever allocated (including dead ones).
    pub fn capacity(&self) -> usize {
        self.nodes.len()
    }

    /// The id stored at `index`, regardless of liveness.
    pub fn id_at(&self, index: usize) -> TokenId {
        self.nodes[index].id
    }

    /// Is the node at `index` alive?
    pub fn is_alive(&self, index: usize) -> bool {
        self.nodes[index].alive
    }

    /// The live successor of `index`, if any.
    pub fn next_of(&self, index: usize) -> Option<usize> {
        self.nodes[index].next
    }

    /// The live predecessor of `index`, if any.
    pub fn prev_of(&self, index: usize) -> Option<usize> {
        self.nodes[index].prev
    }

    /// Iterate over `(index, id)` for every live node, in sequence order.
    pub fn iter_live(&self) -> impl Iterator<Item = (usize, TokenId)> + '_ {
        let mut cur = self.nodes.iter().position(|n| n.alive);
        std::iter::from_fn(move || {
            let idx = cur?;
            cur = self.nodes[idx].next;
            Some((idx, self.nodes[idx].id))
        })
    }

    /// Iterate over every live adjacent pair, yielding `(pair, left_index)`.
    pub fn iter_live_pairs(&self) -> impl Iterator<Item = (Pair, usize)> + '_ {
        self.iter_live().filter_map(move |(idx, id)| {
            let next = self.nodes[idx].next?;
            Some(((id, self.nodes[next].id), idx))
        })
    }

    /// Verify that `index` is still a live left node of `pair`: alive, with
    /// a live successor whose id matches `pair.1`, and its own id matching
    /// `pair.0`.
    ///
    /// Returns the right-node index on success.
    pub fn validate_pair_location(
        &self,
        index: usize,
        pair: Pair,
    ) -> Option<usize> {
        let left = &self.nodes[index];
        if !left.alive || left.id != pair.0 {
            return None;
        }
        let right_idx = left.next?;
        let right = &self.nodes[right_idx];
        if right.alive && right.id == pair.1 {
            Some(right_idx)
        } else {
            None
        }
    }

    /// Rewrite the merge `(A, B) -> new_id` at the validated location whose
    /// left node is `left_idx` and whose right node is `right_idx`.
    ///
    /// Returns `(prev_index, next_index)`, the surviving neighbors of the
    /// merged node (the right node is removed, the left node becomes `N`).
    pub fn merge_at(
        &mut self,
        left_idx: usize,
        right_idx: usize,
        new_id: TokenId,
    ) -> (Option<usize>, Option<usize>) {
        let prev = self.nodes[left_idx].prev;
        let next = self.nodes[right_idx].next;

        self.nodes[left_idx].id = new_id;
        self.nodes[left_idx].next = next;
        if let Some(next_idx) = next {
            self.nodes[next_idx].prev = Some(left_idx);
        }
        self.nodes[right_idx].alive = false;
        self.nodes[right_idx].prev = None;
        self.nodes[right_idx].next = None;

        (prev, next)
    }

    /// Directly merge every non-overlapping occurrence of `pair` into
    /// `new_id`, without touching a [`super::pair_index::PairIndex`].
    ///
    /// Used to replay a previously-trained merge list (`load_merges`),
    /// where the merges are already known and a full index rebuild follows
    /// once every merge has been replayed.
    pub fn merge_all(
        &mut self,
        pair: Pair,
        new_id: TokenId,
    ) -> usize {
        let mut count = 0;
        let mut cur = self.nodes.iter().position(|n| n.alive);
        while let Some(idx) = cur {
            if let Some(right_idx) = self.validate_pair_location(idx, pair) {
                let (_, next) = self.merge_at(idx, right_idx, new_id);
                count += 1;
                cur = next;
            } else {
                cur = self.nodes[idx].next;
            }
        }
        count
    }
}
