//! # Special-Token Splitter & Dispatcher
//!
//! Reserves fixed ids, disjoint from the merge range, for literal byte
//! strings. Splitting the input around them is done with `aho-corasick`
//! (leftmost-longest multi-literal search), the exact-match-alternation
//! idiom the rest of this codebase uses for literal-set search.

use aho_corasick::{AhoCorasick, MatchKind};

use crate::errors::{TBResult, TinyBpeError};
use crate::types::{CommonHashMap, TokenId};

/// One chunk of a split input: either a plain byte span to run through the
/// encoder, or a special token's reserved id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    /// A byte span with no special token.
    Plain(&'a [u8]),

    /// A literal match for a special token, already resolved to its id.
    Special(TokenId),
}

/// An ordered set of reserved special-token ids, and the automaton used to
/// find them in input text.
pub struct SpecialTable {
    literals: Vec<Vec<u8>>,
    ids: Vec<TokenId>,
    id_to_bytes: CommonHashMap<TokenId, Vec<u8>>,
    matcher: Option<AhoCorasick>,
}

impl SpecialTable {
    /// Build a table from `(literal, id)` pairs.
    ///
    /// Fails if two entries share a literal, share an id, or if any id
    /// falls inside `0..merge_id_ceiling` (the byte + merge range).
    pub fn new<I>(
        entries: I,
        merge_id_ceiling: TokenId,
    ) -> TBResult<Self>
    where
        I: IntoIterator<Item = (Vec<u8>, TokenId)>,
    {
        let mut literals = Vec::new();
        let mut ids = Vec::new();
        let mut id_to_bytes = CommonHashMap::default();
        let mut seen_literals = CommonHashMap::default();

        for (literal, id) in entries {
            if id < merge_id_ceiling {
                return Err(TinyBpeError::DuplicateSpecial(format!(
                    "special id {id} collides with the byte/merge range (< {merge_id_ceiling})"
                )));
            }
            if seen_literals.insert(literal.clone(), id).is_some() {
                return Err(TinyBpeError::DuplicateSpecial(format!(
                    "duplicate special literal: {literal:?}"
                )));
            }
            if id_to_bytes.insert(id, literal.clone()).is_some() {
                return Err(TinyBpeError::DuplicateSpecial(format!(
                    "duplicate special id: {id}"
                )));
            }
            literals.push(literal);
            ids.push(id);
        }

        let matcher = if literals.is_empty() {
            None
        } else {
            Some(
                AhoCorasick::builder()
                    .match_kind(MatchKind::LeftmostLongest)
                    .build(&literals)
                    .map_err(|e| TinyBpeError::DuplicateSpecial(e.to_string()))?,
            )
        };

        Ok(Self {
            literals,
            ids,
            id_to_bytes,
            matcher,
        })
    }

    /// An empty table: no special tokens reserved.
    pub fn empty() -> Self {
        Self {
            literals: Vec::new(),
            ids: Vec::new(),
            id_to_bytes: CommonHashMap::default(),
            matcher: None,
        }
    }

    /// How many special tokens are registered.
    pub fn len(&self) -> usize {
        self.literals.len()
    }

    /// Is this table empty?
    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// The literal bytes for a reserved id, if any.
    pub fn bytes_of(
        &self,
        id: TokenId,
    ) -> Option<&[u8]> {
        self.id_to_bytes.get(&id).map(|v| v.as_slice())
    }

    /// Every reserved special id, in registration order.
    pub fn ids(&self) -> impl Iterator<Item = TokenId> + '_ {
        self.ids.iter().copied()
    }

    /// Split `text` into alternating plain/special segments, in order.
    pub fn split<'a>(
        &self,
        text: &'a [u8],
    ) -> Vec<Segment<'a>> {
        let Some(matcher) = &self.matcher else {
            return vec![Segment::Plain(text)];
        };

        let mut segments = Vec::new();
        let mut cursor = 0;
        for m in matcher.find_iter(text) {
            if m.start() > cursor {
                segments.push(Segment::Plain(&text[cursor..m.start()]));
            }
            segments.push(Segment::Special(self.ids[m.pattern().as_usize()]));
            cursor = m.end();
        }
        if cursor < text.len() {
            segments.push(Segment::Plain(&text[cursor..]));
        }
        segments
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_table_is_single_plain_segment() {
        let table = SpecialTable::empty();
        assert_eq!(table.split(b"hello"), vec![Segment::Plain(b"hello")]);
    }

    #[test]
    fn test_split_around_special() {
        let table = SpecialTable::new(vec![(b"<eot>".to_vec(), 300)], 257).unwrap();
        let segments = table.split(b"hi<eot>there");
        assert_eq!(
            segments,
            vec![
                Segment::Plain(b"hi"),
                Segment::Special(300),
                Segment::Plain(b"there"),
            ]
        );
    }

    #[test]
    fn test_exact_match_atomic() {
        let table = SpecialTable::new(vec![(b"<eot>".to_vec(), 300)], 257).unwrap();
        assert_eq!(table.split(b"<eot>"), vec![Segment::Special(300)]);
    }

    #[test]
    fn test_rejects_id_inside_merge_range() {
        let err = SpecialTable::new(vec![(b"<eot>".to_vec(), 100)], 257).unwrap_err();
        assert!(matches!(err, TinyBpeError::DuplicateSpecial(_)));
    }

    #[test]
    fn test_rejects_duplicate_id() {
        let err = SpecialTable::new(
            vec![(b"<a>".to_vec(), 300), (b"<b>".to_vec(), 300)],
            257,
        )
        .unwrap_err();
        assert!(matches!(err, TinyBpeError::DuplicateSpecial(_)));
    }

    #[test]
    fn test_bytes_of_round_trip() {
        let table = SpecialTable::new(vec![(b"<eot>".to_vec(), 300)], 257).unwrap();
        assert_eq!(table.bytes_of(300), Some(&b"<eot>"[..]));
        assert_eq!(table.bytes_of(301), None);
    }
}
