//! # Common Types

/// A token id.
///
/// Ids `0..256` denote single (possibly remapped) bytes; ids `>= 256`
/// denote merges, in the order they were learned. Ids above the merge
/// range may denote special tokens (see [`crate::special`]).
pub type TokenId = u32;

/// The first id available to merges: one slot per raw byte value.
pub const BYTE_RANGE: TokenId = 256;

/// A pair of adjacent token ids.
pub type Pair = (TokenId, TokenId);

/// Type alias for hash maps used across this crate.
pub type CommonHashMap<K, V> = ahash::AHashMap<K, V>;

/// Type alias for hash sets used across this crate.
pub type CommonHashSet<V> = ahash::AHashSet<V>;
