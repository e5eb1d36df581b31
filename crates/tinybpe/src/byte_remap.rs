//! # Byte-Permutation Map
//!
//! A bijection on the `0..255` byte alphabet, applied to every input byte
//! before encoding and inverted after decoding, for compatibility with
//! external vocabularies (e.g. GPT-4-style tables) that do not assign byte
//! ids in natural order.

use crate::errors::{TBResult, TinyBpeError};

/// A 0..=255 byte permutation and its inverse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ByteRemap {
    forward: [u8; 256],
    inverse: [u8; 256],
}

impl Default for ByteRemap {
    fn default() -> Self {
        Self::identity()
    }
}

impl ByteRemap {
    /// The identity permutation: every byte maps to itself.
    pub fn identity() -> Self {
        let mut table = [0u8; 256];
        for (i, t) in table.iter_mut().enumerate() {
            *t = i as u8;
        }
        Self {
            forward: table,
            inverse: table,
        }
    }

    /// Build a remap from `forward[b] = π(b)`.
    ///
    /// Fails unless `forward` is a bijection on `0..=255`.
    pub fn from_permutation(forward: [u8; 256]) -> TBResult<Self> {
        let mut inverse = [0u8; 256];
        let mut seen = [false; 256];
        for (b, &p) in forward.iter().enumerate() {
            if seen[p as usize] {
                return Err(TinyBpeError::InvalidRemap(format!(
                    "byte {p} is the image of more than one source byte"
                )));
            }
            seen[p as usize] = true;
            inverse[p as usize] = b as u8;
        }
        Ok(Self { forward, inverse })
    }

    /// Build a remap from a flat list of 256 permutation entries (as read
    /// from a `.remaps` file).
    pub fn from_entries(entries: &[u32]) -> TBResult<Self> {
        if entries.len() != 256 {
            return Err(TinyBpeError::InvalidRemap(format!(
                "expected 256 entries, got {}",
                entries.len()
            )));
        }
        let mut forward = [0u8; 256];
        for (i, &v) in entries.iter().enumerate() {
            if v > 255 {
                return Err(TinyBpeError::InvalidRemap(format!(
                    "entry {i} is out of byte range: {v}"
                )));
            }
            forward[i] = v as u8;
        }
        Self::from_permutation(forward)
    }

    /// `π(b)`: the byte an input byte maps to before encoding.
    pub fn forward(
        &self,
        b: u8,
    ) -> u8 {
        self.forward[b as usize]
    }

    /// `π⁻¹(b)`: the byte to restore after decoding.
    pub fn inverse(
        &self,
        b: u8,
    ) -> u8 {
        self.inverse[b as usize]
    }

    /// The forward table, as used by `.remaps` file writers.
    pub fn forward_table(&self) -> &[u8; 256] {
        &self.forward
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_round_trip() {
        let remap = ByteRemap::identity();
        for b in 0..=255u8 {
            assert_eq!(remap.inverse(remap.forward(b)), b);
        }
    }

    #[test]
    fn test_swap_permutation_round_trip() {
        let mut perm = [0u8; 256];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = i as u8;
        }
        perm.swap(5, 200);
        let remap = ByteRemap::from_permutation(perm).unwrap();
        assert_eq!(remap.forward(5), 200);
        assert_eq!(remap.inverse(200), 5);
        for b in 0..=255u8 {
            assert_eq!(remap.inverse(remap.forward(b)), b);
        }
    }

    #[test]
    fn test_rejects_non_bijection() {
        let mut perm = [0u8; 256];
        for (i, p) in perm.iter_mut().enumerate() {
            *p = i as u8;
        }
        perm[1] = 0; // collides with perm[0] == 0
        let err = ByteRemap::from_permutation(perm).unwrap_err();
        assert!(matches!(err, TinyBpeError::InvalidRemap(_)));
    }

    #[test]
    fn test_from_entries_rejects_wrong_length() {
        let err = ByteRemap::from_entries(&[0, 1, 2]).unwrap_err();
        assert!(matches!(err, TinyBpeError::InvalidRemap(_)));
    }

    #[test]
    fn test_from_entries_rejects_out_of_range() {
        let mut entries: Vec<u32> = (0..256).collect();
        entries[0] = 9999;
        let err = ByteRemap::from_entries(&entries).unwrap_err();
        assert!(matches!(err, TinyBpeError::InvalidRemap(_)));
    }
}
