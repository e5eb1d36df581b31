//! # Pre-Tokenization / Regex Chunking
//!
//! A caller-facing helper that splits input text into byte-segment chunks
//! along a configurable word-boundary pattern, so merges never cross word
//! boundaries. This sits outside the performance core: the core only ever
//! sees already-chunked byte segments.

use fancy_regex::Regex;

use crate::errors::{TBResult, TinyBpeError};

/// The GPT-2 / "r50k" word-boundary pattern.
pub const GPT2_PATTERN: &str = concat!(
    r"'(?:[sdmt]|ll|ve|re)",
    "|",
    r" ?\p{L}++",
    "|",
    r" ?\p{N}++",
    "|",
    r" ?[^\s\p{L}\p{N}]++",
    "|",
    r"\s++$",
    "|",
    r"\s+(?!\S)",
    "|",
    r"\s",
);

/// The "cl100k" word-boundary pattern (GPT-3.5 / GPT-4 class models).
pub const CL100K_PATTERN: &str = concat!(
    r"'(?i:[sdmt]|ll|ve|re)",
    "|",
    r"[^\r\n\p{L}\p{N}]?+\p{L}++",
    "|",
    r"\p{N}{1,3}+",
    "|",
    r" ?[^\s\p{L}\p{N}]++[\r\n]*+",
    "|",
    r"\s++$",
    "|",
    r"\s*[\r\n]",
    "|",
    r"\s+(?!\S)",
    "|",
    r"\s",
);

/// The "o200k" word-boundary pattern (GPT-4o class models).
pub const O200K_PATTERN: &str = concat!(
    r"[^\r\n\p{L}\p{N}]?[\p{Lu}\p{Lt}\p{Lm}\p{Lo}\p{M}]*[\p{Ll}\p{Lm}\p{Lo}\p{M}]+(?i:'s|'t|'re|'ve|'m|'ll|'d)?",
    "|",
    r"[^\r\n\p{L}\p{N}]?[\p{Lu}\p{Lt}\p{Lm}\p{Lo}\p{M}]+[\p{Ll}\p{Lm}\p{Lo}\p{M}]*(?i:'s|'t|'re|'ve|'m|'ll|'d)?",
    "|",
    r"\p{N}{1,3}",
    "|",
    r" ?[^\s\p{L}\p{N}]+[\r\n/]*",
    "|",
    r"\s*[\r\n]+",
    "|",
    r"\s+(?!\S)",
    "|",
    r"\s+",
);

/// Splits text into byte-segment chunks along a word-boundary regex.
pub struct TextSpanner {
    pattern: Regex,
}

impl TextSpanner {
    /// Compile a spanner from a pattern string (see e.g. [`GPT2_PATTERN`]).
    pub fn from_pattern(pattern: &str) -> TBResult<Self> {
        let pattern = Regex::new(pattern)
            .map_err(|e| TinyBpeError::InvalidModelFile(format!("bad spanner pattern: {e}")))?;
        Ok(Self { pattern })
    }

    /// Split `text` into an ordered list of non-empty byte segments.
    pub fn split<'a>(
        &self,
        text: &'a str,
    ) -> TBResult<Vec<&'a [u8]>> {
        let mut chunks = Vec::new();
        for m in self.pattern.find_iter(text) {
            let m = m.map_err(|e| {
                TinyBpeError::InvalidModelFile(format!("spanner match failed: {e}"))
            })?;
            if !m.as_str().is_empty() {
                chunks.push(m.as_str().as_bytes());
            }
        }
        Ok(chunks)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patterns_compile() {
        assert!(TextSpanner::from_pattern(GPT2_PATTERN).is_ok());
        assert!(TextSpanner::from_pattern(CL100K_PATTERN).is_ok());
        assert!(TextSpanner::from_pattern(O200K_PATTERN).is_ok());
    }

    #[test]
    fn test_split_words_and_spaces() {
        let spanner = TextSpanner::from_pattern(GPT2_PATTERN).unwrap();
        let chunks = spanner.split("Hello, world!").unwrap();
        let as_strs: Vec<&str> = chunks.iter().map(|c| std::str::from_utf8(c).unwrap()).collect();
        assert_eq!(as_strs, vec!["Hello", ",", " world", "!"]);
    }

    #[test]
    fn test_split_preserves_total_text() {
        let spanner = TextSpanner::from_pattern(CL100K_PATTERN).unwrap();
        let text = "hello, my friends";
        let chunks = spanner.split(text).unwrap();
        let rebuilt: Vec<u8> = chunks.concat();
        assert_eq!(rebuilt, text.as_bytes());
    }
}
