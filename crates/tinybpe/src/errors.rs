//! # Error Types

/// Errors from tinybpe operations.
#[derive(Debug, thiserror::Error)]
pub enum TinyBpeError {
    /// The model file had a bad magic line, a malformed count, or a merge
    /// referencing an id that is not yet defined at its position.
    #[error("invalid model file: {0}")]
    InvalidModelFile(String),

    /// The remap file did not contain exactly 256 entries, or the entries
    /// were not a permutation of `0..256`.
    #[error("invalid byte remap: {0}")]
    InvalidRemap(String),

    /// A decode request referenced an id with no vocab entry and no
    /// special-token entry.
    #[error("unknown token id {0}")]
    UnknownId(u32),

    /// Two special tokens collided, either on their literal bytes or on
    /// their assigned id, or a special id fell inside the merge range.
    #[error("duplicate special token: {0}")]
    DuplicateSpecial(String),

    /// I/O error while reading or writing a model/remap/vocab file.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Result type for tinybpe operations.
pub type TBResult<T> = std::result::Result<T, TinyBpeError>;
