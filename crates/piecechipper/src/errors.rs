//! # Error Types

use std::path::PathBuf;

/// Errors from loading a model artifact.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The model artifact does not exist.
    #[error("model not found: {}", path.display())]
    NotFound {
        /// The path that was requested.
        path: PathBuf,
    },

    /// The model artifact is truncated or malformed.
    #[error("corrupt model: {0}")]
    Corrupt(String),

    /// The model artifact was written by an unsupported format version.
    #[error("unsupported model version {found} (supported: {supported})")]
    UnsupportedVersion {
        /// The version found in the artifact header.
        found: u32,

        /// The version this build reads.
        supported: u32,
    },
}

impl LoadError {
    /// Build a [`LoadError::Corrupt`] from a message.
    pub fn corrupt<S: Into<String>>(msg: S) -> Self {
        Self::Corrupt(msg.into())
    }
}

/// Errors from piecechipper operations.
#[derive(Debug, thiserror::Error)]
pub enum PCError {
    /// The model could not be loaded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// The processor has no loaded model.
    #[error("processor is not loaded")]
    NotLoaded,

    /// The processor was released and cannot be used again.
    #[error("processor has been released")]
    Released,

    /// A token id is outside `[0, vocab_size)`.
    #[error("invalid token id {id} (vocab size {vocab_size})")]
    InvalidId {
        /// The offending id.
        id: i64,

        /// The size of the loaded vocabulary.
        vocab_size: usize,
    },

    /// Vocab size exceeds the capacity of the target token type.
    #[error("vocab size ({size}) exceeds token type capacity")]
    VocabSizeOverflow {
        /// The vocab size that exceeded the capacity.
        size: usize,
    },

    /// Vocabulary data is inconsistent.
    #[error("{0}")]
    VocabConflict(String),

    /// I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Parse error (text vocab lines, scores, etc.)
    #[error("parse error: {0}")]
    Parse(String),
}

/// Result type for piecechipper operations.
pub type PCResult<T> = core::result::Result<T, PCError>;

/// Malformed input recovered during encoding.
///
/// Never returned to callers; malformed byte sequences are segmented as
/// single-byte unknown spans instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub(crate) enum EncodingError {
    /// The byte at this offset does not start a valid UTF-8 sequence.
    #[error("malformed utf-8 at byte offset {offset}")]
    MalformedInput {
        /// Byte offset into the normalized text.
        offset: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_error_display() {
        let err: PCError = LoadError::corrupt("truncated piece table").into();
        assert_eq!(err.to_string(), "corrupt model: truncated piece table");

        let err: PCError = LoadError::UnsupportedVersion {
            found: 7,
            supported: 1,
        }
        .into();
        assert_eq!(err.to_string(), "unsupported model version 7 (supported: 1)");

        let err = PCError::InvalidId {
            id: 12,
            vocab_size: 10,
        };
        assert_eq!(err.to_string(), "invalid token id 12 (vocab size 10)");
    }

    #[test]
    fn test_io_error_from() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "boom");
        let err: PCError = io.into();
        assert!(matches!(err, PCError::Io(_)));
    }
}
