//! # Token Encoder Trait

use std::sync::Arc;

use crate::{errors::PCResult, types::TokenType, vocab::PieceVocab};

/// Rough normalized bytes per emitted piece, for buffer sizing.
pub const EXPECTED_BYTES_PER_PIECE: f64 = 3.0;

/// A trait for token encoders.
pub trait TokenEncoder<T: TokenType>: Send + Sync {
    /// Return the attached vocabulary.
    fn vocab(&self) -> &Arc<PieceVocab<T>>;

    /// Encode bytes which may contain malformed UTF-8, appending to a buffer.
    ///
    /// ## Arguments
    /// * `text` - the raw (unnormalized) input bytes.
    /// * `tokens` - the target token buffer to append to.
    fn try_encode_bytes_append(
        &self,
        text: &[u8],
        tokens: &mut Vec<T>,
    ) -> PCResult<()>;

    /// Encode text, appending to a target buffer.
    ///
    /// ## Arguments
    /// * `text` - the string slice to encode.
    /// * `tokens` - the target token buffer to append to.
    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> PCResult<()> {
        self.try_encode_bytes_append(text.as_bytes(), tokens)
    }

    /// Encode text into tokens.
    ///
    /// ## Arguments
    /// * `text` - the text to encode.
    ///
    /// ## Returns
    /// A `Result` containing the vector of tokens.
    fn try_encode(
        &self,
        text: &str,
    ) -> PCResult<Vec<T>> {
        let capacity = text.len() as f64 / EXPECTED_BYTES_PER_PIECE + 2.0;
        let mut tokens = Vec::with_capacity(capacity as usize);
        self.try_encode_append(text, &mut tokens)?;
        Ok(tokens)
    }

    /// Encode possibly-malformed UTF-8 bytes into tokens.
    ///
    /// Malformed sequences are segmented as single-byte unknown spans.
    fn try_encode_bytes(
        &self,
        text: &[u8],
    ) -> PCResult<Vec<T>> {
        let capacity = text.len() as f64 / EXPECTED_BYTES_PER_PIECE + 2.0;
        let mut tokens = Vec::with_capacity(capacity as usize);
        self.try_encode_bytes_append(text, &mut tokens)?;
        Ok(tokens)
    }

    /// Encode a batch of text into tokens.
    ///
    /// ## Arguments
    /// * `batch` - a slice of strings to encode.
    ///
    /// ## Returns
    /// A `Result` containing the vector of token vectors.
    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> PCResult<Vec<Vec<T>>> {
        batch.iter().map(|s| self.try_encode(s)).collect()
    }
}
