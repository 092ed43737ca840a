//! # Token Decoder Trait

use crate::{errors::PCResult, support::strings::string_from_utf8_lossy, types::TokenType};

/// Trait for token decoders.
///
/// Decoding is all-or-nothing: an invalid id fails the whole call,
/// and no partial output is produced.
pub trait TokenDecoder<T: TokenType>: Send + Sync {
    /// Decodes tokens into the concatenated piece bytes.
    ///
    /// The result is still in normalized form; see
    /// [`TokenDecoder::try_decode_to_string`] for the user-facing text.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> PCResult<Vec<u8>>;

    /// Reverse the normalizer's whitespace handling on decoded text.
    fn denormalize(
        &self,
        text: String,
    ) -> String {
        text
    }

    /// Decodes a batch of tokens into piece bytes.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> PCResult<Vec<Vec<u8>>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_bytes(tokens))
            .collect()
    }

    /// Decodes tokens into a string.
    ///
    /// UTF-8 lossy decoding is used to handle invalid UTF-8 sequences.
    ///
    /// ## Arguments
    /// * `tokens` - A slice of tokens to decode.
    fn try_decode_to_string(
        &self,
        tokens: &[T],
    ) -> PCResult<String> {
        self.try_decode_to_bytes(tokens)
            .map(string_from_utf8_lossy)
            .map(|text| self.denormalize(text))
    }

    /// Decodes a batch of tokens into strings.
    ///
    /// ## Arguments
    /// * `batch` - A batch of tokens.
    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> PCResult<Vec<String>> {
        batch
            .iter()
            .map(|tokens| self.try_decode_to_string(tokens))
            .collect()
    }
}
