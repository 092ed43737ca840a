//! # Piece Decoder

use std::sync::Arc;

use crate::{
    decoders::TokenDecoder,
    errors::{PCError, PCResult},
    normalize::Normalizer,
    types::TokenType,
    vocab::{PieceKind, PieceModel, PieceVocab},
};

/// What an unknown id decodes to.
pub const UNK_DECODE_SURFACE: &str = " \u{2047} ";

/// Ids to text: concatenate piece bytes, then denormalize.
///
/// * normal and user-defined pieces emit their surface;
/// * byte pieces emit their raw byte;
/// * control pieces emit nothing;
/// * the unknown piece emits [`UNK_DECODE_SURFACE`].
///
/// ## Style Hints
/// Instance names should prefer `decoder`.
#[derive(Debug, Clone)]
pub struct PieceDecoder<T: TokenType> {
    vocab: Arc<PieceVocab<T>>,
    normalizer: Normalizer,
}

impl<T: TokenType> PieceDecoder<T> {
    /// Create a decoder for a model.
    pub fn new(model: &PieceModel<T>) -> Self {
        Self::from_parts(model.vocab().clone(), model.normalizer())
    }

    /// Create a decoder from a vocabulary and normalizer.
    pub fn from_parts(
        vocab: Arc<PieceVocab<T>>,
        normalizer: Normalizer,
    ) -> Self {
        Self { vocab, normalizer }
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &Arc<PieceVocab<T>> {
        &self.vocab
    }

    /// Get the normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }
}

impl<T: TokenType> TokenDecoder<T> for PieceDecoder<T> {
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, tokens)))]
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> PCResult<Vec<u8>> {
        let mut buf = Vec::with_capacity(tokens.len() * 4);
        for &token in tokens {
            let piece = self.vocab.piece_at(token).ok_or_else(|| PCError::InvalidId {
                id: token.to_i64().unwrap_or(i64::MAX),
                vocab_size: self.vocab.len(),
            })?;
            match piece.kind {
                PieceKind::Normal | PieceKind::UserDefined => buf.extend_from_slice(&piece.surface),
                PieceKind::Byte => buf.extend(piece.byte_value()),
                PieceKind::Control => {}
                PieceKind::Unknown => buf.extend_from_slice(UNK_DECODE_SURFACE.as_bytes()),
            }
        }
        Ok(buf)
    }

    fn denormalize(
        &self,
        text: String,
    ) -> String {
        self.normalizer.denormalize(&text)
    }
}
