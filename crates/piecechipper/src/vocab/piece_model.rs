//! # Piece Model

use std::sync::Arc;

use crate::{
    errors::PCResult,
    normalize::{Normalizer, NormalizerConfig},
    types::TokenType,
    vocab::PieceVocab,
};

/// A loadable tokenizer model: normalization policy plus vocabulary.
///
/// This is the unit persisted by [`crate::vocab::io::write_model`].
///
/// ## Style Hints
/// Instance names should prefer `model`.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceModel<T: TokenType> {
    normalizer: NormalizerConfig,
    vocab: Arc<PieceVocab<T>>,
}

impl<T: TokenType> From<PieceVocab<T>> for PieceModel<T> {
    fn from(vocab: PieceVocab<T>) -> Self {
        Self::new(NormalizerConfig::default(), vocab)
    }
}

impl<T: TokenType> PieceModel<T> {
    /// Build a model.
    pub fn new(
        normalizer: NormalizerConfig,
        vocab: PieceVocab<T>,
    ) -> Self {
        Self::from_arc(normalizer, Arc::new(vocab))
    }

    /// Build a model around a shared vocabulary.
    pub fn from_arc(
        normalizer: NormalizerConfig,
        vocab: Arc<PieceVocab<T>>,
    ) -> Self {
        Self { normalizer, vocab }
    }

    /// Get the normalizer config.
    pub fn normalizer_config(&self) -> &NormalizerConfig {
        &self.normalizer
    }

    /// Build a [`Normalizer`] for this model.
    pub fn normalizer(&self) -> Normalizer {
        Normalizer::new(self.normalizer)
    }

    /// Replace the normalizer config.
    pub fn with_normalizer_config(
        mut self,
        normalizer: NormalizerConfig,
    ) -> Self {
        self.normalizer = normalizer;
        self
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &Arc<PieceVocab<T>> {
        &self.vocab
    }

    /// The number of pieces.
    pub fn vocab_size(&self) -> usize {
        self.vocab.len()
    }

    /// Convert to a different token type.
    pub fn to_token_type<G: TokenType>(&self) -> PCResult<PieceModel<G>> {
        Ok(PieceModel::new(self.normalizer, self.vocab.to_token_type()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{normalize::UnicodeForm, vocab::utility::testing::build_test_vocab};

    #[test]
    fn test_model_parts() {
        let model: PieceModel<u32> = build_test_vocab().into();
        assert_eq!(model.normalizer_config(), &NormalizerConfig::default());
        assert_eq!(model.vocab_size(), model.vocab().len());
        assert_eq!(model.normalizer().normalize("a b"), "▁a▁b");

        let model = model.with_normalizer_config(
            NormalizerConfig::default().with_unicode_form(UnicodeForm::Nfc),
        );
        assert_eq!(model.normalizer_config().unicode_form(), UnicodeForm::Nfc);

        let wide: PieceModel<u64> = model.to_token_type().unwrap();
        assert_eq!(wide.vocab_size(), model.vocab_size());
        assert_eq!(wide.normalizer_config(), model.normalizer_config());
    }
}
