//! # Parallel Decoder

use crate::{decoders::TokenDecoder, errors::PCResult, types::TokenType};

/// Batch-Level Parallel Decoder Wrapper.
///
/// Enables ``rayon`` decoding of batches when available.
#[derive(Debug, Clone)]
pub struct ParallelRayonDecoder<T: TokenType, D: TokenDecoder<T>> {
    /// Wrapped decoder.
    pub inner: D,

    _marker: std::marker::PhantomData<T>,
}

impl<T, D> ParallelRayonDecoder<T, D>
where
    T: TokenType,
    D: TokenDecoder<T>,
{
    /// Create a new parallel token decoder.
    ///
    /// ## Arguments
    /// * `inner` - The token decoder to wrap.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T, D> TokenDecoder<T> for ParallelRayonDecoder<T, D>
where
    T: TokenType,
    D: TokenDecoder<T>,
{
    fn try_decode_to_bytes(
        &self,
        tokens: &[T],
    ) -> PCResult<Vec<u8>> {
        self.inner.try_decode_to_bytes(tokens)
    }

    fn denormalize(
        &self,
        text: String,
    ) -> String {
        self.inner.denormalize(text)
    }

    fn try_decode_batch_to_bytes(
        &self,
        batch: &[&[T]],
    ) -> PCResult<Vec<Vec<u8>>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|tokens| self.inner.try_decode_to_bytes(tokens))
            .collect()
    }

    fn try_decode_batch_to_strings(
        &self,
        batch: &[&[T]],
    ) -> PCResult<Vec<String>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|tokens| self.inner.try_decode_to_string(tokens))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        decoders::PieceDecoder,
        encoders::{PieceEncoder, TokenEncoder},
        errors::PCError,
        vocab::{PieceModel, utility::testing::build_test_vocab},
    };

    #[test]
    fn test_decoder() {
        let model: PieceModel<u32> = build_test_vocab().into();
        let encoder = PieceEncoder::new(model.clone(), Default::default());
        let decoder = ParallelRayonDecoder::new(PieceDecoder::new(&model));

        let samples = ["hello world", "the undo", "caf\u{e9}!"];
        let batch = encoder.try_encode_batch(&samples).unwrap();
        let refs: Vec<&[u32]> = batch.iter().map(|v| v.as_slice()).collect();

        assert_eq!(decoder.try_decode_batch_to_strings(&refs).unwrap(), samples);
        assert_eq!(
            decoder.try_decode_batch_to_bytes(&refs).unwrap(),
            decoder.inner.try_decode_batch_to_bytes(&refs).unwrap()
        );

        let bad: Vec<&[u32]> = vec![&[3], &[u32::MAX]];
        assert!(matches!(
            decoder.try_decode_batch_to_strings(&bad),
            Err(PCError::InvalidId { .. })
        ));
    }
}
