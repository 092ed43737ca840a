//! # Parallel Encoder

use std::sync::Arc;

use crate::{encoders::TokenEncoder, errors::PCResult, types::TokenType, vocab::PieceVocab};

/// Batch-Level Parallel Encoder Wrapper.
///
/// Enables ``rayon`` encoding of batches when available.
#[derive(Debug, Clone)]
pub struct ParallelRayonEncoder<T: TokenType, D: TokenEncoder<T>> {
    /// Inner encoder.
    pub inner: D,

    _marker: std::marker::PhantomData<T>,
}

impl<T, D> ParallelRayonEncoder<T, D>
where
    T: TokenType,
    D: TokenEncoder<T>,
{
    /// Create a new parallel encoder.
    ///
    /// ## Arguments
    /// * `inner` - The token encoder to wrap.
    ///
    /// ## Returns
    /// A new `ParallelRayonEncoder` instance.
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            _marker: std::marker::PhantomData,
        }
    }
}

impl<T, D> TokenEncoder<T> for ParallelRayonEncoder<T, D>
where
    T: TokenType,
    D: TokenEncoder<T>,
{
    fn vocab(&self) -> &Arc<PieceVocab<T>> {
        self.inner.vocab()
    }

    fn try_encode_bytes_append(
        &self,
        text: &[u8],
        tokens: &mut Vec<T>,
    ) -> PCResult<()> {
        self.inner.try_encode_bytes_append(text, tokens)
    }

    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> PCResult<()> {
        self.inner.try_encode_append(text, tokens)
    }

    fn try_encode_batch(
        &self,
        batch: &[&str],
    ) -> PCResult<Vec<Vec<T>>> {
        use rayon::prelude::*;

        batch
            .par_iter()
            .map(|text| self.inner.try_encode(text))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        encoders::PieceEncoder,
        types::{check_is_send, check_is_sync},
        vocab::utility::testing::build_test_vocab,
    };

    #[test]
    fn test_encoder() {
        let encoder = PieceEncoder::<u32>::new(build_test_vocab().into(), Default::default());
        let parallel = ParallelRayonEncoder::new(encoder.clone());
        check_is_send(&parallel);
        check_is_sync(&parallel);

        assert_eq!(parallel.vocab(), encoder.vocab());

        let samples = [
            "hello world",
            "hello the undo",
            "it's not the heat, it's the salt",
            "\u{1f600}",
        ];
        assert_eq!(
            parallel.try_encode_batch(&samples).unwrap(),
            encoder.try_encode_batch(&samples).unwrap()
        );
        assert_eq!(
            parallel.try_encode(samples[0]).unwrap(),
            encoder.try_encode(samples[0]).unwrap()
        );
    }
}
