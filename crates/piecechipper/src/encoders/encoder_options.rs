//! Token Encoder Options
//!
//! Options for building a [`TokenEncoder`].

use std::sync::Arc;

use crate::{
    encoders::{PieceEncoder, TokenEncoder},
    types::TokenType,
    vocab::PieceModel,
};

/// Options for configuring a [`TokenEncoder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TokenEncoderOptions {
    /// Prepend the beginning-of-sequence id, when the vocabulary has one.
    pub add_bos: bool,

    /// Append the end-of-sequence id, when the vocabulary has one.
    pub add_eos: bool,

    /// Should batch encoding be threaded?
    pub parallel: bool,
}

impl TokenEncoderOptions {
    /// Is the bos id prepended?
    pub fn add_bos(&self) -> bool {
        self.add_bos
    }

    /// Set whether the bos id is prepended.
    pub fn set_add_bos(
        &mut self,
        add_bos: bool,
    ) {
        self.add_bos = add_bos;
    }

    /// Set whether the bos id is prepended.
    pub fn with_add_bos(
        mut self,
        add_bos: bool,
    ) -> Self {
        self.set_add_bos(add_bos);
        self
    }

    /// Is the eos id appended?
    pub fn add_eos(&self) -> bool {
        self.add_eos
    }

    /// Set whether the eos id is appended.
    pub fn set_add_eos(
        &mut self,
        add_eos: bool,
    ) {
        self.add_eos = add_eos;
    }

    /// Set whether the eos id is appended.
    pub fn with_add_eos(
        mut self,
        add_eos: bool,
    ) -> Self {
        self.set_add_eos(add_eos);
        self
    }

    /// Gets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded batch implementations.
    pub fn parallel(&self) -> bool {
        self.parallel
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded batch implementations.
    pub fn set_parallel(
        &mut self,
        parallel: bool,
    ) {
        self.parallel = parallel;
    }

    /// Sets the configured parallelism value.
    ///
    /// Enabling parallelism will request threaded batch implementations.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.set_parallel(parallel);
        self
    }

    /// Build a [`TokenEncoder`] for the given model.
    pub fn build<T: TokenType>(
        &self,
        model: &PieceModel<T>,
    ) -> Arc<dyn TokenEncoder<T>> {
        let enc = PieceEncoder::new(model.clone(), *self);

        #[cfg(feature = "rayon")]
        if self.parallel() {
            return Arc::new(crate::concurrency::rayon::ParallelRayonEncoder::new(enc));
        }

        Arc::new(enc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::utility::testing::build_test_vocab;

    #[test]
    fn test_builders() {
        let options = TokenEncoderOptions::default();
        assert!(!options.add_bos());
        assert!(!options.add_eos());
        assert!(!options.parallel());

        let options = options
            .with_add_bos(true)
            .with_add_eos(true)
            .with_parallel(true);
        assert!(options.add_bos());
        assert!(options.add_eos());
        assert!(options.parallel());
    }

    #[test]
    fn test_build() {
        let model: PieceModel<u32> = build_test_vocab().into();
        for parallel in [false, true] {
            let encoder = TokenEncoderOptions::default()
                .with_add_bos(true)
                .with_parallel(parallel)
                .build(&model);
            let tokens = encoder.try_encode("hello").unwrap();
            assert_eq!(tokens[0], 1);
            assert_eq!(tokens.len(), 2);
        }
    }
}
