//! # Processor Options

use crate::encoders::TokenEncoderOptions;

/// Options for configuring a [`crate::processor::Processor`].
///
/// Applied to every model the processor loads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ProcessorOptions {
    /// Options for the encoder built at load.
    pub encoder: TokenEncoderOptions,
}

impl ProcessorOptions {
    /// Get the encoder options.
    pub fn encoder(&self) -> &TokenEncoderOptions {
        &self.encoder
    }

    /// Set the encoder options.
    pub fn set_encoder(
        &mut self,
        encoder: TokenEncoderOptions,
    ) {
        self.encoder = encoder;
    }

    /// Set the encoder options.
    pub fn with_encoder(
        mut self,
        encoder: TokenEncoderOptions,
    ) -> Self {
        self.set_encoder(encoder);
        self
    }

    /// Are batch operations threaded?
    pub fn parallel(&self) -> bool {
        self.encoder.parallel()
    }

    /// Set whether batch operations are threaded.
    pub fn with_parallel(
        mut self,
        parallel: bool,
    ) -> Self {
        self.encoder.set_parallel(parallel);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_options() {
        let options = ProcessorOptions::default();
        assert!(!options.parallel());
        assert_eq!(options.encoder(), &TokenEncoderOptions::default());

        let options = options
            .with_encoder(TokenEncoderOptions::default().with_add_eos(true))
            .with_parallel(true);
        assert!(options.parallel());
        assert!(options.encoder().add_eos());
    }
}
