use piecechipper::{PieceModel, Processor, ProcessorOptions, vocab::io::load_model_path};

/// Model selector arg group.
#[derive(clap::Args, Debug)]
pub struct ModelSelectorArgs {
    /// Path to a model artifact.
    #[arg(long, short = 'm')]
    model: String,
}

impl ModelSelectorArgs {
    /// Get the model path.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Read the model artifact.
    pub fn load_model(&self) -> Result<PieceModel<u32>, Box<dyn std::error::Error>> {
        Ok(load_model_path(self.model())?)
    }

    /// Load a processor for the model.
    pub fn load_processor(
        &self,
        options: ProcessorOptions,
    ) -> Result<Processor<u32>, Box<dyn std::error::Error>> {
        let processor = Processor::new(options);
        processor.load_path(self.model())?;
        Ok(processor)
    }
}
