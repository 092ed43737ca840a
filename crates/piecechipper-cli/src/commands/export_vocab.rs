use std::io::Write;

use piecechipper::vocab::io::write_text_vocab;

use crate::{input_output::OutputArgs, model_selector::ModelSelectorArgs};

/// Args for the export-vocab command.
#[derive(clap::Args, Debug)]
pub struct ExportVocabArgs {
    #[command(flatten)]
    model_selector: ModelSelectorArgs,

    #[command(flatten)]
    output: OutputArgs,
}

impl ExportVocabArgs {
    /// Run the export-vocab command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let model = self.model_selector.load_model()?;

        let mut writer = self.output.open_writer()?;
        write_text_vocab(model.vocab(), &mut writer)?;
        writer.flush()?;

        Ok(())
    }
}
