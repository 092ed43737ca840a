use piecechipper::{
    PieceModel,
    PieceVocab,
    normalize::{NormalizerConfig, UnicodeForm},
    vocab::io::{load_text_vocab_path, save_model_path},
};

use crate::logging::LogArgs;

/// Args for the build command.
#[derive(clap::Args, Debug)]
pub struct BuildArgs {
    /// Text vocabulary: `surface<TAB>score[<TAB>kind]` per line.
    #[arg(long)]
    vocab: String,

    /// Model artifact to write.
    #[arg(long)]
    output: String,

    /// Unicode normalization form: none, nfc, or nfkc.
    #[arg(long, default_value = "nfkc")]
    unicode_form: UnicodeForm,

    /// Do not prepend the whitespace marker.
    #[arg(long)]
    no_dummy_prefix: bool,

    /// Keep runs of whitespace and leading/trailing whitespace.
    #[arg(long)]
    keep_extra_whitespaces: bool,

    #[clap(flatten)]
    logging: LogArgs,
}

impl BuildArgs {
    /// Run the build command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(3)?;

        log::info!("reading vocab: {}", self.vocab);
        let vocab: PieceVocab<u32> = load_text_vocab_path(&self.vocab)?;
        log::info!(
            "vocab size: {} (byte fallback: {})",
            vocab.len(),
            vocab.has_byte_fallback()
        );

        let config = NormalizerConfig::default()
            .with_unicode_form(self.unicode_form)
            .with_add_dummy_prefix(!self.no_dummy_prefix)
            .with_remove_extra_whitespaces(!self.keep_extra_whitespaces);
        let model = PieceModel::new(config, vocab);

        save_model_path(&model, &self.output)?;
        log::info!("wrote model: {}", self.output);

        Ok(())
    }
}
