use piecechipper::vocab::PieceKind;

use crate::model_selector::ModelSelectorArgs;

/// Args for the info command.
#[derive(clap::Args, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    model_selector: ModelSelectorArgs,
}

fn show_id(id: Option<u32>) -> String {
    id.map_or_else(|| "-".to_string(), |id| id.to_string())
}

impl InfoArgs {
    /// Run the info command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        let model = self.model_selector.load_model()?;
        let vocab = model.vocab();
        let config = model.normalizer_config();

        println!("model: {}", self.model_selector.model());
        println!("vocab size: {}", vocab.len());
        println!("unk: {}", show_id(vocab.unk_id()));
        println!("bos: {}", show_id(vocab.bos_id()));
        println!("eos: {}", show_id(vocab.eos_id()));
        println!("pad: {}", show_id(vocab.pad_id()));
        println!("byte fallback: {}", vocab.has_byte_fallback());
        println!("score range: [{}, {}]", vocab.min_score(), vocab.max_score());

        println!("normalizer:");
        println!("  unicode form: {}", config.unicode_form().name());
        println!("  add dummy prefix: {}", config.add_dummy_prefix());
        println!(
            "  remove extra whitespaces: {}",
            config.remove_extra_whitespaces()
        );
        println!("  escape whitespaces: {}", config.escape_whitespaces());

        println!("pieces:");
        for kind in [
            PieceKind::Normal,
            PieceKind::Unknown,
            PieceKind::Control,
            PieceKind::Byte,
            PieceKind::UserDefined,
        ] {
            let count = vocab.pieces().iter().filter(|p| p.kind == kind).count();
            println!("  {}: {count}", kind.name());
        }

        Ok(())
    }
}
