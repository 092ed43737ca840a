mod build;
mod decode;
mod encode;
mod export_vocab;
mod help_markdown;
mod info;

/// Subcommands for pchipper
#[derive(clap::Subcommand, Debug)]
pub enum Commands {
    /// Encode text lines into ids or pieces.
    Encode(encode::EncodeArgs),

    /// Decode lines of ids into text.
    Decode(decode::DecodeArgs),

    /// Describe a model.
    Info(info::InfoArgs),

    /// Build a model from a text vocabulary.
    Build(build::BuildArgs),

    /// Export a model's vocabulary as text.
    ExportVocab(export_vocab::ExportVocabArgs),

    /// Print the command-line reference as markdown.
    #[clap(hide = true)]
    HelpMarkdown(help_markdown::HelpMarkdownArgs),
}

impl Commands {
    /// Run the subcommand.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        match self {
            Commands::Encode(cmd) => cmd.run(),
            Commands::Decode(cmd) => cmd.run(),
            Commands::Info(cmd) => cmd.run(),
            Commands::Build(cmd) => cmd.run(),
            Commands::ExportVocab(cmd) => cmd.run(),
            Commands::HelpMarkdown(cmd) => cmd.run(),
        }
    }
}
