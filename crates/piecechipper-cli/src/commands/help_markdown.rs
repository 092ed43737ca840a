/// Args for the markdown help command.
#[derive(clap::Args, Debug)]
pub struct HelpMarkdownArgs {}

impl HelpMarkdownArgs {
    /// Print the markdown reference.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        clap_markdown::print_help_markdown::<crate::Args>();
        Ok(())
    }
}
