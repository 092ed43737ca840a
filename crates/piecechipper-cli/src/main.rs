//! # `pchipper`
//!
//! Command-line encoding, decoding, and model building for `piecechipper`.

mod commands;
mod input_output;
mod logging;
mod model_selector;

use clap::Parser;
use commands::Commands;

/// pchipper
#[derive(clap::Parser, Debug)]
#[command(version, about)]
pub struct Args {
    /// Subcommand to run.
    #[clap(subcommand)]
    pub command: Commands,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    args.command.run()
}
