use std::io::{BufRead, Write};

use piecechipper::{Processor, ProcessorOptions, TokenEncoderOptions};

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    model_selector::ModelSelectorArgs,
};

/// Args for the encode command.
#[derive(clap::Args, Debug)]
pub struct EncodeArgs {
    #[command(flatten)]
    model_selector: ModelSelectorArgs,

    /// Prepend the beginning-of-sequence id.
    #[arg(long)]
    bos: bool,

    /// Append the end-of-sequence id.
    #[arg(long)]
    eos: bool,

    /// Write piece surfaces instead of ids.
    #[arg(long)]
    pieces: bool,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    logging: LogArgs,
}

impl EncodeArgs {
    /// Run the encode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let options = ProcessorOptions::default().with_encoder(
            TokenEncoderOptions::default()
                .with_add_bos(self.bos)
                .with_add_eos(self.eos),
        );
        let processor = self.model_selector.load_processor(options)?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;
        run_encode(&processor, &mut reader, &mut writer, self.pieces)?;

        processor.release();
        Ok(())
    }
}

fn run_encode(
    processor: &Processor<u32>,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
    pieces: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let mut line = String::new();
    while reader.read_line(&mut line)? > 0 {
        let text = line.trim_end_matches(['\r', '\n']);

        let fields: Vec<String> = if pieces {
            processor.encode_as_pieces(text)?
        } else {
            processor
                .encode(text)?
                .iter()
                .map(|id| id.to_string())
                .collect()
        };
        writeln!(writer, "{}", fields.join(" "))?;
        writer.flush()?;

        line.clear();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use piecechipper::vocab::utility::testing::build_test_vocab;

    use super::*;

    #[test]
    fn test_run_encode() {
        let processor: Processor<u32> = Processor::default();
        processor.load_model(build_test_vocab().into()).unwrap();

        let mut out = Vec::new();
        run_encode(&processor, &mut "undo\nhello world\r\n".as_bytes(), &mut out, true).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "▁ undo\n▁hello ▁world\n");

        let expected = processor.encode("hello").unwrap();
        let mut out = Vec::new();
        run_encode(&processor, &mut "hello".as_bytes(), &mut out, false).unwrap();
        let ids: Vec<u32> = String::from_utf8(out)
            .unwrap()
            .split_whitespace()
            .map(|s| s.parse().unwrap())
            .collect();
        assert_eq!(ids, expected);
    }
}
