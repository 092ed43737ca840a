use std::io::{BufRead, Write};

use piecechipper::{PCError, Processor, ProcessorOptions};

use crate::{
    input_output::{InputArgs, OutputArgs},
    logging::LogArgs,
    model_selector::ModelSelectorArgs,
};

/// Args for the decode command.
#[derive(clap::Args, Debug)]
pub struct DecodeArgs {
    #[command(flatten)]
    model_selector: ModelSelectorArgs,

    #[command(flatten)]
    input: InputArgs,

    #[command(flatten)]
    output: OutputArgs,

    #[clap(flatten)]
    logging: LogArgs,
}

impl DecodeArgs {
    /// Run the decode command.
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error>> {
        self.logging.setup_logging(2)?;

        let processor = self
            .model_selector
            .load_processor(ProcessorOptions::default())?;

        let mut reader = self.input.open_reader()?;
        let mut writer = self.output.open_writer()?;
        run_decode(&processor, &mut reader, &mut writer)?;

        processor.release();
        Ok(())
    }
}

fn parse_ids(line: &str) -> Result<Vec<i64>, PCError> {
    line.split_whitespace()
        .map(|s| {
            s.parse::<i64>()
                .map_err(|err| PCError::Parse(format!("bad id {s:?}: {err}")))
        })
        .collect()
}

fn run_decode(
    processor: &Processor<u32>,
    reader: &mut dyn BufRead,
    writer: &mut dyn Write,
) -> Result<(), Box<dyn std::error::Error>> {
    for (idx, line) in reader.lines().enumerate() {
        let ids = parse_ids(&line?).map_err(|err| format!("line {}: {err}", idx + 1))?;
        let text = processor.decode_i64(&ids)?;

        writeln!(writer, "{text}")?;
        writer.flush()?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use piecechipper::vocab::utility::testing::build_test_vocab;

    use super::*;

    #[test]
    fn test_parse_ids() {
        assert_eq!(parse_ids(" 1 2\t3 ").unwrap(), vec![1, 2, 3]);
        assert!(parse_ids("").unwrap().is_empty());
        assert!(matches!(parse_ids("1 x"), Err(PCError::Parse(_))));
    }

    #[test]
    fn test_run_decode() {
        let processor: Processor<u32> = Processor::default();
        processor.load_model(build_test_vocab().into()).unwrap();

        let ids = processor.encode("hello world").unwrap();
        let line = ids
            .iter()
            .map(|id| id.to_string())
            .collect::<Vec<_>>()
            .join(" ");
        let input = format!("{line}\n\n");

        let mut out = Vec::new();
        run_decode(&processor, &mut input.as_bytes(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "hello world\n\n");

        let mut out = Vec::new();
        assert!(run_decode(&processor, &mut "1 -7\n".as_bytes(), &mut out).is_err());
    }
}
