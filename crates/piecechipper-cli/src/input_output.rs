//! `--input` / `--output` arguments; `-` or an absent path means stdio.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
};

/// The file path, or `None` for stdio.
fn file_path(path: Option<&str>) -> Option<&str> {
    path.filter(|p| *p != "-")
}

/// Input argument group.
#[derive(clap::Args, Debug, Default)]
pub struct InputArgs {
    /// Input file; "-" or absent reads stdin.
    #[clap(long)]
    pub input: Option<String>,
}

impl InputArgs {
    /// Open a buffered reader over the file or stdin.
    pub fn open_reader(&self) -> Result<Box<dyn BufRead>, Box<dyn std::error::Error>> {
        let reader: Box<dyn BufRead> = match file_path(self.input.as_deref()) {
            Some(path) => Box::new(BufReader::new(File::open(path)?)),
            None => Box::new(std::io::stdin().lock()),
        };
        Ok(reader)
    }
}

/// Output argument group.
#[derive(clap::Args, Debug, Default)]
pub struct OutputArgs {
    /// Output file; "-" or absent writes stdout.
    #[clap(long)]
    pub output: Option<String>,
}

impl OutputArgs {
    /// Open a buffered writer over the file or stdout.
    pub fn open_writer(&self) -> Result<Box<dyn Write>, Box<dyn std::error::Error>> {
        let writer: Box<dyn Write> = match file_path(self.output.as_deref()) {
            Some(path) => Box::new(BufWriter::new(File::create(path)?)),
            None => Box::new(BufWriter::new(std::io::stdout().lock())),
        };
        Ok(writer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_path() {
        assert_eq!(file_path(None), None);
        assert_eq!(file_path(Some("-")), None);
        assert_eq!(file_path(Some("model.vocab")), Some("model.vocab"));
    }
}
