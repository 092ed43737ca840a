//! # Text Vocabulary IO
//!
//! One piece per line, in id order:
//!
//! ```text
//! <surface>\t<score>[\t<kind>]
//! ```
//!
//! When the kind column is absent it is inferred from the surface:
//! `<unk>` is unknown; `<s>`, `</s>`, and `<pad>` are control;
//! `<0xHH>` is a byte piece; anything else is normal.

use std::{
    fs::File,
    io::{BufRead, BufReader, BufWriter, Write},
    path::Path,
};

use crate::{
    errors::{PCError, PCResult},
    types::TokenType,
    vocab::{
        PieceKind,
        PieceVocab,
        parse_byte_piece,
        special_ids::{BOS_SURFACE, EOS_SURFACE, PAD_SURFACE, UNK_SURFACE},
    },
};

/// Infer the kind of a piece from its surface.
pub fn infer_piece_kind(surface: &[u8]) -> PieceKind {
    match surface {
        s if s == UNK_SURFACE.as_bytes() => PieceKind::Unknown,
        s if s == BOS_SURFACE.as_bytes()
            || s == EOS_SURFACE.as_bytes()
            || s == PAD_SURFACE.as_bytes() =>
        {
            PieceKind::Control
        }
        s if parse_byte_piece(s).is_some() => PieceKind::Byte,
        _ => PieceKind::Normal,
    }
}

/// Load a [`PieceVocab`] from a text vocab file.
///
/// # Arguments
/// * `path` - the path to the vocabulary file.
pub fn load_text_vocab_path<T, P>(path: P) -> PCResult<PieceVocab<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let file = File::open(path)?;
    let reader = BufReader::new(file);

    read_text_vocab(reader)
}

/// Read a [`PieceVocab`] from a text vocab [`BufRead`] stream.
///
/// Blank lines are skipped; special ids are inferred.
pub fn read_text_vocab<T, R>(reader: R) -> PCResult<PieceVocab<T>>
where
    T: TokenType,
    R: BufRead,
{
    let mut entries = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        entries.push(parse_line(line).map_err(|msg| {
            PCError::Parse(format!("line {}: {msg}", idx + 1))
        })?);
    }
    log::debug!("read {} text vocab entries", entries.len());
    PieceVocab::from_entries(entries)
}

fn parse_line(line: &str) -> Result<(Vec<u8>, f32, PieceKind), String> {
    let mut fields = line.split('\t');
    let surface = fields.next().unwrap_or_default();
    if surface.is_empty() {
        return Err("empty piece".to_string());
    }

    let score = match fields.next() {
        Some(s) => s
            .trim()
            .parse::<f32>()
            .map_err(|e| format!("bad score {s:?}: {e}"))?,
        None => 0.0,
    };

    let kind = match fields.next() {
        Some(k) => k.trim().parse::<PieceKind>().map_err(|e| e.to_string())?,
        None => infer_piece_kind(surface.as_bytes()),
    };

    if fields.next().is_some() {
        return Err("too many fields".to_string());
    }

    Ok((surface.as_bytes().to_vec(), score, kind))
}

/// Save a [`PieceVocab`] to a text vocab file.
///
/// # Arguments
/// * `vocab` - the vocabulary to save.
/// * `path` - the path to save the vocabulary to.
pub fn save_text_vocab_path<T: TokenType, P: AsRef<Path>>(
    vocab: &PieceVocab<T>,
    path: P,
) -> PCResult<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);

    write_text_vocab(vocab, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Save a [`PieceVocab`] to a [`Write`] writer.
///
/// The kind column is written only when it differs from the inferred kind.
pub fn write_text_vocab<T, W>(
    vocab: &PieceVocab<T>,
    writer: &mut W,
) -> PCResult<()>
where
    T: TokenType,
    W: Write,
{
    for piece in vocab.pieces() {
        let surface = core::str::from_utf8(&piece.surface)
            .ok()
            .filter(|s| !s.contains(['\t', '\n', '\r']))
            .ok_or_else(|| {
                PCError::VocabConflict(format!(
                    "piece {} {:?} cannot be written as a text line",
                    piece.id,
                    piece.surface_lossy()
                ))
            })?;

        write!(writer, "{surface}\t{}", piece.score)?;
        if infer_piece_kind(&piece.surface) != piece.kind {
            write!(writer, "\t{}", piece.kind.name())?;
        }
        writeln!(writer)?;
    }
    Ok(())
}
