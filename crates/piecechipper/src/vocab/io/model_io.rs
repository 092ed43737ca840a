//! # Binary Model IO
//!
//! Version 1 layout, little-endian:
//!
//! ```text
//! magic          [u8; 4]  "PCHP"
//! version        u32
//! unicode_form   u8
//! flags          u8
//! reserved       u16
//! unk bos eos pad  i32 each; -1 when absent
//! piece_count    u32
//! piece_count x { kind u8, score f32, surface_len u32, surface [u8] }
//! ```

use std::{
    fs::File,
    io::{BufWriter, Read, Write},
    path::Path,
};

use crate::{
    errors::{LoadError, PCError, PCResult},
    normalize::NormalizerConfig,
    types::TokenType,
    vocab::{Piece, PieceKind, PieceModel, PieceVocab, SpecialIds, id_from_sentinel, id_or_sentinel},
};

/// Leading bytes of every model artifact.
pub const MODEL_MAGIC: &[u8; 4] = b"PCHP";

/// The model format version this build reads and writes.
pub const MODEL_VERSION: u32 = 1;

struct ByteCursor<'a> {
    bytes: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, pos: 0 }
    }

    fn remaining(&self) -> usize {
        self.bytes.len() - self.pos
    }

    fn take(
        &mut self,
        n: usize,
        what: &str,
    ) -> Result<&'a [u8], LoadError> {
        if self.remaining() < n {
            return Err(LoadError::corrupt(format!(
                "truncated {what} at byte {} (need {n}, have {})",
                self.pos,
                self.remaining()
            )));
        }
        let slice = &self.bytes[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn array<const N: usize>(
        &mut self,
        what: &str,
    ) -> Result<[u8; N], LoadError> {
        let mut buf = [0u8; N];
        buf.copy_from_slice(self.take(N, what)?);
        Ok(buf)
    }

    fn u8(
        &mut self,
        what: &str,
    ) -> Result<u8, LoadError> {
        Ok(self.array::<1>(what)?[0])
    }

    fn u16(
        &mut self,
        what: &str,
    ) -> Result<u16, LoadError> {
        Ok(u16::from_le_bytes(self.array(what)?))
    }

    fn u32(
        &mut self,
        what: &str,
    ) -> Result<u32, LoadError> {
        Ok(u32::from_le_bytes(self.array(what)?))
    }

    fn i32(
        &mut self,
        what: &str,
    ) -> Result<i32, LoadError> {
        Ok(i32::from_le_bytes(self.array(what)?))
    }

    fn f32(
        &mut self,
        what: &str,
    ) -> Result<f32, LoadError> {
        Ok(f32::from_le_bytes(self.array(what)?))
    }
}

fn special_from_header<T: TokenType>(
    name: &str,
    raw: i32,
) -> Result<Option<T>, LoadError> {
    if raw < -1 {
        return Err(LoadError::corrupt(format!("{name} id {raw} is negative")));
    }
    let id = id_from_sentinel::<T>(raw);
    if raw >= 0 && id.is_none() {
        return Err(LoadError::corrupt(format!(
            "{name} id {raw} exceeds token type capacity"
        )));
    }
    Ok(id)
}

fn vocab_error_to_load(err: PCError) -> LoadError {
    match err {
        PCError::Load(err) => err,
        other => LoadError::Corrupt(other.to_string()),
    }
}

/// Parse a [`PieceModel`] from the bytes of a model artifact.
///
/// ## Errors
/// * [`LoadError::UnsupportedVersion`] for any version other than [`MODEL_VERSION`].
/// * [`LoadError::Corrupt`] for bad magic, truncation, trailing bytes, or
///   vocabulary validation failures.
pub fn read_model_bytes<T: TokenType>(bytes: &[u8]) -> Result<PieceModel<T>, LoadError> {
    let mut cursor = ByteCursor::new(bytes);

    if &cursor.array::<4>("magic")? != MODEL_MAGIC {
        return Err(LoadError::corrupt("bad magic"));
    }
    let version = cursor.u32("version")?;
    if version != MODEL_VERSION {
        return Err(LoadError::UnsupportedVersion {
            found: version,
            supported: MODEL_VERSION,
        });
    }

    let unicode_form = cursor.u8("unicode form")?;
    let flags = cursor.u8("normalizer flags")?;
    let normalizer = NormalizerConfig::from_tags(unicode_form, flags)?;
    if cursor.u16("reserved")? != 0 {
        return Err(LoadError::corrupt("reserved header field is nonzero"));
    }

    let specials = SpecialIds::<T> {
        unk: special_from_header("unk", cursor.i32("unk id")?)?,
        bos: special_from_header("bos", cursor.i32("bos id")?)?,
        eos: special_from_header("eos", cursor.i32("eos id")?)?,
        pad: special_from_header("pad", cursor.i32("pad id")?)?,
    };

    let piece_count = cursor.u32("piece count")? as usize;
    // Each piece needs at least 9 bytes; reject absurd counts before allocating.
    if piece_count > cursor.remaining() / 9 {
        return Err(LoadError::corrupt(format!(
            "piece count {piece_count} exceeds artifact size"
        )));
    }

    let mut pieces = Vec::with_capacity(piece_count);
    for idx in 0..piece_count {
        let kind = PieceKind::from_tag(cursor.u8("piece kind")?)?;
        let score = cursor.f32("piece score")?;
        let len = cursor.u32("piece length")? as usize;
        let surface = cursor.take(len, "piece surface")?.to_vec();
        let id = T::from_usize(idx)
            .ok_or_else(|| LoadError::corrupt(format!("piece count {piece_count} exceeds token type capacity")))?;
        pieces.push(Piece {
            id,
            surface,
            score,
            kind,
        });
    }

    if cursor.remaining() != 0 {
        return Err(LoadError::corrupt(format!(
            "{} trailing bytes after piece table",
            cursor.remaining()
        )));
    }

    let vocab = PieceVocab::from_pieces(pieces, specials).map_err(vocab_error_to_load)?;
    Ok(PieceModel::new(normalizer, vocab))
}

/// Read a [`PieceModel`] from a reader.
pub fn read_model<T, R>(reader: &mut R) -> PCResult<PieceModel<T>>
where
    T: TokenType,
    R: Read,
{
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    Ok(read_model_bytes(&bytes)?)
}

/// Load a [`PieceModel`] from a model file.
///
/// ## Arguments
/// * `path` - the path to the model artifact.
///
/// ## Errors
/// [`LoadError::NotFound`] when the file does not exist; see
/// [`read_model_bytes`] for format errors.
pub fn load_model_path<T, P>(path: P) -> PCResult<PieceModel<T>>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|err| match err.kind() {
        std::io::ErrorKind::NotFound => PCError::Load(LoadError::NotFound {
            path: path.to_path_buf(),
        }),
        _ => PCError::Io(err),
    })?;
    Ok(read_model_bytes(&bytes)?)
}

/// Serialize a [`PieceModel`] to bytes.
pub fn model_to_bytes<T: TokenType>(model: &PieceModel<T>) -> PCResult<Vec<u8>> {
    let vocab = model.vocab();
    let piece_count =
        u32::try_from(vocab.len()).map_err(|_| PCError::VocabSizeOverflow { size: vocab.len() })?;

    let mut buf = Vec::with_capacity(32 + vocab.pieces().iter().map(|p| 9 + p.surface.len()).sum::<usize>());
    buf.extend_from_slice(MODEL_MAGIC);
    buf.extend_from_slice(&MODEL_VERSION.to_le_bytes());

    let normalizer = model.normalizer_config();
    buf.push(normalizer.unicode_form().tag());
    buf.push(normalizer.flags());
    buf.extend_from_slice(&0u16.to_le_bytes());

    let specials = vocab.specials();
    for id in [specials.unk, specials.bos, specials.eos, specials.pad] {
        if id.is_some_and(|id| id.to_i32().is_none()) {
            return Err(PCError::VocabSizeOverflow { size: vocab.len() });
        }
        buf.extend_from_slice(&id_or_sentinel(id).to_le_bytes());
    }

    buf.extend_from_slice(&piece_count.to_le_bytes());
    for piece in vocab.pieces() {
        let len = u32::try_from(piece.surface.len()).map_err(|_| {
            PCError::VocabConflict(format!("piece {} surface is too long", piece.id))
        })?;
        buf.push(piece.kind.tag());
        buf.extend_from_slice(&piece.score.to_le_bytes());
        buf.extend_from_slice(&len.to_le_bytes());
        buf.extend_from_slice(&piece.surface);
    }
    Ok(buf)
}

/// Write a [`PieceModel`] to a writer.
pub fn write_model<T, W>(
    model: &PieceModel<T>,
    writer: &mut W,
) -> PCResult<()>
where
    T: TokenType,
    W: Write,
{
    writer.write_all(&model_to_bytes(model)?)?;
    Ok(())
}

/// Save a [`PieceModel`] to a model file.
///
/// ## Arguments
/// * `model` - the model to save.
/// * `path` - the path to save the model to.
pub fn save_model_path<T, P>(
    model: &PieceModel<T>,
    path: P,
) -> PCResult<()>
where
    T: TokenType,
    P: AsRef<Path>,
{
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_model(model, &mut writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        normalize::UnicodeForm,
        vocab::utility::testing::build_test_vocab,
    };

    fn test_model() -> PieceModel<u32> {
        PieceModel::new(
            NormalizerConfig::default()
                .with_unicode_form(UnicodeForm::Nfc)
                .with_remove_extra_whitespaces(false),
            build_test_vocab(),
        )
    }

    #[test]
    fn test_bytes_roundtrip() {
        let model = test_model();
        let bytes = model_to_bytes(&model).unwrap();
        assert_eq!(&bytes[..4], MODEL_MAGIC);

        let loaded: PieceModel<u32> = read_model_bytes(&bytes).unwrap();
        assert_eq!(loaded, model);
    }

    #[test]
    fn test_save_load_path() {
        let model = test_model();

        tempdir::TempDir::new("model_test")
            .and_then(|dir| {
                let path = dir.path().join("test.pchp");

                save_model_path(&model, &path).expect("Failed to save model");
                let loaded: PieceModel<u32> =
                    load_model_path(&path).expect("Failed to load model");
                assert_eq!(loaded, model);

                let missing = load_model_path::<u32, _>(dir.path().join("missing.pchp"));
                assert!(matches!(
                    missing,
                    Err(PCError::Load(LoadError::NotFound { .. }))
                ));

                Ok(())
            })
            .unwrap();
    }

    #[test]
    fn test_truncated() {
        let bytes = model_to_bytes(&test_model()).unwrap();
        for cut in [0, 3, 4, 9, 20, 32, bytes.len() / 2, bytes.len() - 1] {
            let res = read_model_bytes::<u32>(&bytes[..cut]);
            assert!(
                matches!(res, Err(LoadError::Corrupt(_))),
                "cut at {cut}: {res:?}"
            );
        }
    }

    #[test]
    fn test_trailing_bytes() {
        let mut bytes = model_to_bytes(&test_model()).unwrap();
        bytes.push(0);
        assert!(matches!(
            read_model_bytes::<u32>(&bytes),
            Err(LoadError::Corrupt(_))
        ));
    }

    #[test]
    fn test_bad_magic_and_version() {
        let mut bytes = model_to_bytes(&test_model()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(
            read_model_bytes::<u32>(&bytes),
            Err(LoadError::Corrupt(_))
        ));

        let mut bytes = model_to_bytes(&test_model()).unwrap();
        bytes[4..8].copy_from_slice(&2u32.to_le_bytes());
        assert!(matches!(
            read_model_bytes::<u32>(&bytes),
            Err(LoadError::UnsupportedVersion {
                found: 2,
                supported: 1
            })
        ));
    }

    #[test]
    fn test_duplicate_surface_is_corrupt() {
        let vocab = PieceVocab::<u32>::from_entries([
            ("<unk>", 0.0, PieceKind::Unknown),
            ("a", -1.0, PieceKind::Normal),
            ("b", -1.0, PieceKind::Normal),
        ])
        .unwrap();
        let mut bytes = model_to_bytes(&PieceModel::from(vocab)).unwrap();
        // Rewrite the final surface "b" as "a".
        let last = bytes.len() - 1;
        bytes[last] = b'a';

        assert!(matches!(
            read_model_bytes::<u32>(&bytes),
            Err(LoadError::Corrupt(_))
        ));
    }

    #[test]
    fn test_bad_special_id_is_corrupt() {
        let mut bytes = model_to_bytes(&test_model()).unwrap();
        // bos id lives after magic, version, form, flags, reserved, unk.
        bytes[16..20].copy_from_slice(&10_000i32.to_le_bytes());
        assert!(matches!(
            read_model_bytes::<u32>(&bytes),
            Err(LoadError::Corrupt(_))
        ));

        let mut bytes = model_to_bytes(&test_model()).unwrap();
        bytes[16..20].copy_from_slice(&(-7i32).to_le_bytes());
        assert!(matches!(
            read_model_bytes::<u32>(&bytes),
            Err(LoadError::Corrupt(_))
        ));
    }

    #[test]
    fn test_non_finite_score_is_corrupt() {
        let vocab = PieceVocab::<u32>::from_entries([("<unk>", 0.0, PieceKind::Unknown)]).unwrap();
        let mut bytes = model_to_bytes(&PieceModel::from(vocab)).unwrap();
        // Header is 32 bytes; the first piece's score follows its kind tag.
        bytes[33..37].copy_from_slice(&f32::NAN.to_le_bytes());
        assert!(matches!(
            read_model_bytes::<u32>(&bytes),
            Err(LoadError::Corrupt(_))
        ));
    }
}
