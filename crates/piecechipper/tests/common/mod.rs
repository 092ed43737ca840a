#![allow(dead_code)]

use std::path::{Path, PathBuf};

use piecechipper::{
    PieceModel,
    PieceVocab,
    normalize::NormalizerConfig,
    vocab::{PieceKind, byte_piece_surface, io::save_model_path},
};

pub const WORDS: &[(&str, f32)] = &[
    ("▁", -2.0),
    ("▁hello", -3.0),
    ("▁world", -3.5),
    ("▁the", -2.5),
    ("▁a", -3.0),
    ("th", -4.2),
    ("he", -4.3),
    ("un", -0.1),
    ("do", -0.2),
    ("undo", -0.05),
    (",", -5.0),
    (".", -5.0),
];

/// `<unk>`, `<s>`, `</s>`, all 256 byte pieces, `WORDS`, and ascii letters.
pub fn vocab() -> PieceVocab<u32> {
    let specials = [
        ("<unk>", PieceKind::Unknown),
        ("<s>", PieceKind::Control),
        ("</s>", PieceKind::Control),
    ]
    .into_iter()
    .map(|(s, kind)| (s.as_bytes().to_vec(), 0.0, kind));

    let bytes = (0..=255u8).map(|b| (byte_piece_surface(b).into_bytes(), 0.0, PieceKind::Byte));

    let words = WORDS
        .iter()
        .map(|&(s, score)| (s.as_bytes().to_vec(), score, PieceKind::Normal));

    let letters = (b'a'..=b'z').map(|b| (vec![b], -6.0, PieceKind::Normal));

    PieceVocab::from_entries(specials.chain(bytes).chain(words).chain(letters)).unwrap()
}

pub fn model() -> PieceModel<u32> {
    vocab().into()
}

pub fn identity_model() -> PieceModel<u32> {
    PieceModel::new(NormalizerConfig::identity(), vocab())
}

/// Write `model` to `dir` and return its path.
pub fn write_model(
    dir: &Path,
    model: &PieceModel<u32>,
) -> PathBuf {
    let path = dir.join("model.pchp");
    save_model_path(model, &path).unwrap();
    path
}
