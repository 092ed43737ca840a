//! # Vocab Testing Tools

use crate::{
    types::TokenType,
    vocab::{PieceKind, PieceVocab, byte_piece_surface},
};

/// Normal pieces shared by the test vocabularies.
pub const TEST_NORMAL_PIECES: &[(&str, f32)] = &[
    ("▁", -2.0),
    ("▁hello", -3.0),
    ("▁world", -3.5),
    ("hello", -4.0),
    ("▁the", -2.5),
    ("th", -4.2),
    ("he", -4.3),
    ("un", -0.1),
    ("do", -0.2),
    ("undo", -0.05),
    (",", -5.0),
    (".", -5.0),
    ("!", -5.0),
];

fn ascii_letter_pieces() -> impl Iterator<Item = (Vec<u8>, f32, PieceKind)> {
    (b'a'..=b'z').map(|b| (vec![b], -6.0, PieceKind::Normal))
}

/// Create a test [`PieceVocab`] with `<unk>`, `<s>`, `</s>`,
/// a full set of byte-fallback pieces, a user-defined `<sep>`,
/// and a handful of scored words.
pub fn build_test_vocab<T: TokenType>() -> PieceVocab<T> {
    let specials = [
        ("<unk>", PieceKind::Unknown),
        ("<s>", PieceKind::Control),
        ("</s>", PieceKind::Control),
    ]
    .into_iter()
    .map(|(s, kind)| (s.as_bytes().to_vec(), 0.0, kind));

    let bytes = (0..=255u8).map(|b| (byte_piece_surface(b).into_bytes(), 0.0, PieceKind::Byte));

    let words = TEST_NORMAL_PIECES
        .iter()
        .map(|&(s, score)| (s.as_bytes().to_vec(), score, PieceKind::Normal));

    let user = [(b"<sep>".to_vec(), 0.0, PieceKind::UserDefined)];

    PieceVocab::from_entries(
        specials
            .chain(bytes)
            .chain(words)
            .chain(ascii_letter_pieces())
            .chain(user),
    )
    .unwrap()
}

/// Create a test [`PieceVocab`] with an `<unk>` piece but no byte fallback.
pub fn build_test_vocab_without_byte_fallback<T: TokenType>() -> PieceVocab<T> {
    let specials = [(b"<unk>".to_vec(), 0.0, PieceKind::Unknown)];

    let words = TEST_NORMAL_PIECES
        .iter()
        .map(|&(s, score)| (s.as_bytes().to_vec(), score, PieceKind::Normal));

    PieceVocab::from_entries(specials.into_iter().chain(words).chain(ascii_letter_pieces()))
        .unwrap()
}
