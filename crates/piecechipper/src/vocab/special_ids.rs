//! # Special Piece Ids

use crate::{
    types::TokenType,
    vocab::{Piece, PieceKind},
};

/// Conventional surface of the unknown piece.
pub const UNK_SURFACE: &str = "<unk>";

/// Conventional surface of the beginning-of-sequence piece.
pub const BOS_SURFACE: &str = "<s>";

/// Conventional surface of the end-of-sequence piece.
pub const EOS_SURFACE: &str = "</s>";

/// Conventional surface of the padding piece.
pub const PAD_SURFACE: &str = "<pad>";

/// The named special ids of a vocabulary.
///
/// Each may be absent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SpecialIds<T: TokenType> {
    /// The unknown piece.
    pub unk: Option<T>,

    /// Beginning of sequence.
    pub bos: Option<T>,

    /// End of sequence.
    pub eos: Option<T>,

    /// Padding.
    pub pad: Option<T>,
}

impl<T: TokenType> SpecialIds<T> {
    /// Infer special ids from piece kinds and conventional surfaces.
    ///
    /// `unk` is the (first) [`PieceKind::Unknown`] piece; `bos`, `eos`, and `pad`
    /// are [`PieceKind::Control`] pieces named `<s>`, `</s>`, and `<pad>`.
    pub fn infer(pieces: &[Piece<T>]) -> Self {
        let mut ids = Self::default();
        for piece in pieces {
            match piece.kind {
                PieceKind::Unknown if ids.unk.is_none() => ids.unk = Some(piece.id),
                PieceKind::Control => match piece.surface.as_slice() {
                    s if s == BOS_SURFACE.as_bytes() => ids.bos = Some(piece.id),
                    s if s == EOS_SURFACE.as_bytes() => ids.eos = Some(piece.id),
                    s if s == PAD_SURFACE.as_bytes() => ids.pad = Some(piece.id),
                    _ => {}
                },
                _ => {}
            }
        }
        ids
    }

    /// Iterate over the `(name, id)` pairs which are present.
    pub fn present(&self) -> impl Iterator<Item = (&'static str, T)> {
        [
            ("unk", self.unk),
            ("bos", self.bos),
            ("eos", self.eos),
            ("pad", self.pad),
        ]
        .into_iter()
        .filter_map(|(name, id)| id.map(|id| (name, id)))
    }
}

/// Convert an optional id to the boundary `-1` sentinel form.
pub fn id_or_sentinel<T: TokenType>(id: Option<T>) -> i32 {
    id.and_then(|id| id.to_i32()).unwrap_or(-1)
}

/// Convert a boundary `-1` sentinel to an optional id.
pub fn id_from_sentinel<T: TokenType>(id: i32) -> Option<T> {
    if id < 0 { None } else { T::from_i32(id) }
}
