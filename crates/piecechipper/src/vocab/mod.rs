//! # Vocabulary
//!
//! This module provides the piece vocabulary and its io mechanisms.
//!
//! ## Piece Vocabulary
//!
//! [`PieceVocab`] is the immutable table of scored [`Piece`]s, indexed by
//! dense id and by surface, with the named [`SpecialIds`] and the optional
//! `<0xHH>` byte-fallback pieces.
//!
//! ## Piece Model
//!
//! The primary user-oriented artifact is [`PieceModel`], which contains:
//! * `normalizer` - a [`crate::normalize::NormalizerConfig`],
//! * `vocab` - a shared [`PieceVocab`].
//!
//! See [`io`] for the binary model format and the text `.vocab` format.
pub mod io;

pub mod piece;
pub mod piece_model;
pub mod piece_vocab;
pub mod special_ids;
pub mod utility;
pub mod validators;

#[doc(inline)]
pub use piece::{Piece, PieceKind, byte_piece_surface, parse_byte_piece};
#[doc(inline)]
pub use piece_model::PieceModel;
#[doc(inline)]
pub use piece_vocab::{PieceEntry, PieceVocab};
#[doc(inline)]
pub use special_ids::{SpecialIds, id_from_sentinel, id_or_sentinel};
