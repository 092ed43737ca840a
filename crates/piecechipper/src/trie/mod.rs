//! # Piece Trie
//!
//! [`PieceTrie`] is a byte-level prefix tree over the matchable pieces of a
//! [`crate::vocab::PieceVocab`]. [`PieceTrie::prefix_matches`] yields every piece
//! whose surface is a prefix of `text[offset..]`, shortest first.

pub mod piece_trie;

#[doc(inline)]
pub use piece_trie::{PieceTrie, PrefixMatch, PrefixMatches};
