//! # Viterbi Segmenter

use std::sync::Arc;

use crate::{
    errors::EncodingError,
    segmentation::{LatticeEdge, Segment, SegmentKind, SegmentationLattice},
    trie::PieceTrie,
    types::TokenType,
    vocab::{PieceKind, PieceVocab},
};

/// Penalty below the lowest piece score given to unknown spans.
pub const UNK_PENALTY: f32 = 10.0;

/// Length of the UTF-8 sequence starting at `offset`.
pub(crate) fn char_len_at(
    text: &[u8],
    offset: usize,
) -> Result<usize, EncodingError> {
    let malformed = EncodingError::MalformedInput { offset };
    let expected = match text.get(offset).ok_or(malformed)? {
        0x00..=0x7f => 1,
        0xc2..=0xdf => 2,
        0xe0..=0xef => 3,
        0xf0..=0xf4 => 4,
        _ => return Err(malformed),
    };
    let seq = text.get(offset..offset + expected).ok_or(malformed)?;
    match core::str::from_utf8(seq) {
        Ok(_) => Ok(expected),
        Err(_) => Err(malformed),
    }
}

/// Splits normalized text into scored pieces.
///
/// Holds the vocabulary and its trie; both are immutable, so one segmenter
/// serves any number of concurrent calls, each with its own lattice.
///
/// ## Style Hints
/// Instance names should prefer `segmenter`.
#[derive(Debug, Clone)]
pub struct Segmenter<T: TokenType> {
    vocab: Arc<PieceVocab<T>>,
    trie: Arc<PieceTrie<T>>,
    unk_score: f32,
    user_defined_unit: f32,
}

impl<T: TokenType> Segmenter<T> {
    /// Build a segmenter, indexing the vocabulary's matchable pieces.
    pub fn new(vocab: Arc<PieceVocab<T>>) -> Self {
        let trie = Arc::new(PieceTrie::from_vocab(&vocab));
        Self::from_parts(vocab, trie)
    }

    /// Build a segmenter from a vocabulary and a prebuilt trie.
    pub fn from_parts(
        vocab: Arc<PieceVocab<T>>,
        trie: Arc<PieceTrie<T>>,
    ) -> Self {
        let unk_score = vocab.min_score() - UNK_PENALTY;
        let user_defined_unit = vocab.max_score().max(0.0) + 1.0;
        Self {
            vocab,
            trie,
            unk_score,
            user_defined_unit,
        }
    }

    /// Get the vocabulary.
    pub fn vocab(&self) -> &Arc<PieceVocab<T>> {
        &self.vocab
    }

    /// Get the trie.
    pub fn trie(&self) -> &Arc<PieceTrie<T>> {
        &self.trie
    }

    /// The score given to an unknown span.
    pub fn unk_score(&self) -> f32 {
        self.unk_score
    }

    /// The lattice score of a matched piece covering `len` bytes.
    ///
    /// User-defined pieces score `len * (max(max_score, 0) + 1) - 1`: above
    /// any decomposition of the same span, including one into shorter
    /// user-defined pieces.
    pub fn piece_score(
        &self,
        token: T,
        len: usize,
    ) -> f32 {
        match self.vocab.piece_at(token) {
            Some(piece) if piece.kind == PieceKind::UserDefined => {
                len as f32 * self.user_defined_unit - 1.0
            }
            Some(piece) => piece.score,
            None => self.unk_score,
        }
    }

    /// Visit every lattice edge leaving `start`.
    ///
    /// Piece edges come first, shortest to longest. An unknown edge over one
    /// character (one byte when malformed) follows when no piece covers
    /// exactly that character.
    pub fn for_each_edge<F>(
        &self,
        text: &[u8],
        start: usize,
        mut visit: F,
    ) where
        F: FnMut(LatticeEdge<T>),
    {
        let char_end = start + char_len_at(text, start).unwrap_or(1);
        let mut has_single = false;

        for m in self.trie.prefix_matches(text, start) {
            has_single |= m.end == char_end;
            visit(LatticeEdge {
                segment: Segment {
                    start,
                    end: m.end,
                    kind: SegmentKind::Piece(m.token),
                },
                score: self.piece_score(m.token, m.end - start),
            });
        }

        if !has_single {
            visit(LatticeEdge {
                segment: Segment {
                    start,
                    end: char_end,
                    kind: SegmentKind::Unknown,
                },
                score: self.unk_score,
            });
        }
    }

    /// Find the best-scoring segmentation of normalized text.
    ///
    /// Never fails; unmatched characters and malformed bytes become
    /// [`SegmentKind::Unknown`] segments. On equal scores the longer
    /// piece reaching an offset wins.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn segment(
        &self,
        text: &[u8],
    ) -> Vec<Segment<T>> {
        let mut lattice = SegmentationLattice::new(text.len());
        for start in 0..text.len() {
            let Some(base) = lattice.score_at(start) else {
                continue;
            };
            self.for_each_edge(text, start, |edge| lattice.relax(base, edge));
        }
        lattice.backtrack()
    }
}
