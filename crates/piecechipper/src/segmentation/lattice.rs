//! # Segmentation Lattice

use crate::types::TokenType;

/// What covers a segment of normalized text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SegmentKind<T: TokenType> {
    /// A vocabulary piece.
    Piece(T),

    /// No matchable piece covers this character (or malformed byte).
    Unknown,
}

/// A `[start, end)` byte range of normalized text and what covers it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Segment<T: TokenType> {
    /// Start byte offset.
    pub start: usize,

    /// End byte offset (exclusive).
    pub end: usize,

    /// The covering piece, or unknown.
    pub kind: SegmentKind<T>,
}

impl<T: TokenType> Segment<T> {
    /// The covered bytes of `text`.
    pub fn bytes<'a>(
        &self,
        text: &'a [u8],
    ) -> &'a [u8] {
        &text[self.start..self.end]
    }

    /// Is this an unknown segment?
    pub fn is_unknown(&self) -> bool {
        self.kind == SegmentKind::Unknown
    }
}

/// A scored lattice edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatticeEdge<T: TokenType> {
    /// The segment this edge covers.
    pub segment: Segment<T>,

    /// The edge score.
    pub score: f32,
}

#[derive(Debug, Clone, Copy)]
struct BestEntry<T: TokenType> {
    score: f64,
    /// The edge reaching this offset; `None` only at offset 0.
    edge: Option<Segment<T>>,
}

/// Per-call Viterbi table over byte offsets.
///
/// For each offset `i`, the best cumulative score reaching `i`
/// and the segment which achieved it. Lives for one encode call.
#[derive(Debug, Clone)]
pub struct SegmentationLattice<T: TokenType> {
    best: Vec<Option<BestEntry<T>>>,
}

impl<T: TokenType> SegmentationLattice<T> {
    /// Create a lattice for a text of `len` bytes; only offset 0 is reachable.
    pub fn new(len: usize) -> Self {
        let mut best = vec![None; len + 1];
        best[0] = Some(BestEntry {
            score: 0.0,
            edge: None,
        });
        Self { best }
    }

    /// The text length this lattice covers.
    pub fn len(&self) -> usize {
        self.best.len() - 1
    }

    /// Is the covered text empty?
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The best cumulative score reaching `offset`, if reachable.
    pub fn score_at(
        &self,
        offset: usize,
    ) -> Option<f64> {
        self.best.get(offset).copied().flatten().map(|e| e.score)
    }

    /// Offer an edge leaving an offset with cumulative score `base`.
    ///
    /// Replaces the incumbent only on a strictly better score, so the
    /// first edge offered into an offset wins ties.
    pub fn relax(
        &mut self,
        base: f64,
        edge: LatticeEdge<T>,
    ) {
        let candidate = base + edge.score as f64;
        let end = edge.segment.end;
        let better = match self.best[end] {
            Some(entry) => candidate > entry.score,
            None => true,
        };
        if better {
            self.best[end] = Some(BestEntry {
                score: candidate,
                edge: Some(edge.segment),
            });
        }
    }

    /// Recover the winning path, in text order.
    pub fn backtrack(&self) -> Vec<Segment<T>> {
        let mut segments = Vec::new();
        let mut pos = self.len();
        while pos > 0 {
            let Some(segment) = self.best[pos].and_then(|e| e.edge) else {
                // Unreachable end; every offset has an outgoing edge.
                debug_assert!(false, "lattice end {pos} unreachable");
                break;
            };
            segments.push(segment);
            pos = segment.start;
        }
        segments.reverse();
        segments
    }
}
