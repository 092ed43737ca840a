//! # Unigram Piece Encoder

use std::sync::Arc;

use rand::Rng;

use crate::{
    encoders::{TokenEncoder, TokenEncoderOptions},
    errors::PCResult,
    normalize::Normalizer,
    segmentation::{SamplingOptions, Segment, SegmentKind, Segmenter},
    types::TokenType,
    vocab::{PieceKind, PieceModel, PieceVocab},
};

/// An emitted id and the normalized byte span it came from.
///
/// bos/eos ids carry an empty span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodedPiece<T: TokenType> {
    /// The emitted id.
    pub id: T,

    /// Start byte offset in the normalized text.
    pub start: usize,

    /// End byte offset in the normalized text (exclusive).
    pub end: usize,
}

/// Text to ids: normalize, segment, then map segments to ids.
///
/// Unknown segments expand to `<0xHH>` byte pieces when the vocabulary has
/// byte fallback; otherwise each run of unknown segments becomes a single
/// unknown id.
///
/// ## Style Hints
/// Instance names should prefer `encoder`.
#[derive(Debug, Clone)]
pub struct PieceEncoder<T: TokenType> {
    normalizer: Normalizer,
    segmenter: Segmenter<T>,
    options: TokenEncoderOptions,
}

impl<T: TokenType> PieceEncoder<T> {
    /// Create an encoder for a model.
    pub fn new(
        model: PieceModel<T>,
        options: TokenEncoderOptions,
    ) -> Self {
        Self {
            normalizer: model.normalizer(),
            segmenter: Segmenter::new(model.vocab().clone()),
            options,
        }
    }

    /// Create an encoder from an existing segmenter.
    pub fn from_parts(
        normalizer: Normalizer,
        segmenter: Segmenter<T>,
        options: TokenEncoderOptions,
    ) -> Self {
        Self {
            normalizer,
            segmenter,
            options,
        }
    }

    /// Get the normalizer.
    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    /// Get the segmenter.
    pub fn segmenter(&self) -> &Segmenter<T> {
        &self.segmenter
    }

    /// Get the options.
    pub fn options(&self) -> &TokenEncoderOptions {
        &self.options
    }

    /// Map a segmentation of normalized `text` to emitted pieces.
    pub fn emit_segments(
        &self,
        text: &[u8],
        segments: &[Segment<T>],
        out: &mut Vec<EncodedPiece<T>>,
    ) {
        let vocab = self.segmenter.vocab();
        let byte_fallback = vocab.has_byte_fallback();
        let unk = vocab.unk_id();

        if self.options.add_bos()
            && let Some(bos) = vocab.bos_id()
        {
            out.push(EncodedPiece {
                id: bos,
                start: 0,
                end: 0,
            });
        }

        let mut in_unknown_run = false;
        for segment in segments {
            match segment.kind {
                SegmentKind::Piece(id) => {
                    in_unknown_run = false;
                    out.push(EncodedPiece {
                        id,
                        start: segment.start,
                        end: segment.end,
                    });
                }
                SegmentKind::Unknown if byte_fallback => {
                    for (offset, &b) in segment.bytes(text).iter().enumerate() {
                        if let Some(id) = vocab.byte_piece(b).or(unk) {
                            let start = segment.start + offset;
                            out.push(EncodedPiece {
                                id,
                                start,
                                end: start + 1,
                            });
                        }
                    }
                }
                SegmentKind::Unknown => {
                    let Some(unk) = unk else {
                        continue;
                    };
                    match out.last_mut() {
                        Some(last) if in_unknown_run => last.end = segment.end,
                        _ => out.push(EncodedPiece {
                            id: unk,
                            start: segment.start,
                            end: segment.end,
                        }),
                    }
                    in_unknown_run = true;
                }
            }
        }

        if self.options.add_eos()
            && let Some(eos) = vocab.eos_id()
        {
            out.push(EncodedPiece {
                id: eos,
                start: text.len(),
                end: text.len(),
            });
        }
    }

    /// Encode text, reporting the normalized text and each piece's span in it.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self, text)))]
    pub fn encode_with_spans(
        &self,
        text: &[u8],
    ) -> (Vec<u8>, Vec<EncodedPiece<T>>) {
        let normalized = self.normalizer.normalize_bytes(text);
        let segments = self.segmenter.segment(&normalized);
        let mut pieces = Vec::with_capacity(segments.len() + 2);
        self.emit_segments(&normalized, &segments, &mut pieces);
        (normalized, pieces)
    }

    /// Encode text into piece strings.
    ///
    /// Pieces are rendered by surface; an unknown id renders as the
    /// normalized text it covers.
    pub fn encode_as_pieces(
        &self,
        text: &str,
    ) -> Vec<String> {
        let (normalized, pieces) = self.encode_with_spans(text.as_bytes());
        let vocab = self.segmenter.vocab();
        pieces
            .iter()
            .map(|p| match vocab.piece_at(p.id) {
                Some(piece) if piece.kind == PieceKind::Unknown => {
                    String::from_utf8_lossy(&normalized[p.start..p.end]).into_owned()
                }
                Some(piece) => piece.surface_lossy().into_owned(),
                None => String::new(),
            })
            .collect()
    }

    /// Encode text with a sampled segmentation.
    ///
    /// ## Arguments
    /// * `text` - the text to encode.
    /// * `sampling` - the sampling options.
    /// * `rng` - the random source.
    pub fn try_encode_sampled<R: Rng + ?Sized>(
        &self,
        text: &str,
        sampling: &SamplingOptions,
        rng: &mut R,
    ) -> PCResult<Vec<T>> {
        let normalized = self.normalizer.normalize(text);
        let segments = self
            .segmenter
            .segment_sampled(normalized.as_bytes(), sampling.alpha(), rng);
        let mut pieces = Vec::with_capacity(segments.len() + 2);
        self.emit_segments(normalized.as_bytes(), &segments, &mut pieces);
        Ok(pieces.into_iter().map(|p| p.id).collect())
    }
}

impl<T: TokenType> TokenEncoder<T> for PieceEncoder<T> {
    fn vocab(&self) -> &Arc<PieceVocab<T>> {
        self.segmenter.vocab()
    }

    fn try_encode_bytes_append(
        &self,
        text: &[u8],
        tokens: &mut Vec<T>,
    ) -> PCResult<()> {
        let (_, pieces) = self.encode_with_spans(text);
        tokens.extend(pieces.into_iter().map(|p| p.id));
        Ok(())
    }

    fn try_encode_append(
        &self,
        text: &str,
        tokens: &mut Vec<T>,
    ) -> PCResult<()> {
        let normalized = self.normalizer.normalize(text);
        let segments = self.segmenter.segment(normalized.as_bytes());
        let mut pieces = Vec::with_capacity(segments.len() + 2);
        self.emit_segments(normalized.as_bytes(), &segments, &mut pieces);
        tokens.extend(pieces.into_iter().map(|p| p.id));
        Ok(())
    }
}
