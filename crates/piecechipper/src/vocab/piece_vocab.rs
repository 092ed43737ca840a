//! # Piece Vocabulary Store

use crate::{
    errors::{PCError, PCResult},
    types::{PCHashMap, TokenType, hash_map_with_capacity},
    vocab::{
        Piece,
        PieceKind,
        SpecialIds,
        piece::parse_byte_piece,
        validators::{try_score, try_vocab_size},
    },
};

/// A `(surface, score, kind)` description of a piece, before id assignment.
pub type PieceEntry = (Vec<u8>, f32, PieceKind);

/// Immutable table of scored subword pieces.
///
/// Ids are dense over `[0, len())`; surfaces are unique.
///
/// ## Style Hints
/// Instance names should prefer `vocab`, or `piece_vocab`.
#[derive(Debug, Clone, PartialEq)]
pub struct PieceVocab<T: TokenType> {
    pieces: Vec<Piece<T>>,
    surface_map: PCHashMap<Vec<u8>, T>,
    specials: SpecialIds<T>,
    byte_pieces: [Option<T>; 256],
    byte_piece_count: usize,
    min_score: f32,
    max_score: f32,
}

impl<T: TokenType> PieceVocab<T> {
    /// Build a vocabulary from ordered entries, inferring special ids.
    ///
    /// See [`SpecialIds::infer`].
    pub fn from_entries<I, S>(entries: I) -> PCResult<Self>
    where
        I: IntoIterator<Item = (S, f32, PieceKind)>,
        S: Into<Vec<u8>>,
    {
        let pieces = build_pieces(entries)?;
        let specials = SpecialIds::infer(&pieces);
        Self::from_pieces(pieces, specials)
    }

    /// Build a vocabulary from ordered entries with explicit special ids.
    ///
    /// ## Arguments
    /// * `entries` - `(surface, score, kind)` triples; the position is the id.
    /// * `specials` - the named special ids.
    pub fn init<I, S>(
        entries: I,
        specials: SpecialIds<T>,
    ) -> PCResult<Self>
    where
        I: IntoIterator<Item = (S, f32, PieceKind)>,
        S: Into<Vec<u8>>,
    {
        Self::from_pieces(build_pieces(entries)?, specials)
    }

    /// Build a vocabulary from fully formed pieces.
    ///
    /// ## Errors
    /// [`PCError::VocabConflict`] when ids are not dense, surfaces repeat,
    /// special ids are out of range or of the wrong kind, or the vocabulary
    /// has no way to represent unknown text.
    pub fn from_pieces(
        pieces: Vec<Piece<T>>,
        specials: SpecialIds<T>,
    ) -> PCResult<Self> {
        try_vocab_size::<T>(pieces.len())?;

        let mut surface_map = hash_map_with_capacity(pieces.len());
        let mut byte_pieces: [Option<T>; 256] = [None; 256];
        let mut byte_piece_count = 0;
        let mut unknown: Option<T> = None;
        let mut min_score = f32::INFINITY;
        let mut max_score = f32::NEG_INFINITY;

        for (idx, piece) in pieces.iter().enumerate() {
            if piece.id.to_usize() != Some(idx) {
                return Err(PCError::VocabConflict(format!(
                    "piece at index {idx} has id {}",
                    piece.id
                )));
            }
            if piece.surface.is_empty() {
                return Err(PCError::VocabConflict(format!(
                    "piece {idx} has an empty surface"
                )));
            }
            try_score(&piece.surface, piece.score)?;

            if surface_map
                .insert(piece.surface.clone(), piece.id)
                .is_some()
            {
                return Err(PCError::VocabConflict(format!(
                    "duplicate piece surface {:?}",
                    piece.surface_lossy()
                )));
            }

            match piece.kind {
                PieceKind::Normal => {
                    min_score = min_score.min(piece.score);
                    max_score = max_score.max(piece.score);
                }
                PieceKind::Byte => {
                    let b = parse_byte_piece(&piece.surface).ok_or_else(|| {
                        PCError::VocabConflict(format!(
                            "byte piece {:?} is not of the form <0xHH>",
                            piece.surface_lossy()
                        ))
                    })?;
                    if byte_pieces[b as usize].replace(piece.id).is_some() {
                        return Err(PCError::VocabConflict(format!(
                            "duplicate byte piece for {b:#04x}"
                        )));
                    }
                    byte_piece_count += 1;
                }
                PieceKind::Unknown => {
                    if unknown.replace(piece.id).is_some() {
                        return Err(PCError::VocabConflict(
                            "more than one unknown piece".to_string(),
                        ));
                    }
                }
                PieceKind::Control | PieceKind::UserDefined => {}
            }
        }

        if !min_score.is_finite() {
            min_score = 0.0;
            max_score = 0.0;
        }

        if specials.unk != unknown {
            return Err(PCError::VocabConflict(format!(
                "unk id {:?} does not name the unknown piece {:?}",
                specials.unk, unknown
            )));
        }
        for (name, id) in [
            ("bos", specials.bos),
            ("eos", specials.eos),
            ("pad", specials.pad),
        ] {
            if let Some(id) = id {
                let kind = id
                    .to_usize()
                    .and_then(|idx| pieces.get(idx))
                    .map(|p| p.kind);
                if kind != Some(PieceKind::Control) {
                    return Err(PCError::VocabConflict(format!(
                        "{name} id {id} is not a control piece"
                    )));
                }
            }
        }

        if specials.unk.is_none() && byte_piece_count < 256 {
            return Err(PCError::VocabConflict(
                "vocabulary has neither an unknown piece nor full byte fallback".to_string(),
            ));
        }

        Ok(Self {
            pieces,
            surface_map,
            specials,
            byte_pieces,
            byte_piece_count,
            min_score,
            max_score,
        })
    }

    /// The number of pieces.
    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    /// The number of pieces.
    pub fn len(&self) -> usize {
        self.piece_count()
    }

    /// Is the vocabulary empty?
    pub fn is_empty(&self) -> bool {
        self.pieces.is_empty()
    }

    /// All pieces, in id order.
    pub fn pieces(&self) -> &[Piece<T>] {
        &self.pieces
    }

    /// Look up a piece by id.
    pub fn piece_at(
        &self,
        id: T,
    ) -> Option<&Piece<T>> {
        self.pieces.get(id.to_usize()?)
    }

    /// Look up a piece by a signed boundary id.
    ///
    /// ## Errors
    /// [`PCError::InvalidId`] for negative or out-of-range ids.
    pub fn try_piece_at_i64(
        &self,
        id: i64,
    ) -> PCResult<&Piece<T>> {
        usize::try_from(id)
            .ok()
            .and_then(|idx| self.pieces.get(idx))
            .ok_or(PCError::InvalidId {
                id,
                vocab_size: self.len(),
            })
    }

    /// Exact surface lookup.
    pub fn id_of(
        &self,
        surface: &[u8],
    ) -> Option<T> {
        self.surface_map.get(surface).copied()
    }

    /// The named special ids.
    pub fn specials(&self) -> &SpecialIds<T> {
        &self.specials
    }

    /// The unknown piece id.
    pub fn unk_id(&self) -> Option<T> {
        self.specials.unk
    }

    /// The beginning-of-sequence id.
    pub fn bos_id(&self) -> Option<T> {
        self.specials.bos
    }

    /// The end-of-sequence id.
    pub fn eos_id(&self) -> Option<T> {
        self.specials.eos
    }

    /// The padding id.
    pub fn pad_id(&self) -> Option<T> {
        self.specials.pad
    }

    /// The byte-fallback piece for `b`, if present.
    pub fn byte_piece(
        &self,
        b: u8,
    ) -> Option<T> {
        self.byte_pieces[b as usize]
    }

    /// Does this vocabulary carry byte-fallback pieces?
    pub fn has_byte_fallback(&self) -> bool {
        self.byte_piece_count > 0
    }

    /// The lowest score over normal pieces.
    pub fn min_score(&self) -> f32 {
        self.min_score
    }

    /// The highest score over normal pieces.
    pub fn max_score(&self) -> f32 {
        self.max_score
    }

    /// Iterate over the `(surface, score, kind)` entries, in id order.
    pub fn entries(&self) -> impl Iterator<Item = PieceEntry> + '_ {
        self.pieces
            .iter()
            .map(|p| (p.surface.clone(), p.score, p.kind))
    }

    /// Convert to a different token type.
    pub fn to_token_type<G: TokenType>(&self) -> PCResult<PieceVocab<G>> {
        let convert = |id: Option<T>| -> PCResult<Option<G>> {
            id.map(|id| {
                id.to_usize()
                    .and_then(G::from_usize)
                    .ok_or(PCError::VocabSizeOverflow { size: self.len() })
            })
            .transpose()
        };
        let specials = SpecialIds {
            unk: convert(self.specials.unk)?,
            bos: convert(self.specials.bos)?,
            eos: convert(self.specials.eos)?,
            pad: convert(self.specials.pad)?,
        };
        PieceVocab::<G>::init(self.entries(), specials)
    }
}

fn build_pieces<T, I, S>(entries: I) -> PCResult<Vec<Piece<T>>>
where
    T: TokenType,
    I: IntoIterator<Item = (S, f32, PieceKind)>,
    S: Into<Vec<u8>>,
{
    entries
        .into_iter()
        .enumerate()
        .map(|(idx, (surface, score, kind))| {
            let id = T::from_usize(idx).ok_or(PCError::VocabSizeOverflow { size: idx + 1 })?;
            Ok(Piece {
                id,
                surface: surface.into(),
                score,
                kind,
            })
        })
        .collect()
}
