//! # Vocabulary Pieces

use core::str::FromStr;

use crate::{
    errors::{LoadError, PCError},
    types::TokenType,
};

/// The role a piece plays in segmentation and decoding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PieceKind {
    /// A regular subword unit, matched from text and scored.
    #[default]
    Normal,

    /// The unknown piece; emitted for spans no other piece covers.
    Unknown,

    /// A control symbol (`<s>`, `</s>`, `<pad>`); never matched from text,
    /// decodes to nothing.
    Control,

    /// A byte-fallback piece of the form `<0xHH>`.
    Byte,

    /// A user-defined symbol; always preferred over decompositions.
    UserDefined,
}

impl PieceKind {
    /// The on-disk tag for this kind.
    pub fn tag(self) -> u8 {
        match self {
            PieceKind::Normal => 0,
            PieceKind::Unknown => 1,
            PieceKind::Control => 2,
            PieceKind::Byte => 3,
            PieceKind::UserDefined => 4,
        }
    }

    /// Parse an on-disk tag.
    pub fn from_tag(tag: u8) -> Result<Self, LoadError> {
        Ok(match tag {
            0 => PieceKind::Normal,
            1 => PieceKind::Unknown,
            2 => PieceKind::Control,
            3 => PieceKind::Byte,
            4 => PieceKind::UserDefined,
            _ => return Err(LoadError::corrupt(format!("unknown piece kind tag {tag}"))),
        })
    }

    /// The short name of this kind.
    pub fn name(self) -> &'static str {
        match self {
            PieceKind::Normal => "normal",
            PieceKind::Unknown => "unknown",
            PieceKind::Control => "control",
            PieceKind::Byte => "byte",
            PieceKind::UserDefined => "user_defined",
        }
    }

    /// Is this kind matched against input text?
    pub fn is_matchable(self) -> bool {
        matches!(self, PieceKind::Normal | PieceKind::UserDefined)
    }
}

impl FromStr for PieceKind {
    type Err = PCError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "normal" => PieceKind::Normal,
            "unknown" => PieceKind::Unknown,
            "control" => PieceKind::Control,
            "byte" => PieceKind::Byte,
            "user_defined" => PieceKind::UserDefined,
            other => return Err(PCError::Parse(format!("unknown piece kind: {other}"))),
        })
    }
}

/// A single vocabulary entry.
///
/// ## Style Hints
/// Instance names should prefer `piece`.
#[derive(Debug, Clone, PartialEq)]
pub struct Piece<T: TokenType> {
    /// Dense id in `[0, vocab_size)`.
    pub id: T,

    /// The surface bytes.
    pub surface: Vec<u8>,

    /// Log-probability score.
    pub score: f32,

    /// The piece kind.
    pub kind: PieceKind,
}

impl<T: TokenType> Piece<T> {
    /// The surface as a string, replacing invalid sequences.
    pub fn surface_lossy(&self) -> std::borrow::Cow<'_, str> {
        String::from_utf8_lossy(&self.surface)
    }

    /// For byte pieces, the byte value this piece stands for.
    pub fn byte_value(&self) -> Option<u8> {
        if self.kind == PieceKind::Byte {
            parse_byte_piece(&self.surface)
        } else {
            None
        }
    }
}

/// Format the surface of the byte piece for `b`, e.g. `<0x0A>`.
pub fn byte_piece_surface(b: u8) -> String {
    format!("<0x{b:02X}>")
}

/// Parse a `<0xHH>` byte-piece surface.
pub fn parse_byte_piece(surface: &[u8]) -> Option<u8> {
    let hex = surface.strip_prefix(b"<0x")?.strip_suffix(b">")?;
    if hex.len() != 2 || !hex.iter().all(u8::is_ascii_hexdigit) {
        return None;
    }
    let hex = core::str::from_utf8(hex).ok()?;
    u8::from_str_radix(hex, 16).ok()
}
