//! # Normalizer

use unicode_normalization::UnicodeNormalization;

use crate::normalize::{NormalizerConfig, UnicodeForm};

/// The visible stand-in for `' '` in normalized text (`U+2581`).
pub const WHITESPACE_MARKER: char = '\u{2581}';

const WHITESPACE_MARKER_STR: &str = "\u{2581}";

/// One unit of possibly-malformed input.
#[derive(Clone, Copy)]
enum Unit<'a> {
    Char(char),
    Invalid(&'a [u8]),
}

/// Applies a [`NormalizerConfig`] to text.
///
/// Stateless after construction; safe to share across threads.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Normalizer {
    config: NormalizerConfig,
}

impl From<NormalizerConfig> for Normalizer {
    fn from(config: NormalizerConfig) -> Self {
        Self::new(config)
    }
}

impl Normalizer {
    /// Create a normalizer for the config.
    pub fn new(config: NormalizerConfig) -> Self {
        Self { config }
    }

    /// Get the config.
    pub fn config(&self) -> &NormalizerConfig {
        &self.config
    }

    /// Normalize UTF-8 text.
    pub fn normalize(
        &self,
        text: &str,
    ) -> String {
        let mut out = String::with_capacity(text.len() + 4);
        self.write_units(self.unicode_chars(text).map(Unit::Char), &mut |unit| {
            if let Unit::Char(c) = unit {
                out.push(c);
            }
        });
        out
    }

    /// Normalize bytes which may contain malformed UTF-8.
    ///
    /// Valid runs are normalized as text; malformed bytes pass through
    /// unchanged, so the segmenter sees them as single-byte unknown spans.
    pub fn normalize_bytes(
        &self,
        bytes: &[u8],
    ) -> Vec<u8> {
        let mut out = Vec::with_capacity(bytes.len() + 4);
        let units = bytes.utf8_chunks().flat_map(|chunk| {
            let chars: Vec<Unit<'_>> = self.unicode_chars(chunk.valid()).map(Unit::Char).collect();
            let invalid = chunk.invalid();
            chars
                .into_iter()
                .chain((!invalid.is_empty()).then_some(Unit::Invalid(invalid)))
        });
        self.write_units(units, &mut |unit| match unit {
            Unit::Char(c) => {
                let mut buf = [0u8; 4];
                out.extend_from_slice(c.encode_utf8(&mut buf).as_bytes());
            }
            Unit::Invalid(b) => out.extend_from_slice(b),
        });
        out
    }

    /// Reverse the whitespace marker substitution and dummy prefix.
    ///
    /// This is the exact inverse of the whitespace handling only;
    /// unicode normalization and whitespace collapsing are not undone.
    pub fn denormalize(
        &self,
        text: &str,
    ) -> String {
        let text = if self.config.escape_whitespaces() {
            text.replace(WHITESPACE_MARKER_STR, " ")
        } else {
            text.to_string()
        };

        if self.config.add_dummy_prefix()
            && let Some(rest) = text.strip_prefix(' ')
        {
            rest.to_string()
        } else {
            text
        }
    }

    fn unicode_chars<'a>(
        &self,
        text: &'a str,
    ) -> Box<dyn Iterator<Item = char> + 'a> {
        match self.config.unicode_form() {
            UnicodeForm::None => Box::new(text.chars()),
            UnicodeForm::Nfc => Box::new(text.nfc()),
            UnicodeForm::Nfkc => Box::new(text.nfkc()),
        }
    }

    fn space(&self) -> char {
        if self.config.escape_whitespaces() {
            WHITESPACE_MARKER
        } else {
            ' '
        }
    }

    /// Apply whitespace policy to a unit stream.
    fn write_units<'a, I, F>(
        &self,
        units: I,
        emit: &mut F,
    ) where
        I: Iterator<Item = Unit<'a>>,
        F: FnMut(Unit<'a>),
    {
        let remove_extra = self.config.remove_extra_whitespaces();
        let escape = self.config.escape_whitespaces();
        let space = self.space();

        let mut started = false;
        let mut pending_space = false;

        for unit in units {
            // An input marker normalizes like a space.
            let unit = match unit {
                Unit::Char(WHITESPACE_MARKER) if escape => Unit::Char(' '),
                other => other,
            };

            if remove_extra
                && let Unit::Char(c) = unit
                && c.is_whitespace()
            {
                pending_space = started;
                continue;
            }

            if !started {
                started = true;
                if self.config.add_dummy_prefix() {
                    emit(Unit::Char(space));
                }
            }
            if pending_space {
                pending_space = false;
                emit(Unit::Char(space));
            }

            match unit {
                Unit::Char(' ') => emit(Unit::Char(space)),
                other => emit(other),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_normalize() {
        let normalizer = Normalizer::default();

        assert_eq!(normalizer.normalize(""), "");
        assert_eq!(normalizer.normalize("hello"), "▁hello");
        assert_eq!(normalizer.normalize("hello world"), "▁hello▁world");
        assert_eq!(normalizer.normalize("  hello \t\n world  "), "▁hello▁world");
        assert_eq!(normalizer.normalize("   "), "");

        // NFKC: full-width letters and the "fi" ligature.
        assert_eq!(normalizer.normalize("ＡＢＣ"), "▁ABC");
        assert_eq!(normalizer.normalize("\u{fb01}ne"), "▁fine");
    }

    #[test]
    fn test_keep_whitespace() {
        let normalizer = Normalizer::new(
            NormalizerConfig::default().with_remove_extra_whitespaces(false),
        );
        assert_eq!(normalizer.normalize(" a  b "), "▁▁a▁▁b▁");
        assert_eq!(normalizer.denormalize("▁▁a▁▁b▁"), " a  b ");
    }

    #[test]
    fn test_input_marker_is_a_space() {
        let normalizer = Normalizer::default();
        assert_eq!(normalizer.normalize("\u{2581}a"), "▁a");
        assert_eq!(normalizer.normalize("a\u{2581}"), "▁a");
        assert_eq!(normalizer.normalize("x \u{2581} y"), "▁x▁y");

        let normalizer = Normalizer::new(
            NormalizerConfig::default().with_remove_extra_whitespaces(false),
        );
        assert_eq!(normalizer.normalize("a\u{2581} b"), "▁a▁▁b");

        let normalizer = Normalizer::new(NormalizerConfig::identity());
        assert_eq!(normalizer.normalize("a\u{2581}b"), "a\u{2581}b");
    }

    #[test]
    fn test_identity() {
        let normalizer = Normalizer::new(NormalizerConfig::identity());
        for text in ["", " a  b ", "ＡＢＣ", "line\nbreak"] {
            assert_eq!(normalizer.normalize(text), text);
            assert_eq!(normalizer.denormalize(text), text);
        }
    }

    #[test]
    fn test_denormalize_inverts_escape() {
        let normalizer = Normalizer::default();
        for text in ["hello", "hello world", "a b c d"] {
            assert_eq!(normalizer.denormalize(&normalizer.normalize(text)), text);
        }
    }

    #[test]
    fn test_normalize_bytes() {
        let normalizer = Normalizer::default();
        assert_eq!(
            normalizer.normalize_bytes("hello world".as_bytes()),
            "▁hello▁world".as_bytes()
        );

        let mut input = b"ab".to_vec();
        input.push(0xff);
        input.extend_from_slice(b" cd");

        let mut expected = "▁ab".as_bytes().to_vec();
        expected.push(0xff);
        expected.extend_from_slice("▁cd".as_bytes());

        assert_eq!(normalizer.normalize_bytes(&input), expected);
    }

    #[test]
    fn test_normalize_bytes_matches_normalize() {
        let normalizer = Normalizer::default();
        for text in ["", "  x  y ", "caf\u{00e9} na\u{00ef}ve", "ＡＢＣ def"] {
            assert_eq!(
                normalizer.normalize_bytes(text.as_bytes()),
                normalizer.normalize(text).as_bytes()
            );
        }
    }
}
