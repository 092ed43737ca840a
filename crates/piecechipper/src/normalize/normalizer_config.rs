//! # Normalizer Configuration

use core::str::FromStr;

use crate::errors::{LoadError, PCError};

/// Unicode normalization form applied before segmentation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnicodeForm {
    /// Leave text as-is.
    None,

    /// Canonical composition.
    Nfc,

    /// Compatibility composition.
    #[default]
    Nfkc,
}

impl UnicodeForm {
    /// The on-disk tag for this form.
    pub fn tag(self) -> u8 {
        match self {
            UnicodeForm::None => 0,
            UnicodeForm::Nfc => 1,
            UnicodeForm::Nfkc => 2,
        }
    }

    /// Parse an on-disk tag.
    pub fn from_tag(tag: u8) -> Result<Self, LoadError> {
        Ok(match tag {
            0 => UnicodeForm::None,
            1 => UnicodeForm::Nfc,
            2 => UnicodeForm::Nfkc,
            _ => {
                return Err(LoadError::corrupt(format!(
                    "unknown unicode form tag {tag}"
                )));
            }
        })
    }

    /// The short name of this form.
    pub fn name(self) -> &'static str {
        match self {
            UnicodeForm::None => "none",
            UnicodeForm::Nfc => "nfc",
            UnicodeForm::Nfkc => "nfkc",
        }
    }
}

impl FromStr for UnicodeForm {
    type Err = PCError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "none" | "identity" => Ok(UnicodeForm::None),
            "nfc" => Ok(UnicodeForm::Nfc),
            "nfkc" => Ok(UnicodeForm::Nfkc),
            other => Err(PCError::Parse(format!("unknown unicode form: {other}"))),
        }
    }
}

const FLAG_ADD_DUMMY_PREFIX: u8 = 0b001;
const FLAG_REMOVE_EXTRA_WHITESPACES: u8 = 0b010;
const FLAG_ESCAPE_WHITESPACES: u8 = 0b100;

/// Description of text normalization policy.
///
/// ## Style Hints
///
/// Instance names should prefer `normalizer_config`,
/// or `config` when there is no ambiguity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizerConfig {
    unicode_form: UnicodeForm,
    add_dummy_prefix: bool,
    remove_extra_whitespaces: bool,
    escape_whitespaces: bool,
}

impl Default for NormalizerConfig {
    fn default() -> Self {
        Self {
            unicode_form: UnicodeForm::Nfkc,
            add_dummy_prefix: true,
            remove_extra_whitespaces: true,
            escape_whitespaces: true,
        }
    }
}

impl NormalizerConfig {
    /// A config which does nothing: no unicode form, no whitespace handling.
    pub fn identity() -> Self {
        Self {
            unicode_form: UnicodeForm::None,
            add_dummy_prefix: false,
            remove_extra_whitespaces: false,
            escape_whitespaces: false,
        }
    }

    /// Get the unicode form.
    pub fn unicode_form(&self) -> UnicodeForm {
        self.unicode_form
    }

    /// Set the unicode form.
    pub fn set_unicode_form(
        &mut self,
        unicode_form: UnicodeForm,
    ) {
        self.unicode_form = unicode_form;
    }

    /// Set the unicode form.
    pub fn with_unicode_form(
        mut self,
        unicode_form: UnicodeForm,
    ) -> Self {
        self.set_unicode_form(unicode_form);
        self
    }

    /// Is a dummy space prepended to non-empty input?
    pub fn add_dummy_prefix(&self) -> bool {
        self.add_dummy_prefix
    }

    /// Set whether a dummy space is prepended to non-empty input.
    pub fn set_add_dummy_prefix(
        &mut self,
        add_dummy_prefix: bool,
    ) {
        self.add_dummy_prefix = add_dummy_prefix;
    }

    /// Set whether a dummy space is prepended to non-empty input.
    pub fn with_add_dummy_prefix(
        mut self,
        add_dummy_prefix: bool,
    ) -> Self {
        self.set_add_dummy_prefix(add_dummy_prefix);
        self
    }

    /// Are whitespace runs collapsed, and leading/trailing whitespace trimmed?
    pub fn remove_extra_whitespaces(&self) -> bool {
        self.remove_extra_whitespaces
    }

    /// Set whether whitespace runs are collapsed and trimmed.
    pub fn set_remove_extra_whitespaces(
        &mut self,
        remove_extra_whitespaces: bool,
    ) {
        self.remove_extra_whitespaces = remove_extra_whitespaces;
    }

    /// Set whether whitespace runs are collapsed and trimmed.
    pub fn with_remove_extra_whitespaces(
        mut self,
        remove_extra_whitespaces: bool,
    ) -> Self {
        self.set_remove_extra_whitespaces(remove_extra_whitespaces);
        self
    }

    /// Are spaces replaced by the whitespace marker?
    pub fn escape_whitespaces(&self) -> bool {
        self.escape_whitespaces
    }

    /// Set whether spaces are replaced by the whitespace marker.
    pub fn set_escape_whitespaces(
        &mut self,
        escape_whitespaces: bool,
    ) {
        self.escape_whitespaces = escape_whitespaces;
    }

    /// Set whether spaces are replaced by the whitespace marker.
    pub fn with_escape_whitespaces(
        mut self,
        escape_whitespaces: bool,
    ) -> Self {
        self.set_escape_whitespaces(escape_whitespaces);
        self
    }

    /// Pack the boolean options into the on-disk flag byte.
    pub fn flags(&self) -> u8 {
        let mut flags = 0;
        if self.add_dummy_prefix {
            flags |= FLAG_ADD_DUMMY_PREFIX;
        }
        if self.remove_extra_whitespaces {
            flags |= FLAG_REMOVE_EXTRA_WHITESPACES;
        }
        if self.escape_whitespaces {
            flags |= FLAG_ESCAPE_WHITESPACES;
        }
        flags
    }

    /// Rebuild a config from its on-disk form.
    pub fn from_tags(
        unicode_form: u8,
        flags: u8,
    ) -> Result<Self, LoadError> {
        const KNOWN: u8 =
            FLAG_ADD_DUMMY_PREFIX | FLAG_REMOVE_EXTRA_WHITESPACES | FLAG_ESCAPE_WHITESPACES;
        if flags & !KNOWN != 0 {
            return Err(LoadError::corrupt(format!(
                "unknown normalizer flags {flags:#04x}"
            )));
        }
        Ok(Self {
            unicode_form: UnicodeForm::from_tag(unicode_form)?,
            add_dummy_prefix: flags & FLAG_ADD_DUMMY_PREFIX != 0,
            remove_extra_whitespaces: flags & FLAG_REMOVE_EXTRA_WHITESPACES != 0,
            escape_whitespaces: flags & FLAG_ESCAPE_WHITESPACES != 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = NormalizerConfig::default();
        assert_eq!(config.unicode_form(), UnicodeForm::Nfkc);
        assert!(config.add_dummy_prefix());
        assert!(config.remove_extra_whitespaces());
        assert!(config.escape_whitespaces());
        assert_eq!(config.flags(), 0b111);
    }

    #[test]
    fn test_tags() {
        let config = NormalizerConfig::default()
            .with_unicode_form(UnicodeForm::Nfc)
            .with_remove_extra_whitespaces(false);
        let rebuilt =
            NormalizerConfig::from_tags(config.unicode_form().tag(), config.flags()).unwrap();
        assert_eq!(rebuilt, config);

        assert!(NormalizerConfig::from_tags(9, 0).is_err());
        assert!(NormalizerConfig::from_tags(0, 0b1000).is_err());
    }

    #[test]
    fn test_parse_unicode_form() {
        assert_eq!("NFKC".parse::<UnicodeForm>().unwrap(), UnicodeForm::Nfkc);
        assert_eq!("nfc".parse::<UnicodeForm>().unwrap(), UnicodeForm::Nfc);
        assert_eq!("identity".parse::<UnicodeForm>().unwrap(), UnicodeForm::None);
        assert!("nfd".parse::<UnicodeForm>().is_err());
    }
}
