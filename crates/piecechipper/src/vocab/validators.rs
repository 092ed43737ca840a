//! Validators for vocabulary construction.
use crate::{
    errors::{PCError, PCResult},
    types::TokenType,
};

/// Validates and returns the vocabulary size, ensuring every id fits in `T`.
pub fn try_vocab_size<T: TokenType>(vocab_size: usize) -> PCResult<usize> {
    if vocab_size > 0 && T::from_usize(vocab_size - 1).is_none() {
        Err(PCError::VocabSizeOverflow { size: vocab_size })
    } else {
        Ok(vocab_size)
    }
}

/// Validates that a piece score is usable in the segmentation lattice.
pub fn try_score(
    surface: &[u8],
    score: f32,
) -> PCResult<f32> {
    if score.is_finite() {
        Ok(score)
    } else {
        Err(PCError::VocabConflict(format!(
            "non-finite score {score} for piece {:?}",
            String::from_utf8_lossy(surface)
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vocab_size() {
        assert_eq!(try_vocab_size::<u16>(0).unwrap(), 0);
        assert_eq!(try_vocab_size::<u16>(100).unwrap(), 100);
        assert_eq!(
            try_vocab_size::<u16>(u16::MAX as usize + 1).unwrap(),
            u16::MAX as usize + 1
        );
        assert!(try_vocab_size::<u16>(u16::MAX as usize + 2).is_err());

        assert_eq!(try_vocab_size::<u8>(256).unwrap(), 256);
        assert!(try_vocab_size::<u8>(257).is_err());
    }

    #[test]
    fn test_score() {
        assert_eq!(try_score(b"a", -1.5).unwrap(), -1.5);
        assert!(try_score(b"a", f32::NAN).is_err());
        assert!(try_score(b"a", f32::NEG_INFINITY).is_err());
    }
}
