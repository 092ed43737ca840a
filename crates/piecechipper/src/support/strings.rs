//! # String Utilities

use std::borrow::Cow;

/// Convert bytes to a [`String`], replacing invalid sequences with `U+FFFD`.
///
/// Reuses the allocation when the bytes are already valid UTF-8.
pub fn string_from_utf8_lossy(v: Vec<u8>) -> String {
    match String::from_utf8(v) {
        Ok(s) => s,
        Err(err) => match String::from_utf8_lossy(err.as_bytes()) {
            Cow::Owned(s) => s,
            Cow::Borrowed(s) => s.to_string(),
        },
    }
}
