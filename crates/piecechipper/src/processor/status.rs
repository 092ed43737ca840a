//! # Status Codes
//!
//! Stable integer codes for reporting [`PCError`]s across a call boundary.

use core::fmt;

use crate::errors::{LoadError, PCError, PCResult};

/// Boundary status code; `0` is success.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum StatusCode {
    /// Success.
    Ok = 0,

    /// [`LoadError::NotFound`].
    NotFound = 1,

    /// [`LoadError::Corrupt`].
    Corrupt = 2,

    /// [`LoadError::UnsupportedVersion`].
    UnsupportedVersion = 3,

    /// [`PCError::NotLoaded`].
    NotLoaded = 4,

    /// [`PCError::Released`].
    Released = 5,

    /// [`PCError::InvalidId`].
    InvalidId = 6,

    /// [`PCError::Io`].
    Io = 7,

    /// Any other error: parse failures, vocabulary conflicts, overflow.
    InvalidArgument = 8,
}

impl StatusCode {
    /// The integer code.
    pub fn code(self) -> i32 {
        self as i32
    }

    /// Is this success?
    pub fn is_ok(self) -> bool {
        self == StatusCode::Ok
    }

    /// Map a result to its status.
    pub fn of<T>(result: &PCResult<T>) -> Self {
        match result {
            Ok(_) => StatusCode::Ok,
            Err(err) => err.into(),
        }
    }
}

impl From<&PCError> for StatusCode {
    fn from(err: &PCError) -> Self {
        match err {
            PCError::Load(LoadError::NotFound { .. }) => StatusCode::NotFound,
            PCError::Load(LoadError::Corrupt(_)) => StatusCode::Corrupt,
            PCError::Load(LoadError::UnsupportedVersion { .. }) => StatusCode::UnsupportedVersion,
            PCError::NotLoaded => StatusCode::NotLoaded,
            PCError::Released => StatusCode::Released,
            PCError::InvalidId { .. } => StatusCode::InvalidId,
            PCError::Io(_) => StatusCode::Io,
            PCError::VocabSizeOverflow { .. } | PCError::VocabConflict(_) | PCError::Parse(_) => {
                StatusCode::InvalidArgument
            }
        }
    }
}

impl From<StatusCode> for i32 {
    fn from(status: StatusCode) -> Self {
        status.code()
    }
}

impl fmt::Display for StatusCode {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{self:?}({})", self.code())
    }
}
