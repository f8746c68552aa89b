//! Font installation errors

use super::WinstageError;

pub fn source_missing(path: impl Into<String>) -> WinstageError {
    WinstageError::FontSourceMissing { path: path.into() }
}

pub fn destination_missing(path: impl Into<String>) -> WinstageError {
    WinstageError::FontDestinationMissing { path: path.into() }
}

/// Creates a font registration failed error
pub fn registration_failed(name: impl Into<String>, reason: impl Into<String>) -> WinstageError {
    WinstageError::FontRegistrationFailed {
        name: name.into(),
        reason: reason.into(),
    }
}
