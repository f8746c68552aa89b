//! Configuration errors

use super::WinstageError;

/// Creates a config parse failed error
pub fn parse_failed(path: impl Into<String>, reason: impl Into<String>) -> WinstageError {
    WinstageError::ConfigParseFailed {
        path: path.into(),
        reason: reason.into(),
    }
}

/// Creates an invalid config error
pub fn invalid(message: impl Into<String>) -> WinstageError {
    WinstageError::ConfigInvalid {
        message: message.into(),
    }
}

/// Creates a config read failed error
pub fn read_failed(path: impl Into<String>, reason: impl Into<String>) -> WinstageError {
    WinstageError::ConfigReadFailed {
        path: path.into(),
        reason: reason.into(),
    }
}
