//! Management platform errors

use super::WinstageError;

pub fn package_exists(name: impl Into<String>) -> WinstageError {
    WinstageError::PackageExists { name: name.into() }
}

pub fn category_exists(name: impl Into<String>) -> WinstageError {
    WinstageError::CategoryExists { name: name.into() }
}

pub fn connect_failed(site: impl Into<String>, reason: impl Into<String>) -> WinstageError {
    WinstageError::ConnectFailed {
        site: site.into(),
        reason: reason.into(),
    }
}

/// Creates a failed platform command error
pub fn command_failed(operation: impl Into<String>, reason: impl Into<String>) -> WinstageError {
    WinstageError::PlatformCommandFailed {
        operation: operation.into(),
        reason: reason.into(),
    }
}
