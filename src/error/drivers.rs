//! Driver staging gate failures

use super::WinstageError;

pub fn source_missing(path: impl Into<String>) -> WinstageError {
    WinstageError::SourcePathMissing { path: path.into() }
}

pub fn no_driver_files(path: impl Into<String>) -> WinstageError {
    WinstageError::NoDriverFiles { path: path.into() }
}

pub fn package_folder_missing(path: impl Into<String>) -> WinstageError {
    WinstageError::PackageFolderMissing { path: path.into() }
}

pub fn version_folder_not_empty(path: impl Into<String>) -> WinstageError {
    WinstageError::VersionFolderNotEmpty { path: path.into() }
}
