//! Error types and handling for winstage
//!
//! Uses `thiserror` for error definitions and `miette` for pretty diagnostics.
//!
//! This module is organized into sub-modules by error domain:
//! - [`config`]: Configuration errors
//! - [`drivers`]: Driver staging gate failures
//! - [`fonts`]: Font installation errors
//! - [`fs`]: File system errors
//! - [`platform`]: Management platform errors

pub mod config;
pub mod drivers;
pub mod fonts;
pub mod fs;
pub mod platform;

use miette::Diagnostic;
use thiserror::Error;

/// Main error type for winstage operations
#[derive(Error, Diagnostic, Debug)]
pub enum WinstageError {
    // Configuration errors
    #[error("Failed to read configuration file: {path}: {reason}")]
    #[diagnostic(code(winstage::config::read_failed))]
    ConfigReadFailed { path: String, reason: String },

    #[error("Failed to parse configuration file: {path}: {reason}")]
    #[diagnostic(code(winstage::config::parse_failed))]
    ConfigParseFailed { path: String, reason: String },

    #[error("Invalid configuration: {message}")]
    #[diagnostic(
        code(winstage::config::invalid),
        help("Set the value in winstage.yaml or pass it on the command line")
    )]
    ConfigInvalid { message: String },

    // Font errors
    #[error("Font source folder not found: {path}")]
    #[diagnostic(code(winstage::fonts::source_missing))]
    FontSourceMissing { path: String },

    #[error("Font destination folder not found: {path}")]
    #[diagnostic(
        code(winstage::fonts::destination_missing),
        help("Pass --destination or set fonts.destination in winstage.yaml")
    )]
    FontDestinationMissing { path: String },

    #[error("Failed to register font '{name}': {reason}")]
    #[diagnostic(code(winstage::fonts::registration_failed))]
    FontRegistrationFailed { name: String, reason: String },

    // Driver staging gate failures
    #[error("Driver source path does not exist: {path}")]
    #[diagnostic(
        code(winstage::drivers::source_missing),
        help("Extract the driver bundle to the source share before staging")
    )]
    SourcePathMissing { path: String },

    #[error("No driver files (*.inf) found under: {path}")]
    #[diagnostic(code(winstage::drivers::no_driver_files))]
    NoDriverFiles { path: String },

    #[error("Package folder for model does not exist: {path}")]
    #[diagnostic(
        code(winstage::drivers::package_folder_missing),
        help("Create the model folder under the package root first")
    )]
    PackageFolderMissing { path: String },

    #[error("Package version folder is not empty: {path}")]
    #[diagnostic(
        code(winstage::drivers::version_folder_not_empty),
        help("A package for this version may already exist. Remove the folder contents or pick another version")
    )]
    VersionFolderNotEmpty { path: String },

    #[error("Invalid version label: '{label}'")]
    #[diagnostic(
        code(winstage::drivers::invalid_version),
        help("Use a label such as 1909_2020-03")
    )]
    InvalidVersion { label: String },

    // Platform errors
    #[error("Driver package '{name}' already exists")]
    #[diagnostic(code(winstage::platform::package_exists))]
    PackageExists { name: String },

    #[error("Driver category '{name}' already exists")]
    #[diagnostic(code(winstage::platform::category_exists))]
    CategoryExists { name: String },

    #[error("Failed to connect to site '{site}': {reason}")]
    #[diagnostic(
        code(winstage::platform::connect_failed),
        help("Check that the Configuration Manager console is installed and the site code is correct")
    )]
    ConnectFailed { site: String, reason: String },

    #[error("Platform command failed: {operation}: {reason}")]
    #[diagnostic(code(winstage::platform::command_failed))]
    PlatformCommandFailed { operation: String, reason: String },

    #[error("Driver import failed: {reason}")]
    #[diagnostic(
        code(winstage::platform::import_failed),
        help("Package '{package}' and category '{category}' were created and left in place. Remove them before retrying")
    )]
    ImportFailed {
        package: String,
        category: String,
        reason: String,
    },

    // File system errors
    #[error("File not found: {path}")]
    #[diagnostic(code(winstage::fs::not_found))]
    FileNotFound { path: String },

    #[error("Failed to read file: {path}: {reason}")]
    #[diagnostic(code(winstage::fs::read_failed))]
    FileReadFailed { path: String, reason: String },

    #[error("Failed to write file: {path}: {reason}")]
    #[diagnostic(code(winstage::fs::write_failed))]
    FileWriteFailed { path: String, reason: String },

    #[error("IO error: {message}")]
    #[diagnostic(code(winstage::fs::io_error))]
    IoError { message: String },

    #[error("Unknown shell: {shell}")]
    #[diagnostic(
        code(winstage::cli::unsupported_shell),
        help("Supported shells: bash, elvish, fish, powershell, zsh")
    )]
    UnsupportedShell { shell: String },
}

impl From<std::io::Error> for WinstageError {
    fn from(err: std::io::Error) -> Self {
        WinstageError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<walkdir::Error> for WinstageError {
    fn from(err: walkdir::Error) -> Self {
        WinstageError::IoError {
            message: err.to_string(),
        }
    }
}

impl From<serde_yaml::Error> for WinstageError {
    fn from(err: serde_yaml::Error) -> Self {
        WinstageError::ConfigParseFailed {
            path: "unknown".to_string(),
            reason: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for WinstageError {
    fn from(err: serde_json::Error) -> Self {
        WinstageError::PlatformCommandFailed {
            operation: "parse output".to_string(),
            reason: err.to_string(),
        }
    }
}

/// Result type alias using miette for error handling
pub type Result<T> = miette::Result<T, WinstageError>;
