//! CLI definitions using clap derive API
//!
//! This module is organized into submodules for each command's argument types:
//! - fonts: Font installer arguments
//! - driver_package: Driver package stager arguments
//! - completions: Completions command arguments

use clap::builder::{Styles, styling::AnsiColor};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub mod completions;
pub mod driver_package;
pub mod fonts;

pub use completions::CompletionsArgs;
pub use driver_package::DriverPackageArgs;
pub use fonts::FontsArgs;

/// winstage - workstation staging for fonts and driver packages
#[derive(Parser, Debug)]
#[command(
    name = "winstage",
    author,
    version,
    styles = Styles::styled()
        .header(AnsiColor::Green.on_default().bold())
        .usage(AnsiColor::Green.on_default().bold())
        .literal(AnsiColor::Cyan.on_default().bold())
        .placeholder(AnsiColor::Cyan.on_default()),
    about = "Install fonts and stage driver packages on Windows",
    long_about = "winstage installs the fonts shipped next to it into the system font store, \
                  and stages vendor driver bundles as driver packages on a Configuration \
                  Manager site.",
    after_help = "\x1b[1m\x1b[32mExamples:\x1b[0m\n   \
                  winstage fonts                                   \x1b[90m# Install fonts next to the executable\x1b[0m\n   \
                  winstage driver-package \"Latitude 7480\" 1909_2020-03 \x1b[90m# Stage a driver bundle\x1b[0m\n   \
                  winstage models                                  \x1b[90m# List supported models\x1b[0m\n\n\
                  "
)]
pub struct Cli {
    /// Configuration file (defaults to ./winstage.yaml, then the user config dir)
    #[arg(long, short = 'c', global = true, env = "WINSTAGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose output
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Install fonts into the system font store
    Fonts(FontsArgs),

    /// Stage a driver bundle as a driver package
    #[command(name = "driver-package")]
    DriverPackage(DriverPackageArgs),

    /// List supported hardware models
    Models,

    /// Show version information
    #[command(hide = true)]
    Version,

    /// Generate shell completions
    Completions(CompletionsArgs),
}
