//! Fonts command implementation
//!
//! Installs every font found in the source folder (by default the folder
//! holding the executable) into the system font store.

use std::path::{Path, PathBuf};

use console::Term;
use tracing::debug;

use crate::cli::FontsArgs;
use crate::config::{self, Config, DEFAULT_FONT_LOG};
use crate::error::{self, Result};
use crate::event_log::EventLog;
use crate::fonts::{FontInstaller, InstallOptions, RegCommandRegistry};
use crate::progress::ProgressDisplay;
use crate::ui;

/// Run fonts command
pub fn run(config_path: Option<PathBuf>, args: FontsArgs) -> Result<()> {
    let config = config::load_config(config_path.as_deref())?;

    let source = match args.source {
        Some(source) => source,
        None => executable_dir()?,
    };
    if !source.is_dir() {
        return Err(error::fonts::source_missing(source.display().to_string()));
    }

    let destination = args
        .destination
        .unwrap_or_else(|| config.fonts_destination());
    let log_path = resolve_log_path(&source, args.log_file, &config);
    debug!(
        "Fonts: source={}, destination={}, log={}",
        source.display(),
        destination.display(),
        log_path.display()
    );

    let mut log = EventLog::open(&log_path)?;
    let mut registry = RegCommandRegistry::new();
    let options = InstallOptions {
        record_actual_extension: config.fonts.record_actual_extension,
    };
    let mut installer = FontInstaller::new(&mut registry, &mut log, options);

    let total = installer.source_files(&source)?.len() as u64;
    let progress = if Term::stdout().is_term() {
        ProgressDisplay::new(total)
    } else {
        ProgressDisplay::hidden()
    };

    let summary = match installer.install_all(&source, &destination, &progress) {
        Ok(summary) => {
            progress.finish();
            summary
        }
        Err(e) => {
            progress.abandon();
            return Err(e);
        }
    };

    ui::display_install_summary(&summary);
    Ok(())
}

/// Folder holding the running executable
fn executable_dir() -> Result<PathBuf> {
    let exe = std::env::current_exe()?;
    exe.parent()
        .map(Path::to_path_buf)
        .ok_or_else(|| error::fonts::source_missing(exe.display().to_string()))
}

/// Log path from the command line, the config file, or the default
///
/// Relative paths from the config file resolve against the source folder.
fn resolve_log_path(source: &Path, flag: Option<PathBuf>, config: &Config) -> PathBuf {
    if let Some(path) = flag {
        return path;
    }
    let configured = config
        .fonts
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FONT_LOG));
    if configured.is_absolute() {
        configured
    } else {
        source.join(configured)
    }
}
