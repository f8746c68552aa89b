//! Font installation into the system font store
//!
//! Every regular file in the source folder is considered once:
//! - a file whose name already exists in the destination is skipped
//! - a file whose declared type is not TrueType/OpenType is skipped
//! - anything else is copied and registered
//!
//! A failure on one file is logged and never stops the remaining files.

pub mod classify;
pub mod registry;

pub use classify::FontKind;
pub use registry::{FontRegistry, RegCommandRegistry};

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::{self, Result};
use crate::event_log::EventLog;
use crate::progress::ProgressDisplay;

/// Extension recorded in the registry for every installed font
pub const RECORDED_EXTENSION: &str = "ttf";

/// A font file read from the source folder
#[derive(Debug, Clone)]
pub struct FontEntry {
    pub source: PathBuf,
    pub file_name: String,
    pub kind: FontKind,
    pub display_name: String,
}

impl FontEntry {
    /// Read and classify a font file
    pub fn read(path: &Path) -> Result<Self> {
        let data = fs::read(path)
            .map_err(|e| error::fs::read_failed(path.display().to_string(), e.to_string()))?;

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        let kind = classify::classify_bytes(&data);
        let display_name = if kind.is_supported() {
            classify::display_name(&data, &classify::file_stem(path))
        } else {
            classify::file_stem(path)
        };

        Ok(Self {
            source: path.to_path_buf(),
            file_name,
            kind,
            display_name,
        })
    }

    /// Registry value name, e.g. `Inter Bold (OpenType)`
    pub fn registry_value_name(&self) -> Option<String> {
        self.kind
            .registry_suffix()
            .map(|suffix| format!("{} {}", self.display_name, suffix))
    }

    /// File name written as the registry value data
    ///
    /// Always `<stem>.ttf` unless `actual_extension` is set, in which case the
    /// real file name is recorded.
    pub fn recorded_file_name(&self, actual_extension: bool) -> String {
        if actual_extension {
            self.file_name.clone()
        } else {
            format!(
                "{}.{}",
                classify::file_stem(Path::new(&self.file_name)),
                RECORDED_EXTENSION
            )
        }
    }
}

/// What happened to a single source file
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InstallOutcome {
    Installed { value_name: String },
    AlreadyInstalled,
    UnsupportedType(String),
    Failed(String),
}

#[derive(Debug, Clone)]
pub struct FontReport {
    pub file_name: String,
    pub outcome: InstallOutcome,
}

/// Per-file outcomes of one installer run
#[derive(Debug, Clone, Default)]
pub struct InstallSummary {
    pub reports: Vec<FontReport>,
}

impl InstallSummary {
    pub fn installed(&self) -> usize {
        self.count(|o| matches!(o, InstallOutcome::Installed { .. }))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| {
            matches!(
                o,
                InstallOutcome::AlreadyInstalled | InstallOutcome::UnsupportedType(_)
            )
        })
    }

    pub fn failed(&self) -> usize {
        self.count(|o| matches!(o, InstallOutcome::Failed(_)))
    }

    fn count(&self, pred: impl Fn(&InstallOutcome) -> bool) -> usize {
        self.reports.iter().filter(|r| pred(&r.outcome)).count()
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct InstallOptions {
    pub record_actual_extension: bool,
}

/// Copies fonts into a destination folder and registers them
pub struct FontInstaller<'a> {
    registry: &'a mut dyn FontRegistry,
    log: &'a mut EventLog,
    options: InstallOptions,
}

impl<'a> FontInstaller<'a> {
    pub fn new(
        registry: &'a mut dyn FontRegistry,
        log: &'a mut EventLog,
        options: InstallOptions,
    ) -> Self {
        Self {
            registry,
            log,
            options,
        }
    }

    /// List installable candidates: regular files, sorted, excluding the log
    pub fn source_files(&self, source: &Path) -> Result<Vec<PathBuf>> {
        if !source.is_dir() {
            return Err(error::fonts::source_missing(source.display().to_string()));
        }

        let mut files = Vec::new();
        for entry in fs::read_dir(source)? {
            let path = entry?.path();
            if !path.is_file() {
                continue;
            }
            if self.log.path() == Some(path.as_path()) {
                continue;
            }
            files.push(path);
        }
        files.sort();
        Ok(files)
    }

    /// Install every font in `source` into `destination`
    pub fn install_all(
        &mut self,
        source: &Path,
        destination: &Path,
        progress: &ProgressDisplay,
    ) -> Result<InstallSummary> {
        if !destination.is_dir() {
            return Err(error::fonts::destination_missing(
                destination.display().to_string(),
            ));
        }

        let files = self.source_files(source)?;
        self.log.info(format!(
            "Installing {} file(s) from {} into {}",
            files.len(),
            source.display(),
            destination.display()
        ));

        let mut summary = InstallSummary::default();
        for path in files {
            let report = self.install_one(&path, destination);
            progress.update_file(&report.file_name);
            summary.reports.push(report);
        }

        self.log.info(format!(
            "Finished: {} installed, {} skipped, {} failed",
            summary.installed(),
            summary.skipped(),
            summary.failed()
        ));
        Ok(summary)
    }

    /// Install a single font, logging the outcome
    pub fn install_one(&mut self, path: &Path, destination: &Path) -> FontReport {
        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_default();
        // The lossy name is for display only
        let target = match path.file_name() {
            Some(name) => destination.join(name),
            None => destination.join(&file_name),
        };

        let outcome = if target.exists() {
            self.log
                .warn(format!("{file_name} skipped: already exists in {}", destination.display()));
            InstallOutcome::AlreadyInstalled
        } else {
            match FontEntry::read(path) {
                Ok(entry) if !entry.kind.is_supported() => {
                    self.log.warn(format!(
                        "{file_name} skipped: unsupported type '{}'",
                        entry.kind
                    ));
                    InstallOutcome::UnsupportedType(entry.kind.label().to_string())
                }
                Ok(entry) => match self.copy_and_register(&entry, &target) {
                    Ok(value_name) => {
                        self.log
                            .info(format!("{file_name} installed as '{value_name}'"));
                        InstallOutcome::Installed { value_name }
                    }
                    Err(e) => {
                        self.log.error(format!("{file_name} failed: {e}"));
                        InstallOutcome::Failed(e.to_string())
                    }
                },
                Err(e) => {
                    self.log.error(format!("{file_name} failed: {e}"));
                    InstallOutcome::Failed(e.to_string())
                }
            }
        };

        debug!("{}: {:?}", file_name, outcome);
        FontReport { file_name, outcome }
    }

    fn copy_and_register(&mut self, entry: &FontEntry, target: &Path) -> Result<String> {
        copy_new(&entry.source, target)?;

        let value_name = entry
            .registry_value_name()
            .unwrap_or_else(|| entry.display_name.clone());
        let recorded = entry.recorded_file_name(self.options.record_actual_extension);
        self.registry.register(&value_name, &recorded)?;

        Ok(value_name)
    }
}

/// Copy `src` to `dst`, refusing to overwrite an existing file
fn copy_new(src: &Path, dst: &Path) -> Result<()> {
    let write_err = |e: io::Error| error::fs::write_failed(dst.display().to_string(), e.to_string());

    let mut reader = File::open(src)
        .map_err(|e| error::fs::read_failed(src.display().to_string(), e.to_string()))?;
    let mut writer = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(dst)
        .map_err(write_err)?;

    if let Err(e) = io::copy(&mut reader, &mut writer) {
        drop(writer);
        if let Err(cleanup) = fs::remove_file(dst) {
            warn!("Failed to remove partial copy {}: {}", dst.display(), cleanup);
        }
        return Err(write_err(e));
    }

    Ok(())
}
