//! Append-only operator log
//!
//! One timestamped line per event, e.g.
//! `2020-03-14 09:26:53 [INFO] Installed Arial.ttf`.

use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Local;

use crate::error::{self, Result};

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Warn,
    Error,
}

impl Level {
    fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

/// Flat text event log
///
/// A disabled log accepts events and drops them, so callers never branch on
/// whether logging was configured.
#[derive(Debug)]
pub struct EventLog {
    path: Option<PathBuf>,
    file: Option<File>,
}

impl EventLog {
    /// Open (or create) a log file for appending
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent).map_err(|e| {
                    error::fs::write_failed(parent.display().to_string(), e.to_string())
                })?;
            }
        }

        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| error::fs::write_failed(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path: Some(path),
            file: Some(file),
        })
    }

    pub fn disabled() -> Self {
        Self {
            path: None,
            file: None,
        }
    }

    /// Open the log at `path` if one is configured
    pub fn open_optional(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::open(path),
            None => Ok(Self::disabled()),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    pub fn info(&mut self, message: impl AsRef<str>) {
        self.write(Level::Info, message.as_ref());
    }

    pub fn warn(&mut self, message: impl AsRef<str>) {
        self.write(Level::Warn, message.as_ref());
    }

    pub fn error(&mut self, message: impl AsRef<str>) {
        self.write(Level::Error, message.as_ref());
    }

    /// Append a line; a failing log write is reported once via tracing and
    /// never interrupts the procedure being logged
    pub fn write(&mut self, level: Level, message: &str) {
        let Some(file) = self.file.as_mut() else {
            return;
        };

        let line = format_line(&Local::now().format(TIMESTAMP_FORMAT).to_string(), level, message);
        if let Err(e) = file.write_all(line.as_bytes()) {
            tracing::warn!(
                "Failed to write event log {}: {}",
                self.path.as_deref().map(|p| p.display().to_string()).unwrap_or_default(),
                e
            );
            self.file = None;
        }
    }
}

fn format_line(timestamp: &str, level: Level, message: &str) -> String {
    format!("{} [{}] {}\n", timestamp, level.as_str(), message)
}
