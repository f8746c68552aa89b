//! Marker files for driver hash deduplication
//!
//! The management platform skips driver content whose hash it has already
//! imported, even when the content belongs to a different bundle. Dropping a
//! bundle-specific text file into every folder of the source tree changes
//! those hashes so the import picks up every driver.

use std::fs;
use std::path::Path;

use tracing::debug;
use walkdir::WalkDir;

use crate::error::{self, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MarkerReport {
    /// Whether the marker was created in the source root by this run
    pub created: bool,
    /// Number of subfolders the marker was copied into
    pub copies: usize,
}

/// Create the marker in `source` if absent, then copy it into every subfolder
pub fn place_markers(source: &Path, file_name: &str, content: &str) -> Result<MarkerReport> {
    let marker = source.join(file_name);
    let mut report = MarkerReport::default();

    if !marker.exists() {
        fs::write(&marker, content)
            .map_err(|e| error::fs::write_failed(marker.display().to_string(), e.to_string()))?;
        debug!("Created marker {}", marker.display());
        report.created = true;
    }

    for entry in WalkDir::new(source).min_depth(1) {
        let entry = entry?;
        if !entry.file_type().is_dir() {
            continue;
        }

        let target = entry.path().join(file_name);
        fs::copy(&marker, &target)
            .map_err(|e| error::fs::write_failed(target.display().to_string(), e.to_string()))?;
        report.copies += 1;
    }

    debug!("Copied marker into {} folder(s)", report.copies);
    Ok(report)
}
