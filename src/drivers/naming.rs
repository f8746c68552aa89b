//! Paths and names derived from a model and a version label
//!
//! Existing packages on the site follow these conventions, so the derived
//! strings have to match them character for character.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::DriverModel;
use crate::error::WinstageError;

/// Driver bundle version label, e.g. `1909_2020-03`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionLabel(String);

impl VersionLabel {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Part after the last underscore (`2020-03` for `1909_2020-03`)
    pub fn release(&self) -> &str {
        self.0.rsplit('_').next().unwrap_or(&self.0)
    }

    /// Underscores shown as ` - ` (`1909 - 2020-03`)
    pub fn display_form(&self) -> String {
        self.0.replace('_', " - ")
    }
}

impl FromStr for VersionLabel {
    type Err = WinstageError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let label = s.trim();
        let invalid = label.is_empty()
            || label == "."
            || label == ".."
            || label.contains(['/', '\\', ':'])
            || label.ends_with('_');
        if invalid {
            return Err(WinstageError::InvalidVersion {
                label: s.to_string(),
            });
        }
        Ok(Self(label.to_string()))
    }
}

impl fmt::Display for VersionLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Model name with spaces replaced by underscores (`Latitude_7480`)
pub fn model_token(model: DriverModel) -> String {
    model.name().replace(' ', "_")
}

/// Everything the stager needs to know before touching the file system
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingPlan {
    pub model: DriverModel,
    pub version: VersionLabel,
    /// `<source root>/<model>/<version>`
    pub source_path: PathBuf,
    /// `<package root>/<model>`
    pub model_folder: PathBuf,
    /// `<package root>/<model>/<version>`
    pub version_folder: PathBuf,
    pub package_name: String,
    pub category_name: String,
    pub marker_file_name: String,
}

impl StagingPlan {
    pub fn resolve(
        model: DriverModel,
        version: VersionLabel,
        source_root: &Path,
        package_root: &Path,
    ) -> Self {
        let source_path = source_root.join(model.name()).join(version.as_str());
        let model_folder = package_root.join(model.name());
        let version_folder = model_folder.join(version.as_str());
        let package_name = format!("{} - {}", model.name(), version.release());
        let marker_file_name = format!("{}_{}.mod.txt", model_token(model), version.as_str());

        Self {
            model,
            source_path,
            model_folder,
            version_folder,
            category_name: package_name.clone(),
            package_name,
            marker_file_name,
            version,
        }
    }

    /// Package description shown in the console
    pub fn description(&self) -> String {
        format!("{} drivers ({})", self.model, self.version.display_form())
    }

    /// Marker file content; the text only has to differ between bundles
    pub fn marker_content(&self) -> String {
        format!(
            "Hash modifier for {} ({})\r\n",
            self.package_name,
            self.version.as_str()
        )
    }
}
