//! Configuration file handling for winstage
//!
//! This module contains data structures for `winstage.yaml`, the optional
//! site configuration shared by the font installer and the driver stager.

pub mod file;

pub use file::load_config;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Default location of the system font store
pub const DEFAULT_FONTS_DIR: &str = r"C:\Windows\Fonts";

/// Default font installer log file name, relative to the source folder
pub const DEFAULT_FONT_LOG: &str = "FontInstall.log";

/// Default PowerShell executable used to reach the management platform
pub const DEFAULT_POWERSHELL: &str = "powershell";

/// Root configuration (winstage.yaml)
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub fonts: FontsConfig,
    pub drivers: DriversConfig,
    pub platform: PlatformConfig,
}

/// Font installer settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FontsConfig {
    /// System font directory; defaults to `%WINDIR%\Fonts`
    pub destination: Option<PathBuf>,

    /// Event log path; relative paths resolve against the source folder
    pub log_file: Option<PathBuf>,

    /// Record the real file name in the registry instead of `<stem>.ttf`
    pub record_actual_extension: bool,
}

/// Driver stager settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriversConfig {
    /// Root of the extracted driver bundles (`<root>\<model>\<version>`)
    pub source_root: Option<PathBuf>,

    /// Root of the package content folders (`<root>\<model>\<version>`)
    pub package_root: Option<PathBuf>,

    /// Distribution point group that receives the package content
    pub distribution_point_group: Option<String>,

    pub log_file: Option<PathBuf>,
}

/// Management platform connection settings
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlatformConfig {
    /// Three-character site code, used as the PowerShell drive name
    pub site_code: Option<String>,

    /// PowerShell executable (e.g. `powershell` or `pwsh`)
    pub powershell: Option<String>,

    /// Explicit path to `ConfigurationManager.psd1`
    pub module_path: Option<PathBuf>,
}

impl Config {
    /// Parse configuration from a YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        if yaml.trim().is_empty() {
            return Ok(Self::default());
        }
        Ok(serde_yaml::from_str(yaml)?)
    }

    /// Destination font folder, falling back to `%WINDIR%\Fonts`
    pub fn fonts_destination(&self) -> PathBuf {
        if let Some(dir) = &self.fonts.destination {
            return dir.clone();
        }
        match std::env::var_os("WINDIR") {
            Some(windir) => PathBuf::from(windir).join("Fonts"),
            None => PathBuf::from(DEFAULT_FONTS_DIR),
        }
    }

    pub fn powershell(&self) -> &str {
        self.platform
            .powershell
            .as_deref()
            .unwrap_or(DEFAULT_POWERSHELL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = Config::from_yaml("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_parse_full_config() {
        let yaml = r"
fonts:
  destination: /fonts
  log_file: install.log
  record_actual_extension: true
drivers:
  source_root: /drivers/source
  package_root: /drivers/packages
  distribution_point_group: All Distribution Points
platform:
  site_code: P01
  powershell: pwsh
";
        let config = Config::from_yaml(yaml).unwrap();
        assert_eq!(config.fonts.destination, Some(PathBuf::from("/fonts")));
        assert!(config.fonts.record_actual_extension);
        assert_eq!(
            config.drivers.package_root,
            Some(PathBuf::from("/drivers/packages"))
        );
        assert_eq!(
            config.drivers.distribution_point_group.as_deref(),
            Some("All Distribution Points")
        );
        assert_eq!(config.platform.site_code.as_deref(), Some("P01"));
        assert_eq!(config.powershell(), "pwsh");
    }

    #[test]
    fn test_partial_config_keeps_defaults() {
        let config = Config::from_yaml("platform:\n  site_code: ABC\n").unwrap();
        assert_eq!(config.platform.site_code.as_deref(), Some("ABC"));
        assert!(!config.fonts.record_actual_extension);
        assert_eq!(config.powershell(), DEFAULT_POWERSHELL);
    }

    #[test]
    fn test_invalid_yaml_is_error() {
        assert!(Config::from_yaml("fonts: [unclosed").is_err());
    }

    #[test]
    fn test_explicit_fonts_destination() {
        let mut config = Config::default();
        config.fonts.destination = Some(PathBuf::from("/custom/fonts"));
        assert_eq!(config.fonts_destination(), PathBuf::from("/custom/fonts"));
    }
}
