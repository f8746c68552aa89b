//! Font registration store
//!
//! Windows resolves installed fonts through string values under the Fonts
//! key, mapping a display name such as `Inter Bold (OpenType)` to the file
//! name inside the system font folder.

use std::process::Command;

use tracing::debug;

use crate::error::{self, Result};

/// Registry key holding font registrations
pub const FONTS_KEY: &str = r"HKLM\SOFTWARE\Microsoft\Windows NT\CurrentVersion\Fonts";

/// Key-value store that receives one entry per installed font
pub trait FontRegistry {
    fn register(&mut self, value_name: &str, file_name: &str) -> Result<()>;
}

/// Writes registrations with the `reg` command-line tool
#[derive(Debug, Clone)]
pub struct RegCommandRegistry {
    program: String,
    key: String,
}

impl RegCommandRegistry {
    pub fn new() -> Self {
        Self {
            program: "reg".to_string(),
            key: FONTS_KEY.to_string(),
        }
    }

    /// Arguments for `reg add`, overwriting any existing value
    fn add_args<'a>(&'a self, value_name: &'a str, file_name: &'a str) -> [&'a str; 9] {
        [
            "add",
            self.key.as_str(),
            "/v",
            value_name,
            "/t",
            "REG_SZ",
            "/d",
            file_name,
            "/f",
        ]
    }
}

impl Default for RegCommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl FontRegistry for RegCommandRegistry {
    fn register(&mut self, value_name: &str, file_name: &str) -> Result<()> {
        debug!("{} add {}\\{} = {}", self.program, self.key, value_name, file_name);

        let output = Command::new(&self.program)
            .args(self.add_args(value_name, file_name))
            .output()
            .map_err(|e| error::fonts::registration_failed(value_name, e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(error::fonts::registration_failed(
                value_name,
                format!(
                    "reg exited with {}: {}",
                    output.status.code().unwrap_or(-1),
                    stderr.trim()
                ),
            ));
        }

        Ok(())
    }
}
