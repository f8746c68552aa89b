//! Common test utilities for winstage integration tests

use std::path::{Path, PathBuf};

use assert_cmd::Command;
use tempfile::TempDir;

/// First bytes of a TrueType font file
pub const TTF_HEADER: &[u8] = &[0x00, 0x01, 0x00, 0x00, 0x00, 0x0a, 0x00, 0x80];

/// First bytes of an OpenType (CFF) font file
#[allow(dead_code)]
pub const OTF_HEADER: &[u8] = b"OTTO\x00\x0a\x00\x80";

/// A temporary working directory with its own `winstage.yaml`
pub struct TestWorkspace {
    /// Temporary directory
    #[allow(dead_code)]
    pub temp: TempDir,
    /// Path to workspace root
    pub path: PathBuf,
}

impl TestWorkspace {
    /// Create a new test workspace with an empty configuration
    pub fn new() -> Self {
        let temp = TempDir::new().expect("Failed to create temp directory");
        let path = temp.path().to_path_buf();
        let workspace = Self { temp, path };
        workspace.write_config("");
        workspace
    }

    /// Replace `winstage.yaml`
    pub fn write_config(&self, yaml: &str) {
        self.write_file("winstage.yaml", yaml);
    }

    pub fn config_path(&self) -> PathBuf {
        self.path.join("winstage.yaml")
    }

    /// Write a file in workspace
    pub fn write_file(&self, path: &str, content: &str) {
        self.write_bytes(path, content.as_bytes());
    }

    pub fn write_bytes(&self, path: &str, content: &[u8]) {
        let file_path = self.path.join(path);
        if let Some(parent) = file_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create parent directory");
        }
        std::fs::write(&file_path, content).expect("Failed to write file");
    }

    pub fn create_dir(&self, path: &str) -> PathBuf {
        let dir = self.path.join(path);
        std::fs::create_dir_all(&dir).expect("Failed to create directory");
        dir
    }

    /// Read a file from workspace
    #[allow(dead_code)]
    pub fn read_file(&self, path: &str) -> String {
        let file_path = self.path.join(path);
        std::fs::read_to_string(&file_path).expect("Failed to read file")
    }

    /// Check if a file exists in workspace
    pub fn file_exists(&self, path: &str) -> bool {
        self.path.join(path).exists()
    }

    /// winstage command running inside the workspace with its config
    pub fn cmd(&self) -> Command {
        let mut cmd = winstage_cmd();
        cmd.current_dir(&self.path)
            .env("WINSTAGE_CONFIG", self.config_path())
            .env_remove("RUST_LOG");
        cmd
    }

    /// Lay out a driver bundle under `Source/<model>/<version>`
    #[allow(dead_code)]
    pub fn create_driver_bundle(&self, model: &str, version: &str) -> PathBuf {
        let root = format!("Source/{model}/{version}");
        self.write_file(&format!("{root}/audio/x64/audio.inf"), "[Version]");
        self.write_file(&format!("{root}/audio/x64/audio.sys"), "binary");
        self.write_file(&format!("{root}/chipset/chipset.inf"), "[Version]");
        self.create_dir(&format!("{root}/network/wlan"));
        self.path.join(root)
    }
}

impl Default for TestWorkspace {
    fn default() -> Self {
        Self::new()
    }
}

// Temporary fix for deprecated cargo_bin - will be updated when build-dir issues are resolved
#[allow(deprecated)]
pub fn winstage_cmd() -> Command {
    Command::cargo_bin("winstage").expect("winstage binary is built")
}

/// Every directory under `root` (inclusive) that lacks `file_name`
#[allow(dead_code)]
pub fn dirs_missing(root: &Path, file_name: &str) -> Vec<PathBuf> {
    walkdir::WalkDir::new(root)
        .into_iter()
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_dir() && !e.path().join(file_name).is_file())
        .map(|e| e.path().to_path_buf())
        .collect()
}
