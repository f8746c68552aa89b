//! BLAKE3 fingerprints of driver source trees
//!
//! The management platform rejects driver content it has already seen. The
//! fingerprint lets the stager show that placing marker files actually
//! changed what the platform will hash.

use std::fs::File;
use std::path::Path;

use blake3::Hasher;
use walkdir::WalkDir;

use crate::error::{self, Result, WinstageError};

/// Hash prefix for BLAKE3 fingerprints
pub const HASH_PREFIX: &str = "blake3:";

fn update_from_file(hasher: &mut Hasher, path: &Path) -> Result<()> {
    let read_err =
        |e: std::io::Error| error::fs::read_failed(path.display().to_string(), e.to_string());
    let file = File::open(path).map_err(read_err)?;
    hasher.update_reader(file).map_err(read_err)?;
    Ok(())
}

/// Calculate a BLAKE3 fingerprint of a directory's contents
///
/// Files are visited in file name order, and each file's relative path is
/// hashed ahead of its contents so that a moved file changes the result.
pub fn hash_directory(path: &Path) -> Result<String> {
    if !path.is_dir() {
        return Err(WinstageError::FileNotFound {
            path: path.display().to_string(),
        });
    }

    let mut hasher = Hasher::new();
    for entry in WalkDir::new(path).sort_by_file_name() {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let relative = entry
            .path()
            .strip_prefix(path)
            .unwrap_or(entry.path())
            .to_string_lossy()
            .replace('\\', "/");
        hasher.update(relative.as_bytes());
        hasher.update(b"\0");
        update_from_file(&mut hasher, entry.path())?;
        hasher.update(b"\0");
    }

    Ok(format!("{}{}", HASH_PREFIX, hasher.finalize().to_hex()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_hash_directory() {
        let temp = TempDir::new().unwrap();

        std::fs::write(temp.path().join("driver.inf"), "[Version]").unwrap();
        std::fs::create_dir(temp.path().join("audio")).unwrap();
        std::fs::write(temp.path().join("audio/audio.inf"), "[Version]").unwrap();

        let hash = hash_directory(temp.path()).unwrap();
        assert!(hash.starts_with(HASH_PREFIX));
    }

    #[test]
    fn test_hash_directory_deterministic() {
        let temp = TempDir::new().unwrap();

        std::fs::write(temp.path().join("a.inf"), "aaa").unwrap();
        std::fs::write(temp.path().join("b.sys"), "bbb").unwrap();

        let hash1 = hash_directory(temp.path()).unwrap();
        let hash2 = hash_directory(temp.path()).unwrap();
        assert_eq!(hash1, hash2);
    }

    #[test]
    fn test_hash_changes_when_file_added() {
        let temp = TempDir::new().unwrap();
        std::fs::create_dir(temp.path().join("chipset")).unwrap();
        std::fs::write(temp.path().join("chipset/chipset.inf"), "[Version]").unwrap();
        let before = hash_directory(temp.path()).unwrap();

        std::fs::write(temp.path().join("chipset/marker.txt"), "marker").unwrap();
        let after = hash_directory(temp.path()).unwrap();

        assert_ne!(before, after);
    }

    #[test]
    fn test_hash_directory_not_found() {
        let result = hash_directory(Path::new("/nonexistent/drivers"));
        assert!(matches!(result, Err(WinstageError::FileNotFound { .. })));
    }
}
