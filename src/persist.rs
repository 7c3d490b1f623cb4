//! Destination file operations.
//!
//! Thin wrappers over the filesystem that attach the offending path to
//! every error. Parent directories are never created implicitly: a spec
//! pointing into a missing directory surfaces as an IO error.

use crate::error::{Error, Result};
use std::fs;
use std::io;
use std::path::Path;

/// Write all bytes to `path`, creating or truncating the file.
pub fn write(path: &Path, bytes: &[u8]) -> Result<()> {
    fs::write(path, bytes).map_err(|e| Error::io(path, e))
}

/// Remove the file at `path`. Absence is not an error.
pub fn remove(path: &Path) -> Result<()> {
    match fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(Error::io(path, e)),
    }
}

/// Check whether a file exists at `path`.
///
/// Only a definitive NotFound reads as absent; any other stat failure
/// (permission denied, a regular file in the middle of the path) surfaces
/// as an IO error instead of masquerading as absence.
pub fn exists(path: &Path) -> Result<bool> {
    path.try_exists().map_err(|e| Error::io(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        write(&path, b"payload").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"payload");
    }

    #[test]
    fn test_write_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        write(&path, b"first, longer content").unwrap();
        write(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("no-such-dir").join("out.bin");

        let err = write(&path, b"payload").unwrap_err();
        assert!(err.to_string().contains("no-such-dir"));
    }

    #[test]
    fn test_remove_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");
        fs::write(&path, b"payload").unwrap();

        remove(&path).unwrap();
        assert!(!exists(&path).unwrap());
    }

    #[test]
    fn test_remove_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();

        let err = remove(dir.path()).unwrap_err();
        assert!(err.to_string().contains(&dir.path().display().to_string()));
        assert!(dir.path().exists());
    }

    #[test]
    fn test_remove_absent_file_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("never-existed.bin");

        remove(&path).unwrap();
        remove(&path).unwrap();
    }

    #[test]
    fn test_exists() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.bin");

        assert!(!exists(&path).unwrap());
        fs::write(&path, b"payload").unwrap();
        assert!(exists(&path).unwrap());
    }

    #[test]
    fn test_exists_stat_failure_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("leaf.bin");
        fs::write(&file, b"payload").unwrap();

        // A regular file in the middle of the path fails the stat with
        // NotADirectory, which must not read as absence.
        let err = exists(&file.join("child")).unwrap_err();
        assert!(err.to_string().contains("child"));
    }
}
