//! Local filesystem adapter using std::fs.

use std::io;
use std::path::Path;

use exforge_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{ExforgeError, ExforgeResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl Filesystem for LocalFilesystem {
    fn create_dir(&self, path: &Path) -> ExforgeResult<()> {
        std::fs::create_dir(path).map_err(|e| map_io_error(path, e, "create directory"))
    }

    fn write_file(&self, path: &Path, content: &str) -> ExforgeResult<()> {
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn read_file(&self, path: &Path) -> ExforgeResult<Option<String>> {
        match std::fs::read_to_string(path) {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(map_io_error(path, e, "read file")),
        }
    }

    fn exists(&self, path: &Path) -> bool {
        // symlink_metadata so a dangling link still counts as taken
        path.symlink_metadata().is_ok()
    }
}

fn map_io_error(path: &Path, e: io::Error, operation: &str) -> ExforgeError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn create_dir_is_not_recursive() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();

        assert!(fs.create_dir(&tmp.path().join("a/b")).is_err());
        fs.create_dir(&tmp.path().join("a")).unwrap();
        fs.create_dir(&tmp.path().join("a/b")).unwrap();
    }

    #[test]
    fn create_dir_fails_when_present() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let dir = tmp.path().join("demo");

        fs.create_dir(&dir).unwrap();
        let err = fs.create_dir(&dir).unwrap_err();
        assert!(err.to_string().contains("create directory"));
    }

    #[test]
    fn read_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();
        let path = tmp.path().join("package.json");

        assert_eq!(fs.read_file(&path).unwrap(), None);
        fs.write_file(&path, "{}\n").unwrap();
        assert_eq!(fs.read_file(&path).unwrap().as_deref(), Some("{}\n"));
    }

    #[test]
    fn exists_sees_files_and_directories() {
        let tmp = TempDir::new().unwrap();
        let fs = LocalFilesystem::new();

        assert!(fs.exists(tmp.path()));
        assert!(!fs.exists(&tmp.path().join("nope")));

        let file = tmp.path().join("taken");
        std::fs::write(&file, "").unwrap();
        assert!(fs.exists(&file));
    }

    #[cfg(unix)]
    #[test]
    fn dangling_symlink_counts_as_existing() {
        let tmp = TempDir::new().unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(tmp.path().join("missing"), &link).unwrap();

        assert!(LocalFilesystem::new().exists(&link));
    }
}
