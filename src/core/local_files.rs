use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::defaults::{BACKUP_SUFFIX, TEMP_SUFFIX};
use crate::error::{Error, FileOperation, Result};

/// How changed content reaches the disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WriteMode {
    /// Truncate and overwrite the file at its path.
    #[default]
    InPlace,
    /// Write a sibling temp file, then rename it over the original.
    Atomic,
}

/// Trait for the file operations the replacer performs.
pub trait FileSystem {
    /// Read the whole file and decode it as UTF-8.
    fn read_text(&self, path: &Path) -> Result<String>;
    fn write_text(&self, path: &Path, content: &str, mode: WriteMode) -> Result<()>;
    /// Copy the current file next to itself with the backup suffix.
    /// An existing backup is never overwritten.
    fn backup(&self, path: &Path) -> Result<PathBuf>;
}

/// Local filesystem implementation
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl Default for LocalFs {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem for LocalFs {
    fn read_text(&self, path: &Path) -> Result<String> {
        let bytes = fs::read(path).map_err(|e| Error::file_access(path, FileOperation::Read, e))?;
        String::from_utf8(bytes).map_err(|e| Error::file_encoding(path, &e))
    }

    fn write_text(&self, path: &Path, content: &str, mode: WriteMode) -> Result<()> {
        match mode {
            WriteMode::InPlace => fs::write(path, content)
                .map_err(|e| Error::file_access(path, FileOperation::Write, e)),
            WriteMode::Atomic => write_atomic(path, content),
        }
    }

    fn backup(&self, path: &Path) -> Result<PathBuf> {
        let backup_path = sibling_with_suffix(path, BACKUP_SUFFIX)?;

        let mut source =
            fs::File::open(path).map_err(|e| Error::file_access(path, FileOperation::Read, e))?;
        let mut target = fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&backup_path)
            .map_err(|e| {
                let exists = e.kind() == std::io::ErrorKind::AlreadyExists;
                let err = Error::file_access(&backup_path, FileOperation::Backup, e);
                if exists {
                    err.with_hint("Move or delete the existing backup before rerunning with --backup")
                } else {
                    err
                }
            })?;

        if let Err(e) = std::io::copy(&mut source, &mut target) {
            drop(target);
            let _ = fs::remove_file(&backup_path);
            return Err(Error::file_access(&backup_path, FileOperation::Backup, e));
        }

        Ok(backup_path)
    }
}

fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let tmp_path = sibling_with_suffix(path, TEMP_SUFFIX)?;

    if let Err(e) = fs::write(&tmp_path, content) {
        let _ = fs::remove_file(&tmp_path);
        return Err(Error::file_access(path, FileOperation::Write, e));
    }

    // Carry the original permissions over so the rename does not reset them.
    if let Ok(meta) = fs::metadata(path) {
        let _ = fs::set_permissions(&tmp_path, meta.permissions());
    }

    fs::rename(&tmp_path, path).map_err(|e| {
        let _ = fs::remove_file(&tmp_path);
        Error::file_access(path, FileOperation::Write, e)
    })
}

fn sibling_with_suffix(path: &Path, suffix: &str) -> Result<PathBuf> {
    let filename = path.file_name().ok_or_else(|| {
        Error::validation_invalid_argument(
            "path",
            format!("Invalid file path: {}", path.display()),
            Some(path.display().to_string()),
        )
    })?;

    let mut name = filename.to_os_string();
    name.push(suffix);
    Ok(path.with_file_name(name))
}

/// Get the local filesystem
pub fn local() -> LocalFs {
    LocalFs::new()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorCode;
    use tempfile::TempDir;

    #[test]
    fn read_text_rejects_invalid_utf8() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("latin1.jsx");
        fs::write(&path, [b'C', b'a', b'f', 0xe9]).unwrap();

        let err = local().read_text(&path).unwrap_err();
        assert_eq!(err.code, ErrorCode::FileEncodingInvalid);
    }

    #[test]
    fn read_text_missing_file_is_access_error() {
        let dir = TempDir::new().unwrap();
        let err = local().read_text(&dir.path().join("gone.jsx")).unwrap_err();

        assert_eq!(err.code, ErrorCode::FileAccessFailed);
        assert_eq!(err.details["operation"], "read");
    }

    #[test]
    fn atomic_write_replaces_content_and_leaves_no_temp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("App.jsx");
        fs::write(&path, "old").unwrap();

        local().write_text(&path, "new", WriteMode::Atomic).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "new");
        assert!(!dir.path().join("App.jsx.relabel.tmp").exists());
    }

    #[test]
    fn backup_copies_original_content() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("App.jsx");
        fs::write(&path, "Personnel").unwrap();

        let backup = local().backup(&path).unwrap();

        assert_eq!(backup, dir.path().join("App.jsx.bak"));
        assert_eq!(fs::read_to_string(backup).unwrap(), "Personnel");
    }

    #[test]
    fn backup_refuses_to_overwrite_existing_copy() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("App.jsx");
        fs::write(&path, "Driver").unwrap();
        fs::write(dir.path().join("App.jsx.bak"), "Personnel").unwrap();

        let err = local().backup(&path).unwrap_err();

        assert_eq!(err.code, ErrorCode::FileAccessFailed);
        assert_eq!(err.details["operation"], "backup");
        assert_eq!(err.hints.len(), 1);
        assert_eq!(
            fs::read_to_string(dir.path().join("App.jsx.bak")).unwrap(),
            "Personnel"
        );
    }
}
