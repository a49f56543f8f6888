use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::domain::slot::{PersistenceSlot, SlotError};

/// Slot backed by `<dir>/<key>.json` on the local filesystem.
#[derive(Debug, Clone)]
pub struct FileSlot {
    dir: PathBuf,
    key: String,
    path: PathBuf,
}

impl FileSlot {
    /// Fails when `key` could name a file outside `dir`.
    pub fn new(dir: impl Into<PathBuf>, key: impl Into<String>) -> Result<Self, SlotError> {
        let dir = dir.into();
        let key = key.into();
        validate_key(&key)?;
        let path = dir.join(format!("{key}.json"));
        Ok(Self { dir, key, path })
    }

    pub fn path(&self) -> &Path { &self.path }

    fn write_error(&self, path: &Path, source: std::io::Error) -> SlotError {
        SlotError::Write { key: self.key.clone(), path: path.to_path_buf(), source }
    }
}

impl PersistenceSlot for FileSlot {
    fn key(&self) -> &str { &self.key }

    fn read(&self) -> Result<Option<String>, SlotError> {
        match fs::read_to_string(&self.path) {
            Ok(value) => Ok(Some(value)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(source) => Err(SlotError::Read { key: self.key.clone(), path: self.path.clone(), source }),
        }
    }

    fn write(&self, value: &str) -> Result<(), SlotError> {
        if !self.dir.as_os_str().is_empty() {
            fs::create_dir_all(&self.dir).map_err(|e| self.write_error(&self.dir, e))?;
        }
        // Write next to the target and rename so readers never see a half-written value.
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, value).map_err(|e| self.write_error(&tmp, e))?;
        if let Err(source) = fs::rename(&tmp, &self.path) {
            let _ = fs::remove_file(&tmp);
            return Err(self.write_error(&self.path, source));
        }
        tracing::trace!(key = %self.key, path = %self.path.display(), bytes = value.len(), "slot written");
        Ok(())
    }
}

fn validate_key(key: &str) -> Result<(), SlotError> {
    let reason = if key.is_empty() {
        "empty"
    } else if key.contains(['/', '\\', '\0']) {
        "contains a path separator"
    } else if key.contains("..") {
        "contains `..`"
    } else {
        return Ok(());
    };
    Err(SlotError::InvalidKey { key: key.to_string(), reason })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_reads_as_absent() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path(), "todos").unwrap();
        assert!(slot.read().unwrap().is_none());
    }

    #[test]
    fn write_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let slot = FileSlot::new(dir.path().join("nested").join("data"), "todos").unwrap();
        slot.write("[1,2,3]").unwrap();
        slot.write("[]").unwrap();
        assert_eq!(slot.read().unwrap().as_deref(), Some("[]"));
        assert_eq!(slot.path().file_name().unwrap(), "todos.json");
        assert!(!slot.path().with_extension("json.tmp").exists());
    }

    #[test]
    fn unreadable_path_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the slot file should be cannot be read as text.
        fs::create_dir_all(dir.path().join("todos.json")).unwrap();
        let slot = FileSlot::new(dir.path(), "todos").unwrap();
        assert!(matches!(slot.read(), Err(SlotError::Read { .. })));
    }

    #[test]
    fn keys_that_escape_the_directory_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        for key in ["", "../x", "a/b", "a\\b", "..", "x..y"] {
            assert!(
                matches!(FileSlot::new(dir.path(), key), Err(SlotError::InvalidKey { .. })),
                "accepted {key:?}"
            );
        }
        assert!(FileSlot::new(dir.path(), "work-2024.v1").is_ok());
    }

    #[test]
    fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory at the target path makes the rename fail.
        fs::create_dir_all(dir.path().join("todos.json").join("inner")).unwrap();
        let slot = FileSlot::new(dir.path(), "todos").unwrap();
        assert!(matches!(slot.write("[]"), Err(SlotError::Write { .. })));
        assert!(!dir.path().join("todos.json.tmp").exists());
    }
}
