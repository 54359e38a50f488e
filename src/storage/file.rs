//! Directory-backed key-value store.
//!
//! Each key is one file under the data directory.  Keys are built from a
//! record kind and a validated user id, so they are always plain file
//! names.

use std::fs;
use std::path::PathBuf;

use super::KeyValueStore;
use crate::errors::{Result, SecuraError};

#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Use `dir` as the store.  The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let safe = !key.is_empty()
            && !key.starts_with('.')
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-' || b == b'.');
        if !safe {
            return Err(SecuraError::Storage(format!(
                "refusing unsafe storage key '{key}'"
            )));
        }
        Ok(self.dir.join(key))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key)?;
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(path)?;
        String::from_utf8(bytes)
            .map(Some)
            .map_err(|_| SecuraError::CorruptData(format!("entry '{key}' is not UTF-8")))
    }

    /// Write atomically: temp file in the same directory, then rename.
    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.dir)?;

        let tmp_path = self.dir.join(format!(".{key}.tmp"));
        fs::write(&tmp_path, value)?;

        // Owner-only permissions before the file becomes visible.
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&tmp_path, fs::Permissions::from_mode(0o600))?;
        }

        fs::rename(&tmp_path, &path)?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let path = self.path_for(key)?;
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }
}
