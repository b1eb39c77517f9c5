use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{BlobStore, PersistError};

/// Blob store keeping one file per key under a directory.
///
/// Writes land in a temporary sibling first and are renamed into place, so
/// a reader sees either the previous blob or the new one.
#[derive(Debug, Clone)]
pub struct FileBlobStore {
    root: PathBuf,
}

impl FileBlobStore {
    /// Open (creating if needed) a store rooted at `root`.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self, PersistError> {
        let root = root.into();
        fs::create_dir_all(&root).map_err(|e| PersistError::Storage(e.to_string()))?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// File backing `key`. ASCII letters, digits and `-` are kept; every
    /// other byte is written as `_` plus two hex digits, so distinct keys
    /// never share a file.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || byte == b'-' {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("_{:02X}", byte));
            }
        }
        self.root.join(format!("{}.json", name))
    }
}

impl BlobStore for FileBlobStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, PersistError> {
        match fs::read(self.path_for(key)) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(PersistError::Storage(e.to_string())),
        }
    }

    fn set(&self, key: &str, bytes: Vec<u8>) -> Result<(), PersistError> {
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, bytes).map_err(|e| PersistError::Storage(e.to_string()))?;
        if let Err(e) = fs::rename(&tmp, &path) {
            if let Err(cleanup) = fs::remove_file(&tmp) {
                tracing::warn!(
                    path = %tmp.display(),
                    error = %cleanup,
                    "failed to remove temporary blob"
                );
            }
            return Err(PersistError::Storage(e.to_string()));
        }
        Ok(())
    }
}
