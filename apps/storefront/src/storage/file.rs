//! One JSON file per key.
//!
//! Writes go to a hidden temp file first and are renamed into place, so a
//! crash mid-write leaves the previous document intact rather than a
//! truncated one.

use std::io::ErrorKind;
use std::path::PathBuf;

use tokio::fs;
use tracing::debug;

use super::{CartStorage, StorageResult};

#[derive(Debug, Clone)]
pub struct FileStorage {
    dir: PathBuf,
}

impl FileStorage {
    /// Stores documents under `dir`, created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        FileStorage { dir: dir.into() }
    }

    /// Path of the document for `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", key))
    }

    fn temp_path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!(".{}.json.tmp", key))
    }
}

impl CartStorage for FileStorage {
    async fn read(&self, key: &str) -> StorageResult<Option<String>> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(contents) => Ok(Some(contents)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn write(&self, key: &str, value: &str) -> StorageResult<()> {
        fs::create_dir_all(&self.dir).await?;

        let temp = self.temp_path_for(key);
        let target = self.path_for(key);
        fs::write(&temp, value).await?;
        fs::rename(&temp, &target).await?;

        debug!(path = %target.display(), bytes = value.len(), "Cart document written");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());

        assert_eq!(storage.read("cartState_v1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_write_creates_directory_and_file() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path().join("nested").join("cart"));

        storage.write("cartState_v1", "{}").await.unwrap();
        storage.write("cartState_v1", r#"{"items":[]}"#).await.unwrap();

        assert_eq!(
            storage.read("cartState_v1").await.unwrap().as_deref(),
            Some(r#"{"items":[]}"#)
        );
        assert!(!storage.temp_path_for("cartState_v1").exists());
    }

    #[tokio::test]
    async fn test_unreadable_path_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        // A directory where the document should be.
        std::fs::create_dir(storage.path_for("cartState_v1")).unwrap();

        assert!(storage.read("cartState_v1").await.is_err());
    }
}
