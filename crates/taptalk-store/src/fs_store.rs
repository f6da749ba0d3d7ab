//! Filesystem-backed implementation of `ArtifactStorePort`.

use std::io::Write;
use std::path::PathBuf;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tracing::{debug, warn};

use taptalk_core::domain::ArtifactRef;
use taptalk_core::ports::{ArtifactStorePort, StoreError};

/// Configuration for the filesystem store.
#[derive(Debug, Clone)]
pub struct FsStoreConfig {
    /// Directory artifacts are stored in. Created on first persist.
    pub root: PathBuf,
    /// File extension for persisted clips.
    pub extension: String,
}

impl FsStoreConfig {
    /// Create a config with the given root directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extension: "mp3".to_string(),
        }
    }

    /// Set the file extension for persisted clips.
    #[must_use]
    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }
}

/// Filesystem artifact store.
///
/// Keys become file names under the configured root; anything that could
/// escape the root is rejected.
pub struct FsArtifactStore {
    config: FsStoreConfig,
}

impl FsArtifactStore {
    /// Create a store over the configured root directory.
    #[must_use]
    pub const fn new(config: FsStoreConfig) -> Self {
        Self { config }
    }

    fn artifact_path(&self, key: &str) -> PathBuf {
        self.config
            .root
            .join(format!("{key}.{}", self.config.extension))
    }
}

/// Reject keys that are empty, contain path separators, or traverse upward.
fn validate_key(key: &str) -> Result<(), StoreError> {
    let safe = !key.is_empty()
        && !key.contains("..")
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'));
    if safe {
        Ok(())
    } else {
        Err(StoreError::invalid_key(key))
    }
}

#[async_trait]
impl ArtifactStorePort for FsArtifactStore {
    async fn exists(&self, key: &str) -> bool {
        if validate_key(key).is_err() {
            return false;
        }
        match tokio::fs::metadata(self.artifact_path(key)).await {
            Ok(meta) => meta.is_file(),
            Err(_) => false,
        }
    }

    async fn persist(&self, key: &str, bytes: &[u8]) -> Result<ArtifactRef, StoreError> {
        validate_key(key)?;
        let path = self.artifact_path(key);

        let root = self.config.root.clone();
        let target = path.clone();
        let payload = bytes.to_vec();

        // Blocking section: temp write + fsync + atomic rename. The rename
        // is the publication point; readers either see the old payload or
        // the complete new one.
        let written = tokio::task::spawn_blocking(move || -> Result<(), StoreError> {
            std::fs::create_dir_all(&root).map_err(|e| StoreError::from_io_error(&e))?;
            let mut tmp =
                NamedTempFile::new_in(&root).map_err(|e| StoreError::from_io_error(&e))?;
            tmp.write_all(&payload)
                .map_err(|e| StoreError::from_io_error(&e))?;
            tmp.as_file()
                .sync_all()
                .map_err(|e| StoreError::from_io_error(&e))?;
            tmp.persist(&target)
                .map_err(|e| StoreError::from_io_error(&e.error))?;
            Ok(())
        })
        .await;

        match written {
            Ok(Ok(())) => {
                debug!(target: "taptalk.store", key = %key, path = %path.display(), "Artifact persisted");
                Ok(ArtifactRef::new(key, path))
            }
            Ok(Err(err)) => {
                warn!(target: "taptalk.store", key = %key, error = %err, "Persist failed");
                Err(err)
            }
            Err(join_err) => Err(StoreError::io("TaskJoin", join_err.to_string())),
        }
    }

    async fn read(&self, reference: &ArtifactRef) -> Result<Vec<u8>, StoreError> {
        match tokio::fs::read(&reference.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(StoreError::not_found(&reference.key))
            }
            Err(e) => Err(StoreError::from_io_error(&e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn store_in(dir: &std::path::Path) -> FsArtifactStore {
        FsArtifactStore::new(FsStoreConfig::new(dir))
    }

    #[tokio::test]
    async fn persist_then_read_roundtrips() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let payload = b"not really mp3 bytes".to_vec();
        let reference = store.persist("phrase-1", &payload).await.unwrap();
        assert_eq!(reference.key, "phrase-1");

        let read_back = store.read(&reference).await.unwrap();
        assert_eq!(read_back, payload);
    }

    #[tokio::test]
    async fn empty_payloads_roundtrip() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let reference = store.persist("silence", &[]).await.unwrap();
        assert!(store.exists("silence").await);
        assert!(store.read(&reference).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn exists_is_false_before_persist_and_true_after() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        assert!(!store.exists("phrase-1").await);
        store.persist("phrase-1", b"audio").await.unwrap();
        assert!(store.exists("phrase-1").await);
    }

    #[tokio::test]
    async fn overwriting_a_key_replaces_the_payload() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        store.persist("phrase-1", b"first take").await.unwrap();
        let reference = store.persist("phrase-1", b"second take").await.unwrap();

        assert_eq!(store.read(&reference).await.unwrap(), b"second take");
    }

    #[tokio::test]
    async fn read_of_deleted_artifact_is_not_found() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let reference = store.persist("phrase-1", b"audio").await.unwrap();
        std::fs::remove_file(&reference.path).unwrap();

        assert!(!store.exists("phrase-1").await);
        assert_eq!(
            store.read(&reference).await,
            Err(StoreError::not_found("phrase-1"))
        );
    }

    #[tokio::test]
    async fn traversal_keys_are_rejected() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        let result = store.persist("../escape", b"audio").await;
        assert!(matches!(result, Err(StoreError::InvalidKey { .. })));
        assert!(!store.exists("../escape").await);
        assert!(!store.exists("").await);
    }

    #[tokio::test]
    async fn persist_leaves_no_temp_files_behind() {
        let dir = tempdir().unwrap();
        let store = store_in(dir.path());

        store.persist("phrase-1", b"audio").await.unwrap();

        let entries: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(entries, vec!["phrase-1.mp3"]);
    }
}
