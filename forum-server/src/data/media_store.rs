use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{error, info};

use crate::domain::error::DomainError;

/// Storage keys arrive from clients (upload-time milliseconds concatenated
/// with the original filename) and become a single path component under the
/// media root. Anything that could escape that component is rejected.
pub fn validate_key(key: &str) -> Result<(), DomainError> {
    let traversal = key == "." || key == ".." || key.contains('/') || key.contains('\\');
    if key.is_empty() || traversal || key.bytes().any(|b| b.is_ascii_control()) {
        return Err(DomainError::InvalidMediaKey(key.to_string()));
    }
    Ok(())
}

#[async_trait]
pub trait MediaStore: Send + Sync {
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), DomainError>;
    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError>;
}

#[derive(Clone)]
pub struct FsMediaStore {
    root: PathBuf,
}

impl FsMediaStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl MediaStore for FsMediaStore {
    async fn save(&self, key: &str, bytes: &[u8]) -> Result<(), DomainError> {
        validate_key(key)?;

        tokio::fs::create_dir_all(&self.root).await.map_err(|e| {
            error!("failed to create media root {:?}: {}", self.root, e);
            DomainError::Internal(format!("media root unavailable: {}", e))
        })?;

        let path = self.root.join(key);
        tokio::fs::write(&path, bytes).await.map_err(|e| {
            error!("failed to store media {}: {}", key, e);
            DomainError::Internal(format!("media write failed: {}", e))
        })?;

        info!(key = %key, size = bytes.len(), "media stored");
        Ok(())
    }

    async fn read(&self, key: &str) -> Result<Option<Vec<u8>>, DomainError> {
        validate_key(key)?;

        match tokio::fs::read(self.root.join(key)).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => {
                error!("failed to read media {}: {}", key, e);
                Err(DomainError::Internal(e.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_path_traversal_keys() {
        for key in ["", ".", "..", "../etc/passwd", "a/b.png", "a\\b.png"] {
            assert!(
                matches!(validate_key(key), Err(DomainError::InvalidMediaKey(_))),
                "key {:?} should be rejected",
                key
            );
        }
    }

    #[test]
    fn accepts_timestamped_filenames() {
        assert!(validate_key("1700000000000cat.png").is_ok());
        assert!(validate_key("1700000000000my photo.jpeg").is_ok());
    }

    #[tokio::test]
    async fn save_then_read_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path());

        store.save("1700000000000cat.png", b"png bytes").await.unwrap();
        let bytes = store.read("1700000000000cat.png").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"png bytes"[..]));
    }

    #[tokio::test]
    async fn read_of_unknown_key_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path());

        assert!(store.read("1700000000000nope.png").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn save_overwrites_colliding_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = FsMediaStore::new(dir.path());

        store.save("1700000000000cat.png", b"first").await.unwrap();
        store.save("1700000000000cat.png", b"second").await.unwrap();
        let bytes = store.read("1700000000000cat.png").await.unwrap();
        assert_eq!(bytes.as_deref(), Some(&b"second"[..]));
    }
}
