use std::sync::Arc;

use crate::data::media_store::MediaStore;
use crate::domain::error::DomainError;
use tracing::instrument;

#[derive(Debug, Clone)]
pub struct StoredMedia {
    pub key: String,
    pub url: String,
}

#[derive(Clone)]
pub struct MediaService<S: MediaStore + 'static> {
    store: Arc<S>,
    public_base_url: String,
}

impl<S> MediaService<S>
where
    S: MediaStore + 'static,
{
    pub fn new(store: Arc<S>, public_base_url: String) -> Self {
        Self {
            store,
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Persist an uploaded blob and resolve the URL it can be fetched
    /// back from.
    #[instrument(skip(self, bytes))]
    pub async fn store(&self, key: &str, bytes: &[u8]) -> Result<StoredMedia, DomainError> {
        self.store.save(key, bytes).await?;
        Ok(StoredMedia {
            key: key.to_string(),
            url: format!("{}/api/media/{}", self.public_base_url, key),
        })
    }

    pub async fn fetch(&self, key: &str) -> Result<Vec<u8>, DomainError> {
        self.store
            .read(key)
            .await?
            .ok_or_else(|| DomainError::MediaNotFound(key.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::media_store::FsMediaStore;

    #[tokio::test]
    async fn stored_media_resolves_a_download_url() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FsMediaStore::new(dir.path()));
        let service = MediaService::new(store, "http://localhost:8080/".into());

        let stored = service.store("1700000000000cat.png", b"png").await.unwrap();
        assert_eq!(
            stored.url,
            "http://localhost:8080/api/media/1700000000000cat.png"
        );
        assert_eq!(service.fetch("1700000000000cat.png").await.unwrap(), b"png");
    }

    #[tokio::test]
    async fn fetch_of_unknown_key_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(FsMediaStore::new(dir.path()));
        let service = MediaService::new(store, "http://localhost:8080".into());

        assert!(matches!(
            service.fetch("1700000000000nope.png").await,
            Err(DomainError::MediaNotFound(_))
        ));
    }
}
