//! Filesystem blob store.
//!
//! Writes blobs under a configured root directory and resolves download
//! URLs against a configured public base URL (the gateway, a CDN, or a
//! reverse proxy is expected to serve the root directory at that base).

use std::path::PathBuf;

use async_trait::async_trait;

use super::{BlobMetadata, BlobStore};
use crate::error::CityscapeError;

/// Blob store backed by a local directory.
#[derive(Debug, Clone)]
pub struct FsBlobStore {
    root: PathBuf,
    public_base_url: String,
}

impl FsBlobStore {
    /// Creates a store rooted at `root`, resolving URLs under
    /// `public_base_url`.
    #[must_use]
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into(),
        }
    }

    fn blob_path(&self, path: &str) -> PathBuf {
        self.root.join(path)
    }
}

#[async_trait]
impl BlobStore for FsBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<BlobMetadata, CityscapeError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| CityscapeError::UploadError(e.to_string()))?;
        tokio::fs::write(self.blob_path(path), bytes)
            .await
            .map_err(|e| CityscapeError::UploadError(e.to_string()))?;
        Ok(BlobMetadata {
            path: path.to_string(),
            size_bytes: bytes.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn resolve_download_url(&self, path: &str) -> Result<String, CityscapeError> {
        let exists = tokio::fs::try_exists(self.blob_path(path))
            .await
            .map_err(|e| CityscapeError::UrlResolutionError(e.to_string()))?;
        if exists {
            let base = self.public_base_url.trim_end_matches('/');
            Ok(format!("{base}/{path}"))
        } else {
            Err(CityscapeError::UrlResolutionError(format!(
                "no blob at {path}"
            )))
        }
    }
}

#[cfg(test)]
#[allow(clippy::panic)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_then_resolve_against_base_url() {
        let dir = std::env::temp_dir().join(format!("cityscape-blobs-{}", uuid::Uuid::new_v4()));
        let store = FsBlobStore::new(&dir, "https://cdn.example.com/photos/");

        let put = store.put("1abc", b"jpegbytes", "image/jpeg").await;
        assert!(put.is_ok());

        let url = store.resolve_download_url("1abc").await;
        let Ok(url) = url else {
            panic!("resolve failed");
        };
        assert_eq!(url, "https://cdn.example.com/photos/1abc");

        let _ = tokio::fs::remove_dir_all(&dir).await;
    }

    #[tokio::test]
    async fn resolve_unknown_path_fails() {
        let dir = std::env::temp_dir().join(format!("cityscape-blobs-{}", uuid::Uuid::new_v4()));
        let store = FsBlobStore::new(&dir, "https://cdn.example.com");
        let result = store.resolve_download_url("missing").await;
        assert!(result.is_err());
    }
}
