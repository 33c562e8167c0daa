//! In-memory blob store for tests and persistence-disabled runs.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::{BlobMetadata, BlobStore};
use crate::error::CityscapeError;

/// In-memory blob store. URLs resolve against a fixed `memory://` scheme.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: RwLock<HashMap<String, (Vec<u8>, String)>>,
}

impl MemoryBlobStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored blobs.
    pub async fn len(&self) -> usize {
        self.blobs.read().await.len()
    }

    /// Returns `true` if no blobs are stored.
    pub async fn is_empty(&self) -> bool {
        self.blobs.read().await.is_empty()
    }
}

#[async_trait]
impl BlobStore for MemoryBlobStore {
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<BlobMetadata, CityscapeError> {
        let mut blobs = self.blobs.write().await;
        blobs.insert(
            path.to_string(),
            (bytes.to_vec(), content_type.to_string()),
        );
        Ok(BlobMetadata {
            path: path.to_string(),
            size_bytes: bytes.len() as u64,
            content_type: content_type.to_string(),
        })
    }

    async fn resolve_download_url(&self, path: &str) -> Result<String, CityscapeError> {
        let blobs = self.blobs.read().await;
        if blobs.contains_key(path) {
            Ok(format!("memory://blobs/{path}"))
        } else {
            Err(CityscapeError::UrlResolutionError(format!(
                "no blob at {path}"
            )))
        }
    }
}
