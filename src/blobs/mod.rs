//! Blob storage backend for photo binaries.
//!
//! Blobs are addressed by path and yield a publicly retrievable URL after
//! upload. The attach protocol derives the path from the event and photo
//! identifiers, so the same photo always lands at the same address.

pub mod fs;
pub mod memory;

use async_trait::async_trait;

use crate::error::CityscapeError;

pub use fs::FsBlobStore;
pub use memory::MemoryBlobStore;

/// Metadata returned after a successful blob upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BlobMetadata {
    /// Storage path the blob was written to.
    pub path: String,
    /// Uploaded payload size in bytes.
    pub size_bytes: u64,
    /// Content type the blob was tagged with.
    pub content_type: String,
}

/// Object storage for unstructured binary payloads.
#[async_trait]
pub trait BlobStore: std::fmt::Debug + Send + Sync {
    /// Uploads `bytes` to `path`, tagging the blob with `content_type`.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::UploadError`] if the transfer fails. No
    /// partial-state cleanup is attempted.
    async fn put(
        &self,
        path: &str,
        bytes: &[u8],
        content_type: &str,
    ) -> Result<BlobMetadata, CityscapeError>;

    /// Resolves a publicly retrievable URL for an uploaded blob.
    ///
    /// # Errors
    ///
    /// Returns [`CityscapeError::UrlResolutionError`] if resolution fails;
    /// the blob stays uploaded but unreferenced.
    async fn resolve_download_url(&self, path: &str) -> Result<String, CityscapeError>;
}
