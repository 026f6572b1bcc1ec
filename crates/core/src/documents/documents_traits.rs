use async_trait::async_trait;

use super::documents_model::{Document, DocumentUpload};
use crate::errors::Result;

/// Object storage backend. Bucket and path are validated by the caller.
#[async_trait]
pub trait DocumentStoreTrait: Send + Sync {
    /// Writes the object, replacing any existing one at the same path.
    async fn put(&self, upload: DocumentUpload) -> Result<Document>;

    /// Metadata of an existing object; `NotFound` when absent.
    async fn stat(&self, bucket: &str, path: &str) -> Result<Document>;
}

#[async_trait]
pub trait DocumentServiceTrait: Send + Sync {
    async fn upload(&self, upload: DocumentUpload) -> Result<Document>;

    async fn public_url(&self, bucket: &str, path: &str) -> Result<String>;
}
