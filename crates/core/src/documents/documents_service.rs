use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::documents_model::{validate_bucket, validate_object_path, Document, DocumentUpload};
use super::documents_traits::{DocumentServiceTrait, DocumentStoreTrait};
use crate::errors::Result;

pub struct DocumentService {
    store: Arc<dyn DocumentStoreTrait>,
}

impl DocumentService {
    pub fn new(store: Arc<dyn DocumentStoreTrait>) -> Self {
        Self { store }
    }
}

#[async_trait]
impl DocumentServiceTrait for DocumentService {
    async fn upload(&self, upload: DocumentUpload) -> Result<Document> {
        validate_bucket(&upload.bucket)?;
        validate_object_path(&upload.path)?;
        let document = self.store.put(upload).await?;
        debug!(
            "Stored {} bytes at {}/{}",
            document.size, document.bucket, document.path
        );
        Ok(document)
    }

    async fn public_url(&self, bucket: &str, path: &str) -> Result<String> {
        validate_bucket(bucket)?;
        validate_object_path(path)?;
        Ok(self.store.stat(bucket, path).await?.public_url)
    }
}
