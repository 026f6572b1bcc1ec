use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;
use log::debug;
use voltmarket_core::documents::{Document, DocumentStoreTrait, DocumentUpload};
use voltmarket_core::{Error, Result};

/// Stores each bucket as a directory under `root`. Objects are served by the
/// HTTP layer under `{public_base_url}/storage/{bucket}/{path}`.
pub struct LocalDocumentStore {
    root: PathBuf,
    public_base_url: String,
}

impl LocalDocumentStore {
    pub fn new(root: impl Into<PathBuf>, public_base_url: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &PathBuf {
        &self.root
    }

    fn object_path(&self, bucket: &str, path: &str) -> PathBuf {
        let mut full = self.root.join(bucket);
        for segment in path.split('/') {
            full.push(segment);
        }
        full
    }

    /// Each segment is percent-encoded; the `/` separators are kept.
    fn public_url(&self, bucket: &str, path: &str) -> String {
        let encoded: Vec<_> = path.split('/').map(urlencoding::encode).collect();
        format!(
            "{}/storage/{}/{}",
            self.public_base_url,
            urlencoding::encode(bucket),
            encoded.join("/")
        )
    }
}

/// Content type inferred from the file extension, for objects read back from disk.
fn content_type_for(path: &str) -> Option<String> {
    let extension = path.rsplit_once('.')?.1.to_ascii_lowercase();
    let mime = match extension.as_str() {
        "pdf" => "application/pdf",
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "json" => "application/json",
        "csv" => "text/csv",
        "txt" => "text/plain",
        _ => return None,
    };
    Some(mime.to_string())
}

#[async_trait]
impl DocumentStoreTrait for LocalDocumentStore {
    async fn put(&self, upload: DocumentUpload) -> Result<Document> {
        let target = self.object_path(&upload.bucket, &upload.path);
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, &upload.bytes).await?;
        debug!("Wrote document {}", target.display());

        Ok(Document {
            public_url: self.public_url(&upload.bucket, &upload.path),
            content_type: upload
                .content_type
                .or_else(|| content_type_for(&upload.path)),
            size: upload.bytes.len() as u64,
            bucket: upload.bucket,
            path: upload.path,
        })
    }

    async fn stat(&self, bucket: &str, path: &str) -> Result<Document> {
        let target = self.object_path(bucket, path);
        let metadata = match tokio::fs::metadata(&target).await {
            Ok(m) if m.is_file() => m,
            Ok(_) => return Err(Error::NotFound(format!("Document {}/{}", bucket, path))),
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound(format!("Document {}/{}", bucket, path)))
            }
            Err(e) => return Err(e.into()),
        };

        Ok(Document {
            bucket: bucket.to_string(),
            path: path.to_string(),
            content_type: content_type_for(path),
            size: metadata.len(),
            public_url: self.public_url(bucket, path),
        })
    }
}
