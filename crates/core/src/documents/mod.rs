//! Documents module - objects stored in named buckets with public URLs.

mod documents_model;
mod documents_service;
mod documents_traits;

pub use documents_model::{validate_bucket, validate_object_path, Document, DocumentUpload};
pub use documents_service::DocumentService;
pub use documents_traits::{DocumentServiceTrait, DocumentStoreTrait};
