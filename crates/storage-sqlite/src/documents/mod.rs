//! Filesystem-backed document buckets.

mod local_store;

pub use local_store::LocalDocumentStore;
