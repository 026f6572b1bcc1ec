use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Metadata of a stored object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub bucket: String,
    pub path: String,
    pub content_type: Option<String>,
    pub size: u64,
    pub public_url: String,
}

#[derive(Debug, Clone)]
pub struct DocumentUpload {
    pub bucket: String,
    pub path: String,
    pub content_type: Option<String>,
    pub bytes: Vec<u8>,
}

/// Bucket names are lowercase ASCII letters, digits, `-` and `_`.
pub fn validate_bucket(bucket: &str) -> Result<()> {
    let valid = !bucket.is_empty()
        && bucket.len() <= 63
        && bucket
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(Error::invalid_input(format!("Invalid bucket name '{}'", bucket)))
    }
}

/// Object paths are relative, `/`-separated and never escape the bucket.
pub fn validate_object_path(path: &str) -> Result<()> {
    let invalid = path.is_empty()
        || path.starts_with('/')
        || path.contains('\\')
        || path
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..");
    if invalid {
        Err(Error::invalid_input(format!("Invalid object path '{}'", path)))
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bucket_names() {
        assert!(validate_bucket("listing-documents").is_ok());
        assert!(validate_bucket("Docs").is_err());
        assert!(validate_bucket("").is_err());
        assert!(validate_bucket("../etc").is_err());
    }

    #[test]
    fn test_object_paths() {
        assert!(validate_object_path("seller-1/deed.pdf").is_ok());
        assert!(validate_object_path("/abs.pdf").is_err());
        assert!(validate_object_path("a/../../b").is_err());
        assert!(validate_object_path("a//b").is_err());
        assert!(validate_object_path("a\\b").is_err());
    }
}
