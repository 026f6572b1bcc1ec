use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::errors::ValidationError;
use crate::listings::Listing;
use crate::{Error, Result};

/// A (user, listing) pair. Unique per pair.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistEntry {
    pub id: String,
    pub user_id: String,
    pub listing_id: String,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewWatchlistEntry {
    pub user_id: String,
    pub listing_id: String,
}

impl NewWatchlistEntry {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.listing_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "listingId".to_string(),
            )));
        }
        Ok(())
    }
}

/// Watchlist entry joined with its listing. The listing is absent when it
/// has since been removed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WatchlistItem {
    #[serde(flatten)]
    pub entry: WatchlistEntry,
    pub listing: Option<Listing>,
}
