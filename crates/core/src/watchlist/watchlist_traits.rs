use async_trait::async_trait;

use super::watchlist_model::{NewWatchlistEntry, WatchlistEntry, WatchlistItem};
use crate::errors::Result;

#[async_trait]
pub trait WatchlistRepositoryTrait: Send + Sync {
    /// Inserts the pair, or returns the existing entry when already present.
    async fn add(&self, entry: NewWatchlistEntry) -> Result<(WatchlistEntry, bool)>;

    /// Returns the number of rows removed.
    async fn remove(&self, user_id: &str, listing_id: &str) -> Result<usize>;

    /// Entries for the user joined with their listings, newest first.
    fn list_for_user(&self, user_id: &str) -> Result<Vec<WatchlistItem>>;
}

#[async_trait]
pub trait WatchlistServiceTrait: Send + Sync {
    async fn add_to_watchlist(&self, entry: NewWatchlistEntry) -> Result<WatchlistEntry>;

    async fn remove_from_watchlist(&self, user_id: &str, listing_id: &str) -> Result<()>;

    fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>>;
}
