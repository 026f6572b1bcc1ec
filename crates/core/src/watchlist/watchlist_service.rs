use std::sync::Arc;

use async_trait::async_trait;

use super::watchlist_model::{NewWatchlistEntry, WatchlistEntry, WatchlistItem};
use super::watchlist_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};
use crate::listings::ListingRepositoryTrait;

pub struct WatchlistService {
    repository: Arc<dyn WatchlistRepositoryTrait>,
    listing_repository: Arc<dyn ListingRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl WatchlistService {
    pub fn new(
        repository: Arc<dyn WatchlistRepositoryTrait>,
        listing_repository: Arc<dyn ListingRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            listing_repository,
            event_sink,
        }
    }
}

#[async_trait]
impl WatchlistServiceTrait for WatchlistService {
    async fn add_to_watchlist(&self, entry: NewWatchlistEntry) -> Result<WatchlistEntry> {
        entry.validate()?;
        self.listing_repository.get_by_id(&entry.listing_id)?;

        let (entry, inserted) = self.repository.add(entry).await?;
        if inserted {
            self.event_sink.emit(DomainEvent::watchlist_changed(
                entry.user_id.clone(),
                entry.listing_id.clone(),
                true,
            ));
        }
        Ok(entry)
    }

    async fn remove_from_watchlist(&self, user_id: &str, listing_id: &str) -> Result<()> {
        if self.repository.remove(user_id, listing_id).await? > 0 {
            self.event_sink.emit(DomainEvent::watchlist_changed(
                user_id.to_string(),
                listing_id.to_string(),
                false,
            ));
        }
        Ok(())
    }

    fn get_watchlist(&self, user_id: &str) -> Result<Vec<WatchlistItem>> {
        self.repository.list_for_user(user_id)
    }
}
