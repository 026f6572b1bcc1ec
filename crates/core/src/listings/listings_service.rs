use std::sync::Arc;

use async_trait::async_trait;
use log::debug;

use super::listings_model::{Listing, ListingFilter, ListingStatus, NewListing};
use super::listings_traits::{ListingRepositoryTrait, ListingServiceTrait};
use crate::constants::effective_limit;
use crate::errors::Result;
use crate::events::{DomainEvent, DomainEventSink};

pub struct ListingService {
    repository: Arc<dyn ListingRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl ListingService {
    pub fn new(
        repository: Arc<dyn ListingRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }

    fn publish(&self, listing: &Listing) {
        self.event_sink.emit(DomainEvent::listing_published(
            listing.id.clone(),
            listing.seller_id.clone(),
            listing.asset_type,
            listing.title.clone(),
        ));
    }
}

#[async_trait]
impl ListingServiceTrait for ListingService {
    async fn create_listing(&self, new_listing: NewListing) -> Result<Listing> {
        new_listing.validate()?;
        let listing = self.repository.create(new_listing).await?;
        debug!("Created listing {} ({})", listing.id, listing.status);
        if listing.status == ListingStatus::Active {
            self.publish(&listing);
        }
        Ok(listing)
    }

    fn get_listing(&self, listing_id: &str) -> Result<Listing> {
        self.repository.get_by_id(listing_id)
    }

    fn list_listings(&self, mut filter: ListingFilter) -> Result<Vec<Listing>> {
        filter.limit = Some(effective_limit(filter.limit));
        self.repository.list(&filter)
    }

    async fn update_listing_status(
        &self,
        listing_id: &str,
        status: ListingStatus,
    ) -> Result<Listing> {
        let existing = self.repository.get_by_id(listing_id)?;
        if existing.status == status {
            return Ok(existing);
        }
        let listing = self.repository.update_status(listing_id, status).await?;
        if status == ListingStatus::Active {
            self.publish(&listing);
        }
        Ok(listing)
    }
}
