use async_trait::async_trait;

use super::listings_model::{Listing, ListingFilter, ListingStatus, NewListing};
use crate::errors::Result;

#[async_trait]
pub trait ListingRepositoryTrait: Send + Sync {
    async fn create(&self, new_listing: NewListing) -> Result<Listing>;

    fn get_by_id(&self, listing_id: &str) -> Result<Listing>;

    fn list(&self, filter: &ListingFilter) -> Result<Vec<Listing>>;

    async fn update_status(&self, listing_id: &str, status: ListingStatus) -> Result<Listing>;
}

#[async_trait]
pub trait ListingServiceTrait: Send + Sync {
    async fn create_listing(&self, new_listing: NewListing) -> Result<Listing>;

    fn get_listing(&self, listing_id: &str) -> Result<Listing>;

    fn list_listings(&self, filter: ListingFilter) -> Result<Vec<Listing>>;

    /// Moving a listing to `active` publishes it.
    async fn update_listing_status(
        &self,
        listing_id: &str,
        status: ListingStatus,
    ) -> Result<Listing>;
}
