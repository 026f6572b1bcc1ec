//! Listings module - sellable energy-infrastructure assets.

mod listings_model;
mod listings_service;
mod listings_traits;

pub use listings_model::{Listing, ListingAssetType, ListingFilter, ListingStatus, NewListing};
pub use listings_service::ListingService;
pub use listings_traits::{ListingRepositoryTrait, ListingServiceTrait};
