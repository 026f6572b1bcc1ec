//! VoltMarket Core - Domain entities, services, and traits.
//!
//! This crate contains the business logic behind the VoltMarket energy-asset
//! marketplace. It is database-agnostic and defines traits that are
//! implemented by the `storage-sqlite` crate.

pub mod capabilities;
pub mod constants;
pub mod documents;
pub mod errors;
pub mod events;
pub mod listings;
pub mod map_config;
pub mod notifications;
pub mod opportunities;
pub mod portfolio;
pub mod verification;
pub mod watchlist;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
