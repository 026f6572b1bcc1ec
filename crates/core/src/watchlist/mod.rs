//! Watchlist module - listings a user follows.

mod watchlist_model;
mod watchlist_service;
mod watchlist_traits;

pub use watchlist_model::{NewWatchlistEntry, WatchlistEntry, WatchlistItem};
pub use watchlist_service::WatchlistService;
pub use watchlist_traits::{WatchlistRepositoryTrait, WatchlistServiceTrait};
