//! SQLite storage implementation for VoltMarket.
//!
//! This crate is the only place where Diesel is used. It implements the
//! repository traits defined in `voltmarket-core` and contains:
//! - connection pooling and the single-writer actor
//! - embedded Diesel migrations
//! - repository implementations and their Diesel row types
//! - the local filesystem document store
//!
//! ```text
//!   core (domain, traits)
//!           │
//!           ▼
//!   storage-sqlite (this crate)
//!           │
//!           ▼
//!       SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod utils;

// Repository implementations
pub mod documents;
pub mod listings;
pub mod notifications;
pub mod opportunities;
pub mod portfolios;
pub mod verification;
pub mod watchlist;

pub use db::{
    create_pool, get_connection, init, run_migrations, spawn_writer, DbConnection, DbPool,
    WriteHandle,
};
pub use errors::{IntoCore, StorageError};

pub use documents::LocalDocumentStore;
pub use listings::ListingRepository;
pub use notifications::NotificationRepository;
pub use opportunities::OpportunitySourceRepository;
pub use portfolios::PortfolioRepository;
pub use verification::VerificationRepository;
pub use watchlist::WatchlistRepository;
