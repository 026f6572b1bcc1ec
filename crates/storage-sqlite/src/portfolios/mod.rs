//! SQLite storage implementation for portfolios, their items and
//! performance history.

mod model;
mod repository;

pub use model::{PerformancePointDB, PortfolioDB, PortfolioItemDB};
pub use repository::PortfolioRepository;
