//! SQLite storage for the opportunity scanner sources.

mod model;
mod repository;

pub use model::{DistressedCompanyDB, IdleSiteDB};
pub use repository::OpportunitySourceRepository;
