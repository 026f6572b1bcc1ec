//! Rebalancing recommendations derived from holdings and target allocation.

mod rebalancing_calculator;
mod rebalancing_model;

pub use rebalancing_calculator::recommend_rebalancing;
pub use rebalancing_model::*;
