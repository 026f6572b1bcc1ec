//! Aggregate portfolio metrics.

mod metrics_calculator;
mod metrics_model;

pub use metrics_calculator::calculate_portfolio_metrics;
pub use metrics_model::*;
