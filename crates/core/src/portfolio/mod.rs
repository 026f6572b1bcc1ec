//! Portfolio module - holdings, performance history, metrics and rebalancing.

pub mod metrics;
pub mod rebalancing;

mod portfolio_model;
mod portfolio_service;
mod portfolio_traits;

#[cfg(test)]
mod portfolio_service_tests;

pub use portfolio_model::*;
pub use portfolio_service::PortfolioService;
pub use portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
