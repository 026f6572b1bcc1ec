//! Portfolio repository and service traits.

use async_trait::async_trait;
use rust_decimal::Decimal;

use super::metrics::PortfolioMetrics;
use super::portfolio_model::{
    ItemStatus, NewPerformancePoint, NewPortfolio, NewPortfolioItem, PerformancePoint, Portfolio,
    PortfolioItem, PortfolioSummary,
};
use super::rebalancing::RebalancingRecommendation;
use crate::errors::Result;

/// Trait defining the contract for portfolio persistence.
#[async_trait]
pub trait PortfolioRepositoryTrait: Send + Sync {
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio>;

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;

    /// Lists a user's portfolios, newest first.
    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>>;

    async fn insert_item(
        &self,
        portfolio_id: &str,
        new_item: NewPortfolioItem,
    ) -> Result<PortfolioItem>;

    fn get_item(&self, item_id: &str) -> Result<PortfolioItem>;

    /// Lists every item of a portfolio regardless of status.
    fn list_items(&self, portfolio_id: &str) -> Result<Vec<PortfolioItem>>;

    async fn update_item_valuation(
        &self,
        item_id: &str,
        current_value: Decimal,
    ) -> Result<PortfolioItem>;

    async fn update_item_status(&self, item_id: &str, status: ItemStatus)
        -> Result<PortfolioItem>;

    async fn insert_performance_point(
        &self,
        portfolio_id: &str,
        point: NewPerformancePoint,
    ) -> Result<PerformancePoint>;

    /// Performance history ordered by period, oldest first.
    fn list_performance_history(&self, portfolio_id: &str) -> Result<Vec<PerformancePoint>>;
}

/// Trait defining the contract for portfolio service operations.
#[async_trait]
pub trait PortfolioServiceTrait: Send + Sync {
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio>;

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio>;

    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>>;

    /// Records an acquisition into the portfolio.
    async fn add_item(&self, portfolio_id: &str, new_item: NewPortfolioItem)
        -> Result<PortfolioItem>;

    fn list_items(&self, portfolio_id: &str) -> Result<Vec<PortfolioItem>>;

    /// Valuation refresh: replaces the item's current value.
    async fn refresh_item_valuation(
        &self,
        portfolio_id: &str,
        item_id: &str,
        current_value: Decimal,
    ) -> Result<PortfolioItem>;

    /// Soft status change; items are never deleted.
    async fn change_item_status(
        &self,
        portfolio_id: &str,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<PortfolioItem>;

    async fn record_performance(
        &self,
        portfolio_id: &str,
        point: NewPerformancePoint,
    ) -> Result<PerformancePoint>;

    fn get_performance_history(&self, portfolio_id: &str) -> Result<Vec<PerformancePoint>>;

    fn calculate_metrics(&self, portfolio_id: &str) -> Result<PortfolioMetrics>;

    fn get_rebalancing_recommendations(
        &self,
        portfolio_id: &str,
    ) -> Result<Vec<RebalancingRecommendation>>;

    fn get_summary(&self, portfolio_id: &str) -> Result<PortfolioSummary>;
}
