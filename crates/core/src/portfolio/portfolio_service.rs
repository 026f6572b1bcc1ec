use std::sync::Arc;

use async_trait::async_trait;
use log::debug;
use rust_decimal::Decimal;

use super::metrics::{calculate_portfolio_metrics, HoldingSnapshot, PeriodReturn, PortfolioMetrics};
use super::portfolio_model::{
    ItemStatus, NewPerformancePoint, NewPortfolio, NewPortfolioItem, PerformancePoint, Portfolio,
    PortfolioItem, PortfolioSummary,
};
use super::portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use super::rebalancing::{recommend_rebalancing, RebalancingRecommendation};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, DomainEventSink};

/// Service for portfolios, their items and derived figures.
pub struct PortfolioService {
    repository: Arc<dyn PortfolioRepositoryTrait>,
    event_sink: Arc<dyn DomainEventSink>,
}

impl PortfolioService {
    pub fn new(
        repository: Arc<dyn PortfolioRepositoryTrait>,
        event_sink: Arc<dyn DomainEventSink>,
    ) -> Self {
        Self {
            repository,
            event_sink,
        }
    }

    /// Loads an item and checks it belongs to `portfolio_id`.
    fn owned_item(&self, portfolio_id: &str, item_id: &str) -> Result<PortfolioItem> {
        let item = self.repository.get_item(item_id)?;
        if item.portfolio_id != portfolio_id {
            return Err(Error::NotFound(format!(
                "Portfolio item {} in portfolio {}",
                item_id, portfolio_id
            )));
        }
        Ok(item)
    }

    fn holdings(&self, portfolio_id: &str) -> Result<Vec<HoldingSnapshot>> {
        Ok(self
            .repository
            .list_items(portfolio_id)?
            .iter()
            .map(HoldingSnapshot::from)
            .collect())
    }
}

#[async_trait]
impl PortfolioServiceTrait for PortfolioService {
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        new_portfolio.validate()?;
        self.repository.create_portfolio(new_portfolio).await
    }

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.repository.get_portfolio(portfolio_id)
    }

    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        self.repository.list_portfolios(user_id)
    }

    async fn add_item(
        &self,
        portfolio_id: &str,
        new_item: NewPortfolioItem,
    ) -> Result<PortfolioItem> {
        new_item.validate()?;
        // Fails with NotFound for unknown portfolios.
        self.repository.get_portfolio(portfolio_id)?;

        let item = self.repository.insert_item(portfolio_id, new_item).await?;
        debug!("Added item {} to portfolio {}", item.id, portfolio_id);
        self.event_sink.emit(DomainEvent::portfolio_item_changed(
            portfolio_id.to_string(),
            item.id.clone(),
        ));
        Ok(item)
    }

    fn list_items(&self, portfolio_id: &str) -> Result<Vec<PortfolioItem>> {
        self.repository.list_items(portfolio_id)
    }

    async fn refresh_item_valuation(
        &self,
        portfolio_id: &str,
        item_id: &str,
        current_value: Decimal,
    ) -> Result<PortfolioItem> {
        self.owned_item(portfolio_id, item_id)?;
        let item = self
            .repository
            .update_item_valuation(item_id, current_value)
            .await?;
        self.event_sink.emit(DomainEvent::portfolio_item_changed(
            portfolio_id.to_string(),
            item_id.to_string(),
        ));
        Ok(item)
    }

    async fn change_item_status(
        &self,
        portfolio_id: &str,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<PortfolioItem> {
        let existing = self.owned_item(portfolio_id, item_id)?;
        if existing.status == status {
            return Ok(existing);
        }
        let item = self.repository.update_item_status(item_id, status).await?;
        self.event_sink.emit(DomainEvent::portfolio_item_changed(
            portfolio_id.to_string(),
            item_id.to_string(),
        ));
        Ok(item)
    }

    async fn record_performance(
        &self,
        portfolio_id: &str,
        point: NewPerformancePoint,
    ) -> Result<PerformancePoint> {
        self.repository.get_portfolio(portfolio_id)?;
        self.repository
            .insert_performance_point(portfolio_id, point)
            .await
    }

    fn get_performance_history(&self, portfolio_id: &str) -> Result<Vec<PerformancePoint>> {
        self.repository.list_performance_history(portfolio_id)
    }

    fn calculate_metrics(&self, portfolio_id: &str) -> Result<PortfolioMetrics> {
        self.repository.get_portfolio(portfolio_id)?;
        let holdings = self.holdings(portfolio_id)?;
        let history: Vec<PeriodReturn> = self
            .repository
            .list_performance_history(portfolio_id)?
            .iter()
            .map(PeriodReturn::from)
            .collect();
        Ok(calculate_portfolio_metrics(&holdings, &history)?)
    }

    fn get_rebalancing_recommendations(
        &self,
        portfolio_id: &str,
    ) -> Result<Vec<RebalancingRecommendation>> {
        let portfolio = self.repository.get_portfolio(portfolio_id)?;
        let holdings = self.holdings(portfolio_id)?;
        Ok(recommend_rebalancing(
            &holdings,
            &portfolio.target_allocation,
        )?)
    }

    fn get_summary(&self, portfolio_id: &str) -> Result<PortfolioSummary> {
        let portfolio = self.repository.get_portfolio(portfolio_id)?;
        let items = self.repository.list_items(portfolio_id)?;
        let holdings: Vec<HoldingSnapshot> = items.iter().map(HoldingSnapshot::from).collect();
        let metrics = calculate_portfolio_metrics(&holdings, &[])?;

        Ok(PortfolioSummary {
            portfolio,
            item_count: items.len(),
            active_item_count: metrics.active_item_count,
            total_acquisition_cost: metrics.total_acquisition_cost,
            total_value: metrics.total_value,
            total_return: metrics.total_return,
            return_percentage: metrics.return_percentage.round_dp(DECIMAL_PRECISION),
        })
    }
}
