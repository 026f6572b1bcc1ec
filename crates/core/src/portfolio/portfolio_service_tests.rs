use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use uuid::Uuid;

use super::portfolio_model::*;
use super::portfolio_service::PortfolioService;
use super::portfolio_traits::{PortfolioRepositoryTrait, PortfolioServiceTrait};
use super::rebalancing::RecommendationPriority;
use crate::errors::{Error, Result};
use crate::events::{DomainEvent, MockDomainEventSink};

#[derive(Default)]
struct MockPortfolioRepository {
    portfolios: Arc<Mutex<Vec<Portfolio>>>,
    items: Arc<Mutex<Vec<PortfolioItem>>>,
    history: Arc<Mutex<Vec<PerformancePoint>>>,
}

#[async_trait]
impl PortfolioRepositoryTrait for MockPortfolioRepository {
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        let now = Utc::now().naive_utc();
        let portfolio = Portfolio {
            id: Uuid::new_v4().to_string(),
            user_id: new_portfolio.user_id,
            name: new_portfolio.name,
            description: new_portfolio.description,
            target_allocation: new_portfolio.target_allocation,
            risk_tolerance: new_portfolio.risk_tolerance,
            created_at: now,
            updated_at: now,
        };
        self.portfolios.lock().unwrap().push(portfolio.clone());
        Ok(portfolio)
    }

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        self.portfolios
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == portfolio_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Portfolio {}", portfolio_id)))
    }

    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        Ok(self
            .portfolios
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn insert_item(
        &self,
        portfolio_id: &str,
        new_item: NewPortfolioItem,
    ) -> Result<PortfolioItem> {
        let now = Utc::now().naive_utc();
        let item = PortfolioItem {
            id: Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            listing_id: new_item.listing_id,
            acquisition_price: new_item.acquisition_price,
            current_value: new_item
                .current_value
                .unwrap_or(new_item.acquisition_price),
            status: new_item.status,
            metadata: new_item.metadata,
            acquired_at: now,
            updated_at: now,
        };
        self.items.lock().unwrap().push(item.clone());
        Ok(item)
    }

    fn get_item(&self, item_id: &str) -> Result<PortfolioItem> {
        self.items
            .lock()
            .unwrap()
            .iter()
            .find(|i| i.id == item_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("Portfolio item {}", item_id)))
    }

    fn list_items(&self, portfolio_id: &str) -> Result<Vec<PortfolioItem>> {
        Ok(self
            .items
            .lock()
            .unwrap()
            .iter()
            .filter(|i| i.portfolio_id == portfolio_id)
            .cloned()
            .collect())
    }

    async fn update_item_valuation(
        &self,
        item_id: &str,
        current_value: Decimal,
    ) -> Result<PortfolioItem> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| Error::NotFound(format!("Portfolio item {}", item_id)))?;
        item.current_value = current_value;
        Ok(item.clone())
    }

    async fn update_item_status(
        &self,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<PortfolioItem> {
        let mut items = self.items.lock().unwrap();
        let item = items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| Error::NotFound(format!("Portfolio item {}", item_id)))?;
        item.status = status;
        Ok(item.clone())
    }

    async fn insert_performance_point(
        &self,
        portfolio_id: &str,
        point: NewPerformancePoint,
    ) -> Result<PerformancePoint> {
        let point = PerformancePoint {
            id: Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            period: point.period,
            period_return: point.period_return,
        };
        self.history.lock().unwrap().push(point.clone());
        Ok(point)
    }

    fn list_performance_history(&self, portfolio_id: &str) -> Result<Vec<PerformancePoint>> {
        let mut points: Vec<PerformancePoint> = self
            .history
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.portfolio_id == portfolio_id)
            .cloned()
            .collect();
        points.sort_by_key(|p| p.period);
        Ok(points)
    }
}

fn service() -> (PortfolioService, MockDomainEventSink) {
    let sink = MockDomainEventSink::new();
    let service = PortfolioService::new(
        Arc::new(MockPortfolioRepository::default()),
        Arc::new(sink.clone()),
    );
    (service, sink)
}

fn new_portfolio(target: Vec<(&str, Decimal)>) -> NewPortfolio {
    NewPortfolio {
        user_id: "user-1".to_string(),
        name: "Grid assets".to_string(),
        description: None,
        target_allocation: target
            .into_iter()
            .map(|(k, v)| (k.to_string(), v))
            .collect::<BTreeMap<_, _>>(),
        risk_tolerance: RiskLevel::Moderate,
    }
}

fn item(price: Decimal, value: Decimal, sector: &str, risk: &str) -> NewPortfolioItem {
    NewPortfolioItem {
        listing_id: None,
        acquisition_price: price,
        current_value: Some(value),
        status: ItemStatus::Active,
        metadata: ItemMetadata {
            sector: Some(sector.to_string()),
            risk_level: Some(risk.to_string()),
            ..Default::default()
        },
    }
}

#[tokio::test]
async fn test_create_portfolio_rejects_invalid_allocation() {
    let (service, _) = service();
    let result = service
        .create_portfolio(new_portfolio(vec![("solar", dec!(80)), ("wind", dec!(30))]))
        .await;
    assert!(matches!(result, Err(Error::Validation(_))));
}

#[tokio::test]
async fn test_add_item_to_unknown_portfolio_is_not_found() {
    let (service, sink) = service();
    let result = service
        .add_item("missing", item(dec!(100), dec!(100), "solar", "low"))
        .await;
    assert!(matches!(result, Err(Error::NotFound(_))));
    assert!(sink.is_empty());
}

#[tokio::test]
async fn test_add_item_emits_change_event() {
    let (service, sink) = service();
    let portfolio = service.create_portfolio(new_portfolio(vec![])).await.unwrap();
    let added = service
        .add_item(&portfolio.id, item(dec!(100), dec!(110), "solar", "low"))
        .await
        .unwrap();

    assert_eq!(
        sink.events(),
        vec![DomainEvent::portfolio_item_changed(
            portfolio.id.clone(),
            added.id.clone()
        )]
    );
}

#[tokio::test]
async fn test_item_operations_check_portfolio_ownership() {
    let (service, _) = service();
    let first = service.create_portfolio(new_portfolio(vec![])).await.unwrap();
    let second = service.create_portfolio(new_portfolio(vec![])).await.unwrap();
    let added = service
        .add_item(&first.id, item(dec!(100), dec!(100), "solar", "low"))
        .await
        .unwrap();

    let wrong = service
        .refresh_item_valuation(&second.id, &added.id, dec!(150))
        .await;
    assert!(matches!(wrong, Err(Error::NotFound(_))));

    let refreshed = service
        .refresh_item_valuation(&first.id, &added.id, dec!(150))
        .await
        .unwrap();
    assert_eq!(refreshed.current_value, dec!(150));
}

#[tokio::test]
async fn test_change_status_to_same_value_is_a_no_op() {
    let (service, sink) = service();
    let portfolio = service.create_portfolio(new_portfolio(vec![])).await.unwrap();
    let added = service
        .add_item(&portfolio.id, item(dec!(100), dec!(100), "solar", "low"))
        .await
        .unwrap();
    assert_eq!(sink.len(), 1);

    service
        .change_item_status(&portfolio.id, &added.id, ItemStatus::Active)
        .await
        .unwrap();
    assert_eq!(sink.len(), 1);

    let sold = service
        .change_item_status(&portfolio.id, &added.id, ItemStatus::Sold)
        .await
        .unwrap();
    assert_eq!(sold.status, ItemStatus::Sold);
    assert_eq!(sink.len(), 2);
}

#[tokio::test]
async fn test_metrics_ignore_sold_items_and_use_history() {
    let (service, _) = service();
    let portfolio = service.create_portfolio(new_portfolio(vec![])).await.unwrap();
    service
        .add_item(&portfolio.id, item(dec!(100), dec!(120), "solar", "low"))
        .await
        .unwrap();
    let wind = service
        .add_item(&portfolio.id, item(dec!(100), dec!(50), "wind", "high"))
        .await
        .unwrap();
    service
        .change_item_status(&portfolio.id, &wind.id, ItemStatus::Sold)
        .await
        .unwrap();

    for (month, ret) in [(1, dec!(0.10)), (2, dec!(-0.05))] {
        service
            .record_performance(
                &portfolio.id,
                NewPerformancePoint {
                    period: NaiveDate::from_ymd_opt(2026, month, 28).unwrap(),
                    period_return: ret,
                },
            )
            .await
            .unwrap();
    }

    let metrics = service.calculate_metrics(&portfolio.id).unwrap();
    assert_eq!(metrics.total_value, dec!(120));
    assert_eq!(metrics.total_return, dec!(20));
    assert_eq!(metrics.active_item_count, 1);
    assert_eq!(metrics.sector_count, 1);
    assert_eq!(metrics.max_drawdown, dec!(-0.05));
    assert_eq!(metrics.win_rate, dec!(100));
}

#[tokio::test]
async fn test_recommendations_use_portfolio_targets() {
    let (service, _) = service();
    let portfolio = service
        .create_portfolio(new_portfolio(vec![("solar", dec!(50)), ("wind", dec!(50))]))
        .await
        .unwrap();
    service
        .add_item(&portfolio.id, item(dec!(100), dec!(90), "Solar", "low"))
        .await
        .unwrap();
    service
        .add_item(&portfolio.id, item(dec!(10), dec!(10), "wind", "low"))
        .await
        .unwrap();

    let recs = service
        .get_rebalancing_recommendations(&portfolio.id)
        .unwrap();
    assert_eq!(recs[0].priority, RecommendationPriority::High);
    assert_eq!(recs[0].sector.as_deref(), Some("solar"));
    assert!(recs
        .iter()
        .any(|r| r.priority == RecommendationPriority::Low
            && r.sector.as_deref() == Some("wind")));
}

#[tokio::test]
async fn test_summary_counts_all_items() {
    let (service, _) = service();
    let portfolio = service.create_portfolio(new_portfolio(vec![])).await.unwrap();
    service
        .add_item(&portfolio.id, item(dec!(100), dec!(125), "solar", "low"))
        .await
        .unwrap();
    let mut pending = item(dec!(40), dec!(40), "storage", "moderate");
    pending.status = ItemStatus::Pending;
    service.add_item(&portfolio.id, pending).await.unwrap();

    let summary = service.get_summary(&portfolio.id).unwrap();
    assert_eq!(summary.item_count, 2);
    assert_eq!(summary.active_item_count, 1);
    assert_eq!(summary.total_value, dec!(125));
    assert_eq!(summary.return_percentage, dec!(25));
}
