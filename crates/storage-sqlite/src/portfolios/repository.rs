use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use diesel::prelude::*;
use diesel::SqliteConnection;
use rust_decimal::Decimal;
use uuid::Uuid;
use voltmarket_core::portfolio::{
    ItemStatus, NewPerformancePoint, NewPortfolio, NewPortfolioItem, PerformancePoint, Portfolio,
    PortfolioItem, PortfolioRepositoryTrait,
};
use voltmarket_core::Result;

use super::model::{PerformancePointDB, PortfolioDB, PortfolioItemDB};
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::{IntoCore, OrNotFound};
use crate::schema::{portfolio_items, portfolio_performance, portfolios};
use crate::utils::encode_allocation;

pub struct PortfolioRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl PortfolioRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        Self { pool, writer }
    }
}

fn load_item(conn: &mut SqliteConnection, item_id: &str) -> Result<PortfolioItemDB> {
    portfolio_items::table
        .find(item_id)
        .select(PortfolioItemDB::as_select())
        .first::<PortfolioItemDB>(conn)
        .or_not_found(|| format!("Portfolio item {}", item_id))
}

#[async_trait]
impl PortfolioRepositoryTrait for PortfolioRepository {
    async fn create_portfolio(&self, new_portfolio: NewPortfolio) -> Result<Portfolio> {
        let now = Utc::now().naive_utc();
        let row = PortfolioDB {
            id: Uuid::new_v4().to_string(),
            user_id: new_portfolio.user_id.trim().to_string(),
            name: new_portfolio.name.trim().to_string(),
            description: new_portfolio.description,
            target_allocation: encode_allocation(&new_portfolio.target_allocation).into_core()?,
            risk_tolerance: new_portfolio.risk_tolerance.as_str().to_string(),
            created_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<Portfolio> {
                let inserted = diesel::insert_into(portfolios::table)
                    .values(&row)
                    .returning(PortfolioDB::as_returning())
                    .get_result::<PortfolioDB>(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    fn get_portfolio(&self, portfolio_id: &str) -> Result<Portfolio> {
        let mut conn = get_connection(&self.pool)?;
        portfolios::table
            .find(portfolio_id)
            .select(PortfolioDB::as_select())
            .first::<PortfolioDB>(&mut conn)
            .or_not_found(|| format!("Portfolio {}", portfolio_id))
            .map(Portfolio::from)
    }

    fn list_portfolios(&self, user_id: &str) -> Result<Vec<Portfolio>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<PortfolioDB> = portfolios::table
            .filter(portfolios::user_id.eq(user_id))
            .order(portfolios::created_at.desc())
            .select(PortfolioDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(Portfolio::from).collect())
    }

    async fn insert_item(
        &self,
        portfolio_id: &str,
        new_item: NewPortfolioItem,
    ) -> Result<PortfolioItem> {
        let now = Utc::now().naive_utc();
        let row = PortfolioItemDB {
            id: Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            listing_id: new_item.listing_id,
            acquisition_price: new_item.acquisition_price.to_string(),
            current_value: new_item
                .current_value
                .unwrap_or(new_item.acquisition_price)
                .to_string(),
            status: new_item.status.as_str().to_string(),
            metadata: serde_json::to_string(&new_item.metadata).into_core()?,
            acquired_at: now,
            updated_at: now,
        };

        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PortfolioItem> {
                let inserted = diesel::insert_into(portfolio_items::table)
                    .values(&row)
                    .returning(PortfolioItemDB::as_returning())
                    .get_result::<PortfolioItemDB>(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    fn get_item(&self, item_id: &str) -> Result<PortfolioItem> {
        let mut conn = get_connection(&self.pool)?;
        load_item(&mut conn, item_id).map(PortfolioItem::from)
    }

    fn list_items(&self, portfolio_id: &str) -> Result<Vec<PortfolioItem>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<PortfolioItemDB> = portfolio_items::table
            .filter(portfolio_items::portfolio_id.eq(portfolio_id))
            .order(portfolio_items::acquired_at.asc())
            .select(PortfolioItemDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(PortfolioItem::from).collect())
    }

    async fn update_item_valuation(
        &self,
        item_id: &str,
        current_value: Decimal,
    ) -> Result<PortfolioItem> {
        let item_id = item_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PortfolioItem> {
                load_item(conn, &item_id)?;
                let updated = diesel::update(portfolio_items::table.find(&item_id))
                    .set((
                        portfolio_items::current_value.eq(current_value.to_string()),
                        portfolio_items::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(PortfolioItemDB::as_returning())
                    .get_result::<PortfolioItemDB>(conn)
                    .into_core()?;
                Ok(updated.into())
            })
            .await
    }

    async fn update_item_status(
        &self,
        item_id: &str,
        status: ItemStatus,
    ) -> Result<PortfolioItem> {
        let item_id = item_id.to_string();
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PortfolioItem> {
                load_item(conn, &item_id)?;
                let updated = diesel::update(portfolio_items::table.find(&item_id))
                    .set((
                        portfolio_items::status.eq(status.as_str()),
                        portfolio_items::updated_at.eq(Utc::now().naive_utc()),
                    ))
                    .returning(PortfolioItemDB::as_returning())
                    .get_result::<PortfolioItemDB>(conn)
                    .into_core()?;
                Ok(updated.into())
            })
            .await
    }

    async fn insert_performance_point(
        &self,
        portfolio_id: &str,
        point: NewPerformancePoint,
    ) -> Result<PerformancePoint> {
        let row = PerformancePointDB {
            id: Uuid::new_v4().to_string(),
            portfolio_id: portfolio_id.to_string(),
            period: point.period,
            period_return: point.period_return.to_string(),
        };
        self.writer
            .exec(move |conn: &mut SqliteConnection| -> Result<PerformancePoint> {
                let inserted = diesel::insert_into(portfolio_performance::table)
                    .values(&row)
                    .returning(PerformancePointDB::as_returning())
                    .get_result::<PerformancePointDB>(conn)
                    .into_core()?;
                Ok(inserted.into())
            })
            .await
    }

    fn list_performance_history(&self, portfolio_id: &str) -> Result<Vec<PerformancePoint>> {
        let mut conn = get_connection(&self.pool)?;
        let rows: Vec<PerformancePointDB> = portfolio_performance::table
            .filter(portfolio_performance::portfolio_id.eq(portfolio_id))
            .order(portfolio_performance::period.asc())
            .select(PerformancePointDB::as_select())
            .load(&mut conn)
            .into_core()?;
        Ok(rows.into_iter().map(PerformancePoint::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::{create_pool, run_migrations, spawn_writer};
    use chrono::NaiveDate;
    use rust_decimal_macros::dec;
    use std::collections::BTreeMap;
    use tempfile::tempdir;
    use voltmarket_core::errors::{DatabaseError, Error};
    use voltmarket_core::portfolio::{ItemMetadata, RiskLevel};

    async fn create_test_repository() -> (PortfolioRepository, tempfile::TempDir) {
        let temp_dir = tempdir().expect("Failed to create temp directory");
        let db_path = temp_dir.path().join("test.db").to_string_lossy().to_string();
        let pool = create_pool(&db_path).expect("Failed to create pool");
        run_migrations(&pool).expect("Failed to run migrations");
        let writer = spawn_writer((*pool).clone());
        (PortfolioRepository::new(pool, writer), temp_dir)
    }

    fn new_portfolio() -> NewPortfolio {
        let mut target_allocation = BTreeMap::new();
        target_allocation.insert("solar".to_string(), dec!(60));
        target_allocation.insert("wind".to_string(), dec!(40));
        NewPortfolio {
            user_id: "user-1".to_string(),
            name: "Utility scale".to_string(),
            description: Some("Long-dated PPAs".to_string()),
            target_allocation,
            risk_tolerance: RiskLevel::High,
        }
    }

    #[tokio::test]
    async fn test_portfolio_round_trip() {
        let (repo, _dir) = create_test_repository().await;
        let created = repo.create_portfolio(new_portfolio()).await.unwrap();

        let loaded = repo.get_portfolio(&created.id).unwrap();
        assert_eq!(loaded, created);
        assert_eq!(loaded.target_allocation["solar"], dec!(60));
        assert_eq!(loaded.risk_tolerance, RiskLevel::High);

        assert_eq!(repo.list_portfolios("user-1").unwrap().len(), 1);
        assert!(repo.list_portfolios("someone-else").unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_missing_portfolio_is_not_found() {
        let (repo, _dir) = create_test_repository().await;
        let err = repo.get_portfolio("nope").unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn test_item_valuation_and_status_updates() {
        let (repo, _dir) = create_test_repository().await;
        let portfolio = repo.create_portfolio(new_portfolio()).await.unwrap();

        let item = repo
            .insert_item(
                &portfolio.id,
                NewPortfolioItem {
                    listing_id: Some("listing-1".to_string()),
                    acquisition_price: dec!(1250000.50),
                    current_value: None,
                    status: ItemStatus::Active,
                    metadata: ItemMetadata {
                        sector: Some("solar".to_string()),
                        risk_level: Some("low".to_string()),
                        ..Default::default()
                    },
                },
            )
            .await
            .unwrap();
        assert_eq!(item.current_value, dec!(1250000.50));

        let revalued = repo
            .update_item_valuation(&item.id, dec!(1400000))
            .await
            .unwrap();
        assert_eq!(revalued.current_value, dec!(1400000));

        let sold = repo
            .update_item_status(&item.id, ItemStatus::Sold)
            .await
            .unwrap();
        assert_eq!(sold.status, ItemStatus::Sold);

        let items = repo.list_items(&portfolio.id).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].metadata.sector_name(), Some("solar"));

        let missing = repo.update_item_valuation("ghost", dec!(1)).await.unwrap_err();
        assert!(missing.is_not_found());
    }

    #[tokio::test]
    async fn test_item_requires_existing_portfolio() {
        let (repo, _dir) = create_test_repository().await;
        let err = repo
            .insert_item(
                "missing-portfolio",
                NewPortfolioItem {
                    listing_id: None,
                    acquisition_price: dec!(10),
                    current_value: None,
                    status: ItemStatus::Active,
                    metadata: ItemMetadata::default(),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            Error::Database(DatabaseError::ForeignKeyViolation(_))
        ));
    }

    #[tokio::test]
    async fn test_performance_history_is_ordered_and_unique_per_period() {
        let (repo, _dir) = create_test_repository().await;
        let portfolio = repo.create_portfolio(new_portfolio()).await.unwrap();

        for (month, ret) in [(3, dec!(0.02)), (1, dec!(0.1)), (2, dec!(-0.05))] {
            repo.insert_performance_point(
                &portfolio.id,
                NewPerformancePoint {
                    period: NaiveDate::from_ymd_opt(2026, month, 1).unwrap(),
                    period_return: ret,
                },
            )
            .await
            .unwrap();
        }

        let history = repo.list_performance_history(&portfolio.id).unwrap();
        let returns: Vec<Decimal> = history.iter().map(|p| p.period_return).collect();
        assert_eq!(returns, vec![dec!(0.1), dec!(-0.05), dec!(0.02)]);

        let duplicate = repo
            .insert_performance_point(
                &portfolio.id,
                NewPerformancePoint {
                    period: NaiveDate::from_ymd_opt(2026, 1, 1).unwrap(),
                    period_return: dec!(0.3),
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(
            duplicate,
            Error::Database(DatabaseError::UniqueViolation(_))
        ));
    }
}
