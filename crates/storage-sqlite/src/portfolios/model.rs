//! Database models for portfolios.

use diesel::prelude::*;
use serde::{Deserialize, Serialize};

use chrono::{NaiveDate, NaiveDateTime};
use voltmarket_core::portfolio::{
    ItemMetadata, ItemStatus, PerformancePoint, Portfolio, PortfolioItem, RiskLevel,
};

use crate::utils::{decode_allocation, parse_decimal_tolerant, parse_enum_or};

#[derive(Queryable, Selectable, Insertable, Identifiable, PartialEq, Serialize, Deserialize, Debug, Clone)]
#[diesel(table_name = crate::schema::portfolios)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioDB {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub target_allocation: String,
    pub risk_tolerance: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(
    Queryable, Selectable, Insertable, Identifiable, Associations, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(belongs_to(PortfolioDB, foreign_key = portfolio_id))]
#[diesel(table_name = crate::schema::portfolio_items)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItemDB {
    pub id: String,
    pub portfolio_id: String,
    pub listing_id: Option<String>,
    pub acquisition_price: String,
    pub current_value: String,
    pub status: String,
    pub metadata: String,
    pub acquired_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(
    Queryable, Selectable, Insertable, Identifiable, Associations, PartialEq, Serialize, Deserialize, Debug, Clone,
)]
#[diesel(belongs_to(PortfolioDB, foreign_key = portfolio_id))]
#[diesel(table_name = crate::schema::portfolio_performance)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
#[serde(rename_all = "camelCase")]
pub struct PerformancePointDB {
    pub id: String,
    pub portfolio_id: String,
    pub period: NaiveDate,
    pub period_return: String,
}

impl From<PortfolioDB> for Portfolio {
    fn from(db: PortfolioDB) -> Self {
        Self {
            target_allocation: decode_allocation(&db.target_allocation),
            risk_tolerance: RiskLevel::parse(&db.risk_tolerance).unwrap_or_default(),
            id: db.id,
            user_id: db.user_id,
            name: db.name,
            description: db.description,
            created_at: db.created_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<PortfolioItemDB> for PortfolioItem {
    fn from(db: PortfolioItemDB) -> Self {
        let metadata = serde_json::from_str::<ItemMetadata>(&db.metadata).unwrap_or_else(|e| {
            log::warn!("Invalid metadata on portfolio item {}: {}", db.id, e);
            ItemMetadata::default()
        });
        Self {
            acquisition_price: parse_decimal_tolerant(&db.acquisition_price, "acquisition_price"),
            current_value: parse_decimal_tolerant(&db.current_value, "current_value"),
            status: parse_enum_or(&db.status, "item status", ItemStatus::Pending),
            metadata,
            id: db.id,
            portfolio_id: db.portfolio_id,
            listing_id: db.listing_id,
            acquired_at: db.acquired_at,
            updated_at: db.updated_at,
        }
    }
}

impl From<PerformancePointDB> for PerformancePoint {
    fn from(db: PerformancePointDB) -> Self {
        Self {
            period_return: parse_decimal_tolerant(&db.period_return, "period_return"),
            id: db.id,
            portfolio_id: db.portfolio_id,
            period: db.period,
        }
    }
}
