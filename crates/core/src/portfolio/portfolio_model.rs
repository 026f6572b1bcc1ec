//! Portfolio domain models.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::{errors::ValidationError, Error, Result};

/// Lifecycle status of a portfolio item. Items are never deleted; they move
/// out of `Active` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ItemStatus {
    #[default]
    Active,
    Pending,
    Sold,
    Archived,
}

impl ItemStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemStatus::Active => "active",
            ItemStatus::Pending => "pending",
            ItemStatus::Sold => "sold",
            ItemStatus::Archived => "archived",
        }
    }
}

impl fmt::Display for ItemStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ItemStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" => Ok(ItemStatus::Active),
            "pending" => Ok(ItemStatus::Pending),
            "sold" => Ok(ItemStatus::Sold),
            "archived" => Ok(ItemStatus::Archived),
            other => Err(Error::invalid_input(format!(
                "Unknown portfolio item status '{}'",
                other
            ))),
        }
    }
}

/// Three-point risk scale used for items and portfolio risk tolerance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    #[default]
    Moderate,
    High,
}

impl RiskLevel {
    /// Lenient parse of free-form metadata values. `medium` is accepted as
    /// an alias of `moderate`; anything else is unknown.
    pub fn parse(value: &str) -> Option<RiskLevel> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Some(RiskLevel::Low),
            "moderate" | "medium" => Some(RiskLevel::Moderate),
            "high" => Some(RiskLevel::High),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "low",
            RiskLevel::Moderate => "moderate",
            RiskLevel::High => "high",
        }
    }
}

/// Free-form item metadata. `sector` and `riskLevel` feed the metrics;
/// every other key is preserved untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ItemMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl ItemMetadata {
    /// Sector name trimmed, with blanks treated as missing.
    pub fn sector_name(&self) -> Option<&str> {
        self.sector
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Case-insensitive grouping key for the sector.
    pub fn sector_key(&self) -> Option<String> {
        self.sector_name().map(str::to_lowercase)
    }

    pub fn risk(&self) -> Option<RiskLevel> {
        self.risk_level.as_deref().and_then(RiskLevel::parse)
    }
}

/// Domain model representing a tracked holding within a portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioItem {
    pub id: String,
    pub portfolio_id: String,
    pub listing_id: Option<String>,
    pub acquisition_price: Decimal,
    pub current_value: Decimal,
    pub status: ItemStatus,
    pub metadata: ItemMetadata,
    pub acquired_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl PortfolioItem {
    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }
}

/// Input model for recording an acquisition.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolioItem {
    pub listing_id: Option<String>,
    pub acquisition_price: Decimal,
    /// Defaults to the acquisition price when omitted.
    pub current_value: Option<Decimal>,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub metadata: ItemMetadata,
}

impl NewPortfolioItem {
    pub fn validate(&self) -> Result<()> {
        if let Some(listing_id) = &self.listing_id {
            if listing_id.trim().is_empty() {
                return Err(Error::Validation(ValidationError::InvalidInput(
                    "Listing ID cannot be blank".to_string(),
                )));
            }
        }
        Ok(())
    }
}

/// Domain model representing a user's portfolio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Portfolio {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    /// Sector name -> target share of total value, in percent.
    pub target_allocation: BTreeMap<String, Decimal>,
    pub risk_tolerance: RiskLevel,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Input model for creating a portfolio.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPortfolio {
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub target_allocation: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub risk_tolerance: RiskLevel,
}

impl NewPortfolio {
    pub fn validate(&self) -> Result<()> {
        if self.user_id.trim().is_empty() {
            return Err(Error::Validation(ValidationError::MissingField(
                "userId".to_string(),
            )));
        }
        if self.name.trim().is_empty() {
            return Err(Error::Validation(ValidationError::InvalidInput(
                "Portfolio name cannot be empty".to_string(),
            )));
        }
        let mut total = Decimal::ZERO;
        for (sector, target) in &self.target_allocation {
            if sector.trim().is_empty() {
                return Err(Error::invalid_input("Target allocation sector cannot be blank"));
            }
            if target.is_sign_negative() {
                return Err(Error::invalid_input(format!(
                    "Target allocation for '{}' cannot be negative",
                    sector
                )));
            }
            total += *target;
        }
        if total > Decimal::ONE_HUNDRED {
            return Err(Error::invalid_input(format!(
                "Target allocation sums to {}%, which exceeds 100%",
                total
            )));
        }
        Ok(())
    }
}

/// Return figure for one period of a portfolio's performance history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PerformancePoint {
    pub id: String,
    pub portfolio_id: String,
    pub period: NaiveDate,
    #[serde(rename = "return")]
    pub period_return: Decimal,
}

/// Input model for recording a performance period.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewPerformancePoint {
    pub period: NaiveDate,
    #[serde(rename = "return")]
    pub period_return: Decimal,
}

/// Totals derived from a portfolio's items on read. Never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub portfolio: Portfolio,
    pub item_count: usize,
    pub active_item_count: usize,
    pub total_acquisition_cost: Decimal,
    pub total_value: Decimal,
    pub total_return: Decimal,
    pub return_percentage: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn new_portfolio(allocation: Vec<(&str, Decimal)>) -> NewPortfolio {
        NewPortfolio {
            user_id: "user-1".to_string(),
            name: "Renewables".to_string(),
            description: None,
            target_allocation: allocation
                .into_iter()
                .map(|(k, v)| (k.to_string(), v))
                .collect(),
            risk_tolerance: RiskLevel::Moderate,
        }
    }

    #[test]
    fn test_item_status_round_trip_through_str() {
        for status in [
            ItemStatus::Active,
            ItemStatus::Pending,
            ItemStatus::Sold,
            ItemStatus::Archived,
        ] {
            assert_eq!(status.as_str().parse::<ItemStatus>().unwrap(), status);
        }
        assert!("liquidated".parse::<ItemStatus>().is_err());
    }

    #[test]
    fn test_risk_level_parse_is_lenient() {
        assert_eq!(RiskLevel::parse(" HIGH "), Some(RiskLevel::High));
        assert_eq!(RiskLevel::parse("medium"), Some(RiskLevel::Moderate));
        assert_eq!(RiskLevel::parse("extreme"), None);
    }

    #[test]
    fn test_metadata_keeps_unknown_keys() {
        let json = r#"{"sector":"solar","riskLevel":"low","gridRegion":"CAISO"}"#;
        let meta: ItemMetadata = serde_json::from_str(json).unwrap();
        assert_eq!(meta.sector_name(), Some("solar"));
        assert_eq!(meta.risk(), Some(RiskLevel::Low));
        assert_eq!(meta.extra.get("gridRegion"), Some(&Value::from("CAISO")));

        let back = serde_json::to_value(&meta).unwrap();
        assert_eq!(back["gridRegion"], "CAISO");
    }

    #[test]
    fn test_blank_sector_is_missing() {
        let meta = ItemMetadata {
            sector: Some("   ".to_string()),
            ..Default::default()
        };
        assert_eq!(meta.sector_name(), None);
        assert_eq!(meta.sector_key(), None);
    }

    #[test]
    fn test_new_portfolio_validation() {
        assert!(new_portfolio(vec![("solar", dec!(60)), ("wind", dec!(40))])
            .validate()
            .is_ok());
        assert!(new_portfolio(vec![("solar", dec!(70)), ("wind", dec!(40))])
            .validate()
            .is_err());
        assert!(new_portfolio(vec![("solar", dec!(-1))]).validate().is_err());

        let mut unnamed = new_portfolio(vec![]);
        unnamed.name = " ".to_string();
        assert!(unnamed.validate().is_err());
    }

    #[test]
    fn test_performance_point_uses_return_key() {
        let point = NewPerformancePoint {
            period: NaiveDate::from_ymd_opt(2026, 3, 31).unwrap(),
            period_return: dec!(0.042),
        };
        let json = serde_json::to_value(&point).unwrap();
        assert!(json.get("return").is_some());
        assert!(json.get("periodReturn").is_none());
    }
}
