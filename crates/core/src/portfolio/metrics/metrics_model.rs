use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::portfolio::{ItemMetadata, ItemStatus, PerformancePoint, PortfolioItem, RiskLevel};

/// Points contributed to the diversification score per distinct sector.
pub const DIVERSIFICATION_POINTS_PER_SECTOR: Decimal = dec!(20);

/// Upper bound of the diversification score.
pub const MAX_DIVERSIFICATION_SCORE: Decimal = dec!(100);

/// Categorical risk weights averaged into the risk score.
pub const LOW_RISK_WEIGHT: Decimal = dec!(25);
pub const MODERATE_RISK_WEIGHT: Decimal = dec!(50);
pub const HIGH_RISK_WEIGHT: Decimal = dec!(75);
pub const UNKNOWN_RISK_WEIGHT: Decimal = dec!(50);

pub fn risk_weight(level: Option<RiskLevel>) -> Decimal {
    match level {
        Some(RiskLevel::Low) => LOW_RISK_WEIGHT,
        Some(RiskLevel::Moderate) => MODERATE_RISK_WEIGHT,
        Some(RiskLevel::High) => HIGH_RISK_WEIGHT,
        None => UNKNOWN_RISK_WEIGHT,
    }
}

/// The subset of a portfolio item the calculators read. Also the wire shape
/// accepted by the stateless metrics endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HoldingSnapshot {
    pub acquisition_price: Decimal,
    pub current_value: Decimal,
    #[serde(default)]
    pub status: ItemStatus,
    #[serde(default)]
    pub metadata: ItemMetadata,
}

impl HoldingSnapshot {
    pub fn is_active(&self) -> bool {
        self.status == ItemStatus::Active
    }
}

impl From<&PortfolioItem> for HoldingSnapshot {
    fn from(item: &PortfolioItem) -> Self {
        Self {
            acquisition_price: item.acquisition_price,
            current_value: item.current_value,
            status: item.status,
            metadata: item.metadata.clone(),
        }
    }
}

/// One period of performance history.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PeriodReturn {
    #[serde(rename = "return")]
    pub value: Decimal,
}

impl From<&PerformancePoint> for PeriodReturn {
    fn from(point: &PerformancePoint) -> Self {
        Self {
            value: point.period_return,
        }
    }
}

/// Snapshot of aggregate portfolio statistics, recomputed on every read.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioMetrics {
    pub total_value: Decimal,
    pub total_acquisition_cost: Decimal,
    pub total_return: Decimal,
    pub return_percentage: Decimal,
    /// Population standard deviation of period returns.
    pub volatility: Decimal,
    /// Mean period return over volatility; zero when volatility is zero.
    pub sharpe_ratio: Decimal,
    /// Worst single-period return.
    pub max_drawdown: Decimal,
    pub diversification_score: Decimal,
    pub risk_score: Decimal,
    pub win_rate: Decimal,
    pub active_item_count: usize,
    pub sector_count: usize,
}
