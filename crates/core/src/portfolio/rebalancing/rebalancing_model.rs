use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// A sector above this share of total current value is over-concentrated.
pub const SECTOR_CONCENTRATION_LIMIT_PCT: Decimal = dec!(40);

/// Flag the portfolio when more than this share of active items is high-risk.
pub const HIGH_RISK_ITEM_LIMIT_PCT: Decimal = dec!(30);

/// Allowed distance, in percentage points, between a sector's actual and
/// target share.
pub const TARGET_DRIFT_TOLERANCE_PCT: Decimal = dec!(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationPriority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationKind {
    SectorConcentration,
    RiskConcentration,
    TargetDrift,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RebalancingRecommendation {
    pub kind: RecommendationKind,
    pub priority: RecommendationPriority,
    /// Sector the recommendation is about; `None` for portfolio-wide ones.
    pub sector: Option<String>,
    /// Observed share in percent (of value for sectors, of items for risk).
    pub current_percentage: Decimal,
    pub target_percentage: Option<Decimal>,
    pub message: String,
}
