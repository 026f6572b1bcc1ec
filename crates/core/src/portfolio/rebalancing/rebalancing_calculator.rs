use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::rebalancing_model::*;
use crate::constants::DISPLAY_DECIMAL_PRECISION;
use crate::errors::CalculatorError;
use crate::portfolio::metrics::HoldingSnapshot;
use crate::portfolio::RiskLevel;

type CalcResult<T> = std::result::Result<T, CalculatorError>;

fn overflow(what: &str) -> CalculatorError {
    CalculatorError::Overflow(what.to_string())
}

fn share(part: Decimal, whole: Decimal, what: &str) -> CalcResult<Decimal> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| overflow(what))
}

/// Current value per sector key across active holdings. Holdings without a
/// sector count toward the total but belong to no sector.
fn sector_values(active: &[&HoldingSnapshot]) -> CalcResult<BTreeMap<String, Decimal>> {
    let mut values: BTreeMap<String, Decimal> = BTreeMap::new();
    for holding in active {
        if let Some(key) = holding.metadata.sector_key() {
            let entry = values.entry(key).or_insert(Decimal::ZERO);
            *entry = entry
                .checked_add(holding.current_value)
                .ok_or_else(|| overflow("sector value"))?;
        }
    }
    Ok(values)
}

/// Derives rebalancing recommendations for a set of holdings.
///
/// * every sector above 40% of total current value → `high`
/// * more than 30% of active items rated high-risk → `medium`
/// * every targeted sector more than 10 points off its target → `low`
///
/// Results are ordered by priority, then sector.
pub fn recommend_rebalancing(
    items: &[HoldingSnapshot],
    target_allocation: &BTreeMap<String, Decimal>,
) -> CalcResult<Vec<RebalancingRecommendation>> {
    let active: Vec<&HoldingSnapshot> = items.iter().filter(|i| i.is_active()).collect();
    let mut recommendations = Vec::new();
    if active.is_empty() {
        return Ok(recommendations);
    }

    let total_value = active.iter().try_fold(Decimal::ZERO, |acc, i| {
        acc.checked_add(i.current_value)
            .ok_or_else(|| overflow("total value"))
    })?;
    let by_sector = sector_values(&active)?;

    if total_value > Decimal::ZERO {
        for (sector, value) in &by_sector {
            let pct = share(*value, total_value, "sector share")?;
            if pct > SECTOR_CONCENTRATION_LIMIT_PCT {
                recommendations.push(RebalancingRecommendation {
                    kind: RecommendationKind::SectorConcentration,
                    priority: RecommendationPriority::High,
                    sector: Some(sector.clone()),
                    current_percentage: pct.round_dp(DISPLAY_DECIMAL_PRECISION),
                    target_percentage: Some(SECTOR_CONCENTRATION_LIMIT_PCT),
                    message: format!(
                        "Consider reducing exposure to {}: it makes up {}% of portfolio value",
                        sector,
                        pct.round_dp(DISPLAY_DECIMAL_PRECISION)
                    ),
                });
            }
        }
    }

    let high_risk = active
        .iter()
        .filter(|i| i.metadata.risk() == Some(RiskLevel::High))
        .count();
    let high_risk_pct = share(
        Decimal::from(high_risk),
        Decimal::from(active.len()),
        "high-risk share",
    )?;
    if high_risk_pct > HIGH_RISK_ITEM_LIMIT_PCT {
        recommendations.push(RebalancingRecommendation {
            kind: RecommendationKind::RiskConcentration,
            priority: RecommendationPriority::Medium,
            sector: None,
            current_percentage: high_risk_pct.round_dp(DISPLAY_DECIMAL_PRECISION),
            target_percentage: Some(HIGH_RISK_ITEM_LIMIT_PCT),
            message: format!(
                "{} of {} holdings are high-risk; consider adding lower-risk assets",
                high_risk,
                active.len()
            ),
        });
    }

    if total_value > Decimal::ZERO {
        for (sector, target) in target_allocation {
            let key = sector.trim().to_lowercase();
            let actual = share(
                by_sector.get(&key).copied().unwrap_or(Decimal::ZERO),
                total_value,
                "sector share",
            )?;
            let drift = actual
                .checked_sub(*target)
                .ok_or_else(|| overflow("target drift"))?;
            if drift.abs() > TARGET_DRIFT_TOLERANCE_PCT {
                let direction = if actual > *target { "above" } else { "below" };
                recommendations.push(RebalancingRecommendation {
                    kind: RecommendationKind::TargetDrift,
                    priority: RecommendationPriority::Low,
                    sector: Some(key),
                    current_percentage: actual.round_dp(DISPLAY_DECIMAL_PRECISION),
                    target_percentage: Some(*target),
                    message: format!(
                        "{} is {}% of portfolio value, {} its {}% target",
                        sector,
                        actual.round_dp(DISPLAY_DECIMAL_PRECISION),
                        direction,
                        target
                    ),
                });
            }
        }
    }

    recommendations.sort_by(|a, b| {
        a.priority
            .cmp(&b.priority)
            .then_with(|| a.sector.cmp(&b.sector))
    });
    Ok(recommendations)
}
