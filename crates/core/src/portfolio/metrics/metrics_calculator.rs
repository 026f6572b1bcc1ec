use std::collections::HashSet;

use rust_decimal::{Decimal, MathematicalOps};

use super::metrics_model::{
    risk_weight, HoldingSnapshot, PeriodReturn, PortfolioMetrics,
    DIVERSIFICATION_POINTS_PER_SECTOR, MAX_DIVERSIFICATION_SCORE,
};
use crate::constants::DECIMAL_PRECISION;
use crate::errors::CalculatorError;

type CalcResult<T> = std::result::Result<T, CalculatorError>;

fn checked_sum<I>(values: I, what: &str) -> CalcResult<Decimal>
where
    I: IntoIterator<Item = Decimal>,
{
    values.into_iter().try_fold(Decimal::ZERO, |acc, v| {
        acc.checked_add(v)
            .ok_or_else(|| CalculatorError::Overflow(what.to_string()))
    })
}

fn percentage(part: Decimal, whole: Decimal, what: &str) -> CalcResult<Decimal> {
    if whole.is_zero() {
        return Ok(Decimal::ZERO);
    }
    part.checked_div(whole)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or_else(|| CalculatorError::Overflow(what.to_string()))
}

struct ReturnStatistics {
    mean: Decimal,
    volatility: Decimal,
    worst: Decimal,
}

/// Mean, population standard deviation and minimum of the period returns.
/// An empty history yields zeros for all three.
fn return_statistics(history: &[PeriodReturn]) -> CalcResult<ReturnStatistics> {
    if history.is_empty() {
        return Ok(ReturnStatistics {
            mean: Decimal::ZERO,
            volatility: Decimal::ZERO,
            worst: Decimal::ZERO,
        });
    }

    let count = Decimal::from(history.len());
    let mean = checked_sum(history.iter().map(|p| p.value), "mean return")? / count;

    let squared_deviations = history
        .iter()
        .map(|p| {
            p.value
                .checked_sub(mean)
                .and_then(|diff| diff.checked_mul(diff))
                .ok_or_else(|| CalculatorError::Overflow("variance".to_string()))
        })
        .collect::<CalcResult<Vec<_>>>()?;
    let variance = checked_sum(squared_deviations, "variance")? / count;
    let volatility = variance.sqrt().unwrap_or(Decimal::ZERO);

    let worst = history
        .iter()
        .map(|p| p.value)
        .min()
        .unwrap_or(Decimal::ZERO);

    Ok(ReturnStatistics {
        mean,
        volatility,
        worst,
    })
}

/// Computes the aggregate metrics snapshot for a set of holdings and their
/// performance history.
///
/// Only `active` holdings contribute. Ratios whose denominator is zero
/// (no acquisition cost, no active items, flat or empty history) are
/// reported as zero.
pub fn calculate_portfolio_metrics(
    items: &[HoldingSnapshot],
    history: &[PeriodReturn],
) -> CalcResult<PortfolioMetrics> {
    let active: Vec<&HoldingSnapshot> = items.iter().filter(|i| i.is_active()).collect();

    let total_acquisition_cost =
        checked_sum(active.iter().map(|i| i.acquisition_price), "acquisition cost")?;
    let total_value = checked_sum(active.iter().map(|i| i.current_value), "current value")?;
    let total_return = total_value
        .checked_sub(total_acquisition_cost)
        .ok_or_else(|| CalculatorError::Overflow("total return".to_string()))?;
    let return_percentage = percentage(total_return, total_acquisition_cost, "return percentage")?;

    let stats = return_statistics(history)?;
    let sharpe_ratio = if stats.volatility.is_zero() {
        Decimal::ZERO
    } else {
        stats
            .mean
            .checked_div(stats.volatility)
            .ok_or_else(|| CalculatorError::Overflow("sharpe ratio".to_string()))?
    };

    let sectors: HashSet<String> = active
        .iter()
        .filter_map(|i| i.metadata.sector_key())
        .collect();
    let diversification_score = (Decimal::from(sectors.len()) * DIVERSIFICATION_POINTS_PER_SECTOR)
        .min(MAX_DIVERSIFICATION_SCORE);

    let risk_score = if active.is_empty() {
        Decimal::ZERO
    } else {
        checked_sum(
            active.iter().map(|i| risk_weight(i.metadata.risk())),
            "risk score",
        )? / Decimal::from(active.len())
    };

    let winners = active
        .iter()
        .filter(|i| i.current_value > i.acquisition_price)
        .count();
    let win_rate = percentage(
        Decimal::from(winners),
        Decimal::from(active.len()),
        "win rate",
    )?;

    Ok(PortfolioMetrics {
        total_value: total_value.round_dp(DECIMAL_PRECISION),
        total_acquisition_cost: total_acquisition_cost.round_dp(DECIMAL_PRECISION),
        total_return: total_return.round_dp(DECIMAL_PRECISION),
        return_percentage: return_percentage.round_dp(DECIMAL_PRECISION),
        volatility: stats.volatility.round_dp(DECIMAL_PRECISION),
        sharpe_ratio: sharpe_ratio.round_dp(DECIMAL_PRECISION),
        max_drawdown: stats.worst.round_dp(DECIMAL_PRECISION),
        diversification_score,
        risk_score: risk_score.round_dp(DECIMAL_PRECISION),
        win_rate: win_rate.round_dp(DECIMAL_PRECISION),
        active_item_count: active.len(),
        sector_count: sectors.len(),
    })
}
