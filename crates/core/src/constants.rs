/// Decimal precision for metric calculations
pub const DECIMAL_PRECISION: u32 = 6;

/// Decimal precision for display strings
pub const DISPLAY_DECIMAL_PRECISION: u32 = 2;

/// Default number of rows returned by list queries when no limit is given
pub const DEFAULT_LIST_LIMIT: i64 = 50;

/// Hard upper bound on list query limits
pub const MAX_LIST_LIMIT: i64 = 500;

/// Clamps a caller-supplied limit into `1..=MAX_LIST_LIMIT`.
pub fn effective_limit(limit: Option<i64>) -> i64 {
    limit
        .unwrap_or(DEFAULT_LIST_LIMIT)
        .clamp(1, MAX_LIST_LIMIT)
}
