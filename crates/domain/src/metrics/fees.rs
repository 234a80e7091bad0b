use crate::value_objects::percentage::BPS_PER_UNIT;
use rust_decimal::Decimal;

pub const SECONDS_PER_DAY: u64 = 86_400;
pub const DAYS_PER_YEAR: u32 = 365;

/// Whole days a pool has been live, rounded up and never less than one.
///
/// A pool without a creation time counts as created `now`.
pub fn days_live(create_time: Option<u64>, now: u64) -> u64 {
    let started = create_time.unwrap_or(now);
    now.saturating_sub(started).div_ceil(SECONDS_PER_DAY).max(1)
}

/// Average daily swap fees over the pool lifetime, net of the protocol cut.
pub fn daily_fees(total_swap_fee: Decimal, days_live: u64, protocol_fee: Decimal) -> Decimal {
    total_swap_fee / Decimal::from(days_live.max(1)) * (Decimal::ONE - protocol_fee)
}

/// Annualized swap fee APR in (unrounded) basis points.
///
/// Returns `None` when `total_liquidity` is zero.
pub fn swap_fee_apr_bps(daily_fees: Decimal, total_liquidity: Decimal) -> Option<Decimal> {
    let fees_daily_bsp = BPS_PER_UNIT * daily_fees.checked_div(total_liquidity)?;
    Some(Decimal::from(DAYS_PER_YEAR) * fees_daily_bsp)
}

/// Scales an amount earned over `days` to a 365 day year.
pub fn annualize(amount: Decimal, days: u32) -> Option<Decimal> {
    if days == 0 {
        return None;
    }
    Some(amount * Decimal::from(DAYS_PER_YEAR) / Decimal::from(days))
}
