use super::{AprContext, AprEngine, to_bps};
use crate::error::Result;
use lp_yield_domain::metrics::{daily_fees, days_live, swap_fee_apr_bps};
use rust_decimal::Decimal;
use tracing::debug;

impl AprEngine {
    /// APR from average daily swap fees over the pool lifetime.
    ///
    /// Zero when the pool has no swap fee or liquidity snapshot.
    pub(super) async fn swap_fees(&self, ctx: &AprContext<'_>) -> Result<i64> {
        let pool = ctx.pool;
        let (Some(total_swap_fee), Some(total_liquidity)) =
            (pool.total_swap_fee, pool.total_liquidity)
        else {
            return Ok(0);
        };
        if total_swap_fee.is_zero() || total_liquidity.is_zero() {
            return Ok(0);
        }

        let protocol_fee = self
            .providers
            .protocol_fees
            .find_protocol_fee_percentage()
            .await?;
        let days = days_live(pool.create_time, ctx.now);
        let daily = daily_fees(total_swap_fee, days, protocol_fee);
        let apr = swap_fee_apr_bps(daily, total_liquidity).unwrap_or(Decimal::ZERO);

        debug!(pool = %pool.id, days_live = days, daily_fees = %daily, apr = %apr, "Swap fee APR");

        to_bps(apr, "swap fee APR")
    }
}
