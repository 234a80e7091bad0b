use super::{AprContext, AprEngine, to_bps, zero_denominator};
use crate::error::{AnalyticsError, Result};
use lp_yield_domain::entities::same_address;
use lp_yield_domain::metrics::annualize;
use lp_yield_domain::value_objects::percentage::BPS_PER_UNIT;
use tracing::debug;

const DAYS_PER_WEEK: u32 = 7;

impl AprEngine {
    /// APR from protocol fee revenue, paid to vote-escrow lockers of the
    /// protocol revenue pool. Zero for every other pool.
    pub(super) async fn protocol_apr(&self, ctx: &AprContext<'_>) -> Result<i64> {
        let pool = ctx.pool;
        if !same_address(&pool.id, &self.config.protocol_revenue_pool_id) {
            return Ok(0);
        }

        let total_liquidity =
            pool.total_liquidity
                .ok_or_else(|| AnalyticsError::MissingLiquidityBaseline {
                    pool_id: pool.id.clone(),
                })?;
        let bpt_price = total_liquidity
            .checked_div(pool.total_shares)
            .unwrap_or_default();

        let revenue = self
            .providers
            .fee_distributor
            .find_last_week_protocol_revenue()
            .await?;
        let locked_usd = bpt_price * revenue.ve_supply;
        if locked_usd.is_zero() {
            return Ok(zero_denominator(pool, "protocol APR"));
        }
        let yearly_revenue = annualize(revenue.weekly_total(), DAYS_PER_WEEK)
            .ok_or(AnalyticsError::DivisionByZero("yearly revenue"))?;
        let apr = (BPS_PER_UNIT * yearly_revenue)
            .checked_div(locked_usd)
            .ok_or(AnalyticsError::Overflow("protocol APR"))?;

        debug!(
            pool = %pool.id,
            weekly_revenue = %revenue.weekly_total(),
            ve_supply = %revenue.ve_supply,
            bpt_price = %bpt_price,
            apr = %apr,
            "Protocol revenue APR"
        );

        to_bps(apr, "protocol APR")
    }
}
