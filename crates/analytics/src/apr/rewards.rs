use super::{AprContext, AprEngine, to_bps, zero_denominator};
use crate::error::{AnalyticsError, Result};
use futures::future::try_join_all;
use lp_yield_domain::value_objects::percentage::BPS_PER_UNIT;
use lp_yield_domain::{Amount, RewardStream};
use rust_decimal::Decimal;
use tracing::debug;

/// Decimals assumed for reward tokens without metadata.
const DEFAULT_REWARD_DECIMALS: u8 = 18;

impl AprEngine {
    /// APR from reward tokens streamed through the pool's gauge.
    ///
    /// Streams whose period has finished pay nothing and are not priced.
    pub(super) async fn rewards_apr(&self, ctx: &AprContext<'_>) -> Result<i64> {
        let Some(gauge) = self.providers.gauges.find_gauge(&ctx.pool.id).await? else {
            return Ok(0);
        };

        let active: Vec<_> = gauge
            .reward_tokens
            .iter()
            .filter(|(_, stream)| stream.is_active_at(ctx.now))
            .collect();
        if active.is_empty() {
            return Ok(0);
        }

        let (yearly_rewards, bpt_price) = tokio::try_join!(
            try_join_all(
                active
                    .iter()
                    .map(|(token, stream)| self.yearly_reward_usd(token, stream))
            ),
            self.bpt_price(ctx),
        )?;

        let total_supply_usd = bpt_price
            .map(|bpt_price| gauge.total_supply * bpt_price)
            .unwrap_or_default();
        if total_supply_usd.is_zero() {
            return Ok(zero_denominator(ctx.pool, "rewards APR"));
        }
        let mut total = Decimal::ZERO;
        for reward in yearly_rewards {
            total += reward
                .checked_div(total_supply_usd)
                .ok_or(AnalyticsError::Overflow("rewards APR"))?;
        }

        debug!(
            pool = %ctx.pool.id,
            active_streams = active.len(),
            total_supply_usd = %total_supply_usd,
            "Rewards APR"
        );

        to_bps(BPS_PER_UNIT * total, "rewards APR")
    }

    async fn yearly_reward_usd(&self, token: &str, stream: &RewardStream) -> Result<Decimal> {
        let price = self
            .providers
            .prices
            .find_price(token)
            .await?
            .ok_or_else(|| AnalyticsError::MissingPrice {
                token: token.to_string(),
            })?;
        let decimals = self
            .providers
            .token_meta
            .find_token_meta(token)
            .await?
            .map_or(DEFAULT_REWARD_DECIMALS, |meta| meta.decimals);

        let yearly = stream
            .yearly_amount()
            .ok_or(AnalyticsError::Overflow("yearly reward"))?;
        let amount = Amount::new(yearly, decimals)
            .to_decimal()
            .ok_or(AnalyticsError::Overflow("yearly reward"))?;

        Ok(price.value_of(amount))
    }
}
