use super::{AprContext, AprEngine, to_bps};
use crate::error::{AnalyticsError, Result};
use crate::lookup::{NestedPool, find_nested_pool, resolve_token_price};
use futures::future::try_join_all;
use lp_yield_domain::PoolToken;
use rust_decimal::Decimal;
use tracing::{debug, warn};

impl AprEngine {
    /// APR from yield-bearing tokens held by the pool.
    ///
    /// Each token contributes its own yield, or the minimum APR of the pool
    /// it is the BPT of, scaled by its share of the pool.
    pub(super) async fn token_aprs(&self, ctx: &AprContext<'_>) -> Result<i64> {
        let weighted = try_join_all(
            ctx.pool
                .bpt_free_tokens()
                .map(|token| self.weighted_token_apr(ctx, token)),
        )
        .await?;

        Ok(weighted.into_iter().sum())
    }

    async fn weighted_token_apr(&self, ctx: &AprContext<'_>, token: &PoolToken) -> Result<i64> {
        let apr = self.token_apr(ctx, token).await?;
        if apr.is_zero() {
            return Ok(0);
        }
        let weight = self.token_weight(ctx, token).await?;

        debug!(pool = %ctx.pool.id, token = %token.address, apr = %apr, weight = %weight, "Token APR");

        to_bps(apr * weight, "token APR")
    }

    async fn token_apr(&self, ctx: &AprContext<'_>, token: &PoolToken) -> Result<Decimal> {
        if let Some(token_yield) = self
            .providers
            .token_yields
            .find_token_yield(&token.address)
            .await?
        {
            return Ok(token_yield);
        }

        match find_nested_pool(self.providers.pools.as_ref(), token).await? {
            // Only the conservative bound of the nested pool propagates.
            NestedPool::Found(nested) => {
                let breakdown = self.apr_of(&nested, &ctx.path, ctx.now).await?;
                Ok(Decimal::from(breakdown.min()))
            }
            NestedPool::Missing(pool_id) => {
                warn!(
                    token = %token.address,
                    pool = %pool_id,
                    "Nested pool not found, counting its APR as zero"
                );
                Ok(Decimal::ZERO)
            }
            NestedPool::NotAPool => Ok(Decimal::ZERO),
        }
    }

    /// Share of pool value held in `token`, zero in an empty pool.
    async fn token_weight(&self, ctx: &AprContext<'_>, token: &PoolToken) -> Result<Decimal> {
        if let Some(weight) = token.weight {
            return Ok(weight);
        }
        let (price, liquidity) = tokio::try_join!(
            resolve_token_price(self.providers.prices.as_ref(), token),
            self.liquidity_baseline(ctx),
        )?;
        if liquidity.is_zero() {
            warn!(
                pool = %ctx.pool.id,
                token = %token.address,
                "Pool has no liquidity, token weight is zero"
            );
            return Ok(Decimal::ZERO);
        }
        price
            .value_of(token.balance)
            .checked_div(liquidity)
            .ok_or(AnalyticsError::Overflow("token weight"))
    }
}
