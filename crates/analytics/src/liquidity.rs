//! Recursive USD valuation of pool liquidity.
//!
//! A pool's liquidity is the value of the tokens it holds directly, combined
//! by its pool type strategy, plus the value of any BPT of other pools it
//! holds. Nested BPT is valued per share from the nested pool's own
//! liquidity, recursively.

use crate::error::{AnalyticsError, Result};
use crate::lookup::{Ancestors, NestedPool, descend, find_nested_pool, resolve_token_price};
use crate::strategy::{LiquidityStrategy, PricedPoolToken};
use futures::future::{BoxFuture, FutureExt, try_join_all};
use lp_yield_data::DataProviders;
use lp_yield_domain::{Pool, PoolToken};
use rust_decimal::Decimal;
use tracing::{debug, warn};

/// How one pool token contributes to its pool's liquidity.
enum Holding {
    /// BPT of a nested pool, valued in USD.
    Nested(Decimal),
    /// BPT of a pool that cannot be found; worth nothing.
    Unresolved,
    /// A plain token, valued by the pool type strategy.
    Direct(PricedPoolToken),
}

/// Computes total pool liquidity in USD.
#[derive(Clone)]
pub struct LiquidityEngine {
    providers: DataProviders,
}

impl LiquidityEngine {
    /// Creates a new liquidity engine.
    #[must_use]
    pub fn new(providers: DataProviders) -> Self {
        Self { providers }
    }

    /// Total USD liquidity of `pool`, including nested pool holdings.
    ///
    /// # Errors
    /// Returns `MissingPrice` if a directly held token has no price,
    /// `MissingLiquidity` if a nested pool has no BPT supply and
    /// `CyclicPoolReference` if the pool holds its own BPT through nesting.
    pub async fn compute_liquidity_usd(&self, pool: &Pool) -> Result<Decimal> {
        self.liquidity_of(pool, &Ancestors::new()).await
    }

    fn liquidity_of<'a>(
        &'a self,
        pool: &'a Pool,
        ancestors: &'a Ancestors,
    ) -> BoxFuture<'a, Result<Decimal>> {
        async move {
            let path = descend(ancestors, pool)?;

            let holdings = try_join_all(
                pool.bpt_free_tokens()
                    .map(|token| self.resolve_holding(token, &path)),
            )
            .await?;

            let mut nested_liquidity = Decimal::ZERO;
            let mut priced_tokens = Vec::with_capacity(holdings.len());
            for holding in holdings {
                match holding {
                    Holding::Nested(liquidity) => nested_liquidity += liquidity,
                    Holding::Unresolved => {}
                    Holding::Direct(token) => priced_tokens.push(token),
                }
            }

            let token_liquidity =
                LiquidityStrategy::for_pool_type(pool.pool_type).calc_total(&priced_tokens);
            let total = nested_liquidity + token_liquidity;

            debug!(
                pool = %pool.id,
                pool_type = %pool.pool_type,
                nested_liquidity = %nested_liquidity,
                token_liquidity = %token_liquidity,
                total = %total,
                "Computed pool liquidity"
            );

            Ok(total)
        }
        .boxed()
    }

    async fn resolve_holding(&self, token: &PoolToken, path: &Ancestors) -> Result<Holding> {
        match find_nested_pool(self.providers.pools.as_ref(), token).await? {
            NestedPool::Found(nested) => {
                let liquidity = self.liquidity_of(&nested, path).await?;
                let bpt_value = liquidity.checked_div(nested.total_shares).ok_or_else(|| {
                    AnalyticsError::MissingLiquidity {
                        pool_id: nested.id.clone(),
                        reason: "pool has no BPT supply",
                    }
                })?;
                let value = bpt_value * token.balance;

                debug!(
                    pool = %nested.id,
                    total_shares = %nested.total_shares,
                    bpt_value = %bpt_value,
                    bpt_held = %token.balance,
                    "Valued nested pool holding"
                );

                Ok(Holding::Nested(value))
            }
            NestedPool::Missing(pool_id) => {
                warn!(
                    token = %token.address,
                    pool = %pool_id,
                    "Nested pool not found, counting its BPT as zero"
                );
                Ok(Holding::Unresolved)
            }
            NestedPool::NotAPool => {
                let price = resolve_token_price(self.providers.prices.as_ref(), token).await?;
                Ok(Holding::Direct(PricedPoolToken::new(token, price)))
            }
        }
    }
}
