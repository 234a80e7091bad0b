//! Pool APR composition.
//!
//! A pool's APR is the sum of independent yield sources, each computed in
//! basis points and rounded on its own before summing:
//!
//! - swap fees earned over the pool lifetime
//! - native yield of the tokens held, weighted by their share of the pool
//! - staking emissions paid to the pool's gauge, at minimum and maximum boost
//! - extra reward tokens streamed through the gauge
//! - protocol fee revenue, paid only to the protocol revenue pool
//!
//! All sources are launched together and read the same instant from the
//! engine's [`Clock`].

mod protocol;
mod rewards;
mod staking;
mod swap_fees;
mod token_aprs;

use crate::clock::{Clock, SystemClock};
use crate::config::AprConfig;
use crate::error::{AnalyticsError, Result};
use crate::liquidity::LiquidityEngine;
use crate::lookup::{Ancestors, descend};
use futures::future::{BoxFuture, FutureExt};
use lp_yield_data::DataProviders;
use lp_yield_domain::{AprBreakdown, Pool, StakingApr, round_bps};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::sync::OnceCell;
use tracing::{info, warn};

/// State shared by the sources of one pool's APR.
struct AprContext<'a> {
    pool: &'a Pool,
    /// Recursion path including `pool`.
    path: Ancestors,
    now: u64,
    liquidity: OnceCell<Decimal>,
}

/// Composes pool APR from its yield sources.
#[derive(Clone)]
pub struct AprEngine {
    providers: DataProviders,
    liquidity: LiquidityEngine,
    config: AprConfig,
    clock: Arc<dyn Clock>,
}

impl AprEngine {
    /// Creates an APR engine reading the system clock.
    #[must_use]
    pub fn new(providers: DataProviders, config: AprConfig) -> Self {
        Self {
            liquidity: LiquidityEngine::new(providers.clone()),
            providers,
            config,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the time source.
    #[must_use]
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// APR breakdown of `pool`, in basis points.
    ///
    /// Absent yield sources count as zero. Missing prices of counted tokens,
    /// a missing liquidity snapshot on the protocol revenue pool and cyclic
    /// pool nesting are errors.
    pub async fn compute_apr(&self, pool: &Pool) -> Result<AprBreakdown> {
        let now = self.clock.now();
        self.apr_of(pool, &Ancestors::new(), now).await
    }

    fn apr_of<'a>(
        &'a self,
        pool: &'a Pool,
        ancestors: &'a Ancestors,
        now: u64,
    ) -> BoxFuture<'a, Result<AprBreakdown>> {
        async move {
            let ctx = AprContext {
                pool,
                path: descend(ancestors, pool)?,
                now,
                liquidity: OnceCell::new(),
            };

            let (swap_fees, token_aprs, staking_min, staking_max, rewards_apr, protocol_apr) =
                tokio::try_join!(
                    self.swap_fees(&ctx),
                    self.token_aprs(&ctx),
                    self.staking_apr(&ctx, Decimal::ONE),
                    self.staking_apr(&ctx, self.config.max_boost),
                    self.rewards_apr(&ctx),
                    self.protocol_apr(&ctx),
                )?;

            let breakdown = AprBreakdown::new(
                swap_fees,
                token_aprs,
                StakingApr {
                    min: staking_min,
                    max: staking_max,
                },
                rewards_apr,
                protocol_apr,
            );

            info!(
                pool = %pool.id,
                swap_fees,
                token_aprs,
                staking_min,
                staking_max,
                rewards_apr,
                protocol_apr,
                min = breakdown.min(),
                max = breakdown.max(),
                "Composed pool APR"
            );

            Ok(breakdown)
        }
        .boxed()
    }

    /// USD liquidity used to weight and annualize yields.
    ///
    /// Prefers the pool's liquidity snapshot and computes it otherwise, at
    /// most once per composition.
    async fn liquidity_baseline(&self, ctx: &AprContext<'_>) -> Result<Decimal> {
        if let Some(total_liquidity) = ctx.pool.total_liquidity {
            return Ok(total_liquidity);
        }
        let liquidity = ctx
            .liquidity
            .get_or_try_init(|| self.liquidity.compute_liquidity_usd(ctx.pool))
            .await?;
        Ok(*liquidity)
    }

    /// USD value of one BPT, `None` when the pool has no shares.
    async fn bpt_price(&self, ctx: &AprContext<'_>) -> Result<Option<Decimal>> {
        let liquidity = self.liquidity_baseline(ctx).await?;
        Ok(liquidity.checked_div(ctx.pool.total_shares))
    }
}

fn to_bps(value: Decimal, source: &'static str) -> Result<i64> {
    round_bps(value).ok_or(AnalyticsError::Overflow(source))
}

/// A yield source whose USD denominator is zero, such as a gauge nobody has
/// staked in yet, earns nothing.
fn zero_denominator(pool: &Pool, source: &'static str) -> i64 {
    warn!(pool = %pool.id, source, "Zero USD denominator, counting APR as zero");
    0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::fixtures::{NOW, providers, providers_with_emissions};
    use async_trait::async_trait;
    use lp_yield_data::{SnapshotRepository, TokenPriceProvider};
    use lp_yield_domain::{LiquidityGauge, PoolToken, PoolType, Price, RewardStream};
    use rust_decimal_macros::dec;
    use std::sync::atomic::{AtomicUsize, Ordering};

    const DAY: u64 = 86_400;

    /// Counts price lookups of one token.
    struct CountingPrices {
        inner: SnapshotRepository,
        token: &'static str,
        lookups: AtomicUsize,
    }

    #[async_trait]
    impl TokenPriceProvider for CountingPrices {
        async fn find_price(&self, address: &str) -> anyhow::Result<Option<Price>> {
            if address == self.token {
                self.lookups.fetch_add(1, Ordering::SeqCst);
            }
            self.inner.find_price(address).await
        }
    }

    fn engine(providers: DataProviders) -> AprEngine {
        AprEngine::new(providers, AprConfig::default()).with_clock(Arc::new(FixedClock(NOW)))
    }

    #[tokio::test]
    async fn test_pool_without_yield_sources_is_zero() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(100))
            .with_token(PoolToken::new("0xa", dec!(100), 18));
        let breakdown = engine(providers(SnapshotRepository::new()))
            .compute_apr(&pool)
            .await
            .unwrap();

        assert_eq!(breakdown, AprBreakdown::default());
    }

    #[tokio::test]
    async fn test_breakdown_combines_sources() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_token(PoolToken::new("0xsteth", dec!(500), 18).with_weight(dec!(0.5)))
            .with_token(PoolToken::new("0xweth", dec!(500), 18).with_weight(dec!(0.5)))
            .with_total_swap_fee(dec!(1000))
            .with_total_liquidity(dec!(1000000))
            .with_create_time(NOW - DAY);
        let config = AprConfig::default();
        let gauge = LiquidityGauge::new("0xpool", dec!(999.6), dec!(1000), dec!(0.001))
            .with_reward("0xrwd", RewardStream::new(1_000_000_000_000u64, NOW + DAY));
        let repository = SnapshotRepository::new()
            .with_token_yield("0xsteth", dec!(400))
            .with_gauge(gauge)
            .with_price(&config.emission_token, dec!(5))
            .with_price("0xrwd", dec!(100000));

        let breakdown = engine(providers_with_emissions(repository, dec!(1000000)))
            .compute_apr(&pool)
            .await
            .unwrap();

        // 1000 fees a day on 1M liquidity.
        assert_eq!(breakdown.swap_fees(), 3650);
        assert_eq!(breakdown.token_aprs(), 200);
        assert_eq!(breakdown.staking_apr(), StakingApr { min: 20, max: 50 });
        // 31.536 tokens a year at $100k on 1000 BPT worth $1000 each.
        assert_eq!(breakdown.rewards_apr(), 31536);
        assert_eq!(breakdown.protocol_apr(), 0);
        assert_eq!(breakdown.min(), 3650 + 200 + 20 + 31536);
        assert_eq!(breakdown.max(), 3650 + 200 + 50 + 31536);
    }

    #[tokio::test]
    async fn test_cyclic_nesting_fails() {
        let a = Pool::new("0xpool-a", "0xa0", PoolType::Weighted, dec!(1))
            .with_token(PoolToken::new("0xb0", dec!(1), 18).with_weight(dec!(1)))
            .with_total_liquidity(dec!(1));
        let b = Pool::new("0xpool-b", "0xb0", PoolType::Weighted, dec!(1))
            .with_token(PoolToken::new("0xa0", dec!(1), 18).with_weight(dec!(1)))
            .with_total_liquidity(dec!(1));
        let repository = SnapshotRepository::new().with_pool(a.clone()).with_pool(b);

        let err = engine(providers(repository)).compute_apr(&a).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::CyclicPoolReference { pool_id } if pool_id == "0xpool-a"));
    }

    #[tokio::test]
    async fn test_bpt_price_without_shares_is_none() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, Decimal::ZERO)
            .with_total_liquidity(dec!(100));
        let engine = engine(providers(SnapshotRepository::new()));
        let ctx = AprContext {
            pool: &pool,
            path: Ancestors::new(),
            now: NOW,
            liquidity: OnceCell::new(),
        };

        assert_eq!(engine.bpt_price(&ctx).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_liquidity_baseline_falls_back_to_valuation() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(10))
            .with_token(PoolToken::new("0xa", dec!(100), 18));
        let engine = engine(providers(SnapshotRepository::new().with_price("0xa", dec!(3))));
        let ctx = AprContext {
            pool: &pool,
            path: Ancestors::new(),
            now: NOW,
            liquidity: OnceCell::new(),
        };

        assert_eq!(engine.liquidity_baseline(&ctx).await.unwrap(), dec!(300));
        assert_eq!(engine.bpt_price(&ctx).await.unwrap(), Some(dec!(30)));
    }

    #[tokio::test]
    async fn test_liquidity_baseline_is_computed_once() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_token(PoolToken::new("0xweth", dec!(1000), 18));
        let gauge = LiquidityGauge::new("0xpool", dec!(999.6), dec!(1000), dec!(0.001))
            .with_reward("0xrwd", RewardStream::new(1_000_000_000_000u64, NOW + DAY));
        let repository = SnapshotRepository::new()
            .with_gauge(gauge)
            .with_price(&AprConfig::default().emission_token, dec!(5))
            .with_price("0xweth", dec!(1000))
            .with_price("0xrwd", dec!(100000));
        let prices = Arc::new(CountingPrices {
            inner: repository.clone(),
            token: "0xweth",
            lookups: AtomicUsize::new(0),
        });
        let engine =
            engine(providers_with_emissions(repository, dec!(1000000)).with_prices(prices.clone()));

        let breakdown = engine.compute_apr(&pool).await.unwrap();
        assert_eq!(breakdown.staking_apr(), StakingApr { min: 20, max: 50 });
        assert_eq!(breakdown.rewards_apr(), 31536);
        // Both staking boosts and the rewards share one valuation.
        assert_eq!(prices.lookups.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_to_bps_rounds_half_away_from_zero() {
        assert_eq!(to_bps(dec!(20.5), "test").unwrap(), 21);
        assert_eq!(to_bps(dec!(20.49), "test").unwrap(), 20);
        assert!(matches!(
            to_bps(Decimal::MAX, "test"),
            Err(AnalyticsError::Overflow("test"))
        ));
    }
}
