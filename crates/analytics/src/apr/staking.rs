use super::{AprContext, AprEngine, to_bps, zero_denominator};
use crate::error::{AnalyticsError, Result};
use futures::TryFutureExt;
use lp_yield_domain::entities::gauge::SECONDS_PER_YEAR;
use lp_yield_domain::value_objects::percentage::BPS_PER_UNIT;
use rust_decimal::Decimal;
use tracing::debug;

impl AprEngine {
    /// APR from protocol emissions paid to the pool's gauge, at `boost`.
    ///
    /// Projects one year of emissions from now. Only the baseline share of
    /// staked BPT accrues emissions without boost, so the gauge's effective
    /// supply is `(working_supply + baseline) / baseline`.
    pub(super) async fn staking_apr(&self, ctx: &AprContext<'_>, boost: Decimal) -> Result<i64> {
        let Some(gauge) = self.providers.gauges.find_gauge(&ctx.pool.id).await? else {
            return Ok(0);
        };

        let (emission_price, bpt_price, emissions) = tokio::try_join!(
            self.providers
                .prices
                .find_price(&self.config.emission_token)
                .map_err(AnalyticsError::from),
            self.bpt_price(ctx),
            self.providers
                .emissions
                .find_emissions_between(ctx.now, ctx.now.saturating_add(SECONDS_PER_YEAR))
                .map_err(AnalyticsError::from),
        )?;
        // An unpriced emission token earns nothing.
        let emission_price = emission_price.map(|price| price.usd).unwrap_or_default();

        let gauge_emissions_usd = emissions * gauge.relative_weight * emission_price;
        let baseline = self.config.working_supply_baseline;
        let gauge_supply = (gauge.working_supply + baseline)
            .checked_div(baseline)
            .ok_or(AnalyticsError::DivisionByZero("gauge supply"))?;
        let staked_usd = bpt_price.map(|bpt_price| gauge_supply * bpt_price).unwrap_or_default();
        if staked_usd.is_zero() {
            return Ok(zero_denominator(ctx.pool, "staking APR"));
        }
        let apr = (boost * BPS_PER_UNIT * gauge_emissions_usd)
            .checked_div(staked_usd)
            .ok_or(AnalyticsError::Overflow("staking APR"))?;

        debug!(
            pool = %ctx.pool.id,
            boost = %boost,
            emissions_usd = %gauge_emissions_usd,
            gauge_supply = %gauge_supply,
            staked_usd = %staked_usd,
            apr = %apr,
            "Staking APR"
        );

        to_bps(apr, "staking APR")
    }
}

#[cfg(test)]
mod tests {
    use crate::apr::AprEngine;
    use crate::clock::FixedClock;
    use crate::config::AprConfig;
    use crate::error::AnalyticsError;
    use crate::fixtures::{NOW, providers, providers_with_emissions};
    use lp_yield_data::SnapshotRepository;
    use lp_yield_domain::{LiquidityGauge, Pool, PoolToken, PoolType, StakingApr};
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    const BAL: &str = "0xba100000625a3754423978a60c9317c58a424e3d";

    fn gauge() -> LiquidityGauge {
        LiquidityGauge::new("0xpool", dec!(999.6), dec!(1000), dec!(0.001))
    }

    fn engine(repository: SnapshotRepository, emissions: Decimal) -> AprEngine {
        AprEngine::new(
            providers_with_emissions(repository, emissions),
            AprConfig::default(),
        )
        .with_clock(Arc::new(FixedClock(NOW)))
    }

    #[tokio::test]
    async fn test_min_and_max_boost() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_total_liquidity(dec!(1000000));
        let repository = SnapshotRepository::new()
            .with_gauge(gauge())
            .with_price(BAL, dec!(5));

        let breakdown = engine(repository, dec!(1000000))
            .compute_apr(&pool)
            .await
            .unwrap();
        assert_eq!(breakdown.staking_apr(), StakingApr { min: 20, max: 50 });
    }

    #[tokio::test]
    async fn test_bpt_price_from_computed_liquidity() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_token(PoolToken::new("0xweth", dec!(500), 18))
            .with_token(PoolToken::new("0xwbtc", dec!(25), 8));
        let repository = SnapshotRepository::new()
            .with_gauge(gauge())
            .with_price(BAL, dec!(5))
            .with_price("0xweth", dec!(1000))
            .with_price("0xwbtc", dec!(20000));

        let breakdown = engine(repository, dec!(1000000))
            .compute_apr(&pool)
            .await
            .unwrap();
        assert_eq!(breakdown.staking_apr(), StakingApr { min: 20, max: 50 });
    }

    #[tokio::test]
    async fn test_unpriced_emission_token_is_zero() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_total_liquidity(dec!(1000000));
        let repository = SnapshotRepository::new().with_gauge(gauge());

        let breakdown = engine(repository, dec!(1000000))
            .compute_apr(&pool)
            .await
            .unwrap();
        assert_eq!(breakdown.staking_apr(), StakingApr::default());
    }

    #[tokio::test]
    async fn test_max_boost_is_configurable() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_total_liquidity(dec!(1000000));
        let repository = SnapshotRepository::new()
            .with_gauge(gauge())
            .with_price(BAL, dec!(5));
        let engine = AprEngine::new(
            providers_with_emissions(repository, dec!(1000000)),
            AprConfig::default().with_max_boost(dec!(2)),
        )
        .with_clock(Arc::new(FixedClock(NOW)));

        let breakdown = engine.compute_apr(&pool).await.unwrap();
        assert_eq!(breakdown.staking_apr(), StakingApr { min: 20, max: 40 });
    }

    #[tokio::test]
    async fn test_custom_emission_token_and_baseline() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_total_liquidity(dec!(1000000));
        let repository = SnapshotRepository::new()
            .with_gauge(gauge())
            .with_price("0xgov", dec!(5));
        let config = AprConfig::default()
            .with_emission_token("0xgov")
            .with_working_supply_baseline(dec!(0.2));
        let engine = AprEngine::new(providers_with_emissions(repository, dec!(1000000)), config)
            .with_clock(Arc::new(FixedClock(NOW)));

        // Effective gauge supply grows to 4999 with the smaller baseline.
        let breakdown = engine.compute_apr(&pool).await.unwrap();
        assert_eq!(breakdown.staking_apr(), StakingApr { min: 10, max: 25 });
    }

    #[tokio::test]
    async fn test_scheduled_emissions() {
        // 145000 a week during the first epoch, reduced once a year later.
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_total_liquidity(dec!(1000000));
        let repository = SnapshotRepository::new()
            .with_gauge(gauge())
            .with_price(BAL, dec!(5));
        let engine = AprEngine::new(providers(repository), AprConfig::default())
            .with_clock(Arc::new(FixedClock(1_648_465_251)));

        let staking = engine.compute_apr(&pool).await.unwrap().staking_apr();
        assert!(staking.min > 0);
        assert!(staking.max >= staking.min);
    }

    #[tokio::test]
    async fn test_far_future_clock() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_total_liquidity(dec!(1000000));
        let repository = SnapshotRepository::new()
            .with_gauge(gauge())
            .with_price(BAL, dec!(5));
        let engine = AprEngine::new(providers(repository), AprConfig::default())
            .with_clock(Arc::new(FixedClock(u64::MAX)));

        let staking = engine.compute_apr(&pool).await.unwrap().staking_apr();
        assert_eq!(staking, StakingApr::default());
    }

    #[tokio::test]
    async fn test_pool_without_liquidity_is_zero() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_total_liquidity(Decimal::ZERO);
        let repository = SnapshotRepository::new()
            .with_gauge(gauge())
            .with_price(BAL, dec!(5));

        let breakdown = engine(repository, dec!(1000000))
            .compute_apr(&pool)
            .await
            .unwrap();
        assert_eq!(breakdown.staking_apr(), StakingApr::default());
    }

    #[tokio::test]
    async fn test_pool_without_shares_is_zero() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, Decimal::ZERO)
            .with_total_liquidity(dec!(1000000));
        let repository = SnapshotRepository::new()
            .with_gauge(gauge())
            .with_price(BAL, dec!(5));

        let breakdown = engine(repository, dec!(1000000))
            .compute_apr(&pool)
            .await
            .unwrap();
        assert_eq!(breakdown.staking_apr(), StakingApr::default());
    }

    #[tokio::test]
    async fn test_zero_baseline_is_rejected() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_total_liquidity(dec!(1000000));
        let repository = SnapshotRepository::new()
            .with_gauge(gauge())
            .with_price(BAL, dec!(5));
        let engine = AprEngine::new(
            providers_with_emissions(repository, dec!(1000000)),
            AprConfig::default().with_working_supply_baseline(Decimal::ZERO),
        )
        .with_clock(Arc::new(FixedClock(NOW)));

        let err = engine.compute_apr(&pool).await.unwrap_err();
        assert!(matches!(err, AnalyticsError::DivisionByZero("gauge supply")));
    }

    #[tokio::test]
    async fn test_no_gauge_is_zero() {
        let pool = Pool::new("0xpool", "0xp0", PoolType::Weighted, dec!(1000))
            .with_total_liquidity(dec!(1000000));
        let breakdown = engine(SnapshotRepository::new(), dec!(1000000))
            .compute_apr(&pool)
            .await
            .unwrap();

        assert_eq!(breakdown.staking_apr(), StakingApr { min: 0, max: 0 });
        assert_eq!(breakdown.rewards_apr(), 0);
    }
}
