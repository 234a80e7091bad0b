//! Lookup traits consumed by the analytics engines.
//!
//! Every lookup is an independent read. Absent records are `Ok(None)`;
//! `Err` is reserved for transport or decoding failures.

use crate::emissions::EmissionSchedule;
use crate::repositories::SnapshotRepository;
use anyhow::Result;
use async_trait::async_trait;
use lp_yield_domain::{LiquidityGauge, Pool, Price, ProtocolRevenue, TokenMeta};
use rust_decimal::Decimal;
use std::sync::Arc;

/// Resolves pools by id or by BPT address.
#[async_trait]
pub trait PoolProvider: Send + Sync {
    async fn find_pool(&self, id: &str) -> Result<Option<Pool>>;
    async fn find_pool_by_address(&self, address: &str) -> Result<Option<Pool>>;
}

/// Resolves USD token prices.
#[async_trait]
pub trait TokenPriceProvider: Send + Sync {
    async fn find_price(&self, address: &str) -> Result<Option<Price>>;
}

/// Resolves token metadata.
#[async_trait]
pub trait TokenMetaProvider: Send + Sync {
    async fn find_token_meta(&self, address: &str) -> Result<Option<TokenMeta>>;
}

/// Resolves native yield of yield-bearing tokens, in basis points.
#[async_trait]
pub trait TokenYieldProvider: Send + Sync {
    async fn find_token_yield(&self, address: &str) -> Result<Option<Decimal>>;
}

/// Resolves the liquidity gauge staking a pool's BPT.
#[async_trait]
pub trait GaugeProvider: Send + Sync {
    async fn find_gauge(&self, pool_id: &str) -> Result<Option<LiquidityGauge>>;
}

/// Resolves the protocol's cut of swap fees, as a fraction.
#[async_trait]
pub trait ProtocolFeeProvider: Send + Sync {
    async fn find_protocol_fee_percentage(&self) -> Result<Decimal>;
}

/// Resolves global protocol emissions between two UNIX timestamps.
#[async_trait]
pub trait EmissionsProvider: Send + Sync {
    async fn find_emissions_between(&self, from: u64, to: u64) -> Result<Decimal>;
}

/// Resolves last week's protocol revenue from the fee distributor.
#[async_trait]
pub trait FeeDistributorProvider: Send + Sync {
    async fn find_last_week_protocol_revenue(&self) -> Result<ProtocolRevenue>;
}

/// The full set of providers the analytics engines read from.
#[derive(Clone)]
pub struct DataProviders {
    pub pools: Arc<dyn PoolProvider>,
    pub prices: Arc<dyn TokenPriceProvider>,
    pub token_meta: Arc<dyn TokenMetaProvider>,
    pub token_yields: Arc<dyn TokenYieldProvider>,
    pub gauges: Arc<dyn GaugeProvider>,
    pub protocol_fees: Arc<dyn ProtocolFeeProvider>,
    pub emissions: Arc<dyn EmissionsProvider>,
    pub fee_distributor: Arc<dyn FeeDistributorProvider>,
}

impl DataProviders {
    /// Serves every lookup from one snapshot, with emissions from `schedule`.
    #[must_use]
    pub fn from_snapshot(repository: SnapshotRepository, schedule: EmissionSchedule) -> Self {
        let repository = Arc::new(repository);
        Self {
            pools: repository.clone(),
            prices: repository.clone(),
            token_meta: repository.clone(),
            token_yields: repository.clone(),
            gauges: repository.clone(),
            protocol_fees: repository.clone(),
            emissions: Arc::new(schedule),
            fee_distributor: repository,
        }
    }

    /// Replaces the emissions provider.
    #[must_use]
    pub fn with_emissions(mut self, emissions: Arc<dyn EmissionsProvider>) -> Self {
        self.emissions = emissions;
        self
    }

    /// Replaces the price provider.
    #[must_use]
    pub fn with_prices(mut self, prices: Arc<dyn TokenPriceProvider>) -> Self {
        self.prices = prices;
        self
    }
}
