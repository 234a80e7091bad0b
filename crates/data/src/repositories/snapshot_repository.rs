//! Snapshot repository serving every provider from memory.

use crate::providers::{
    FeeDistributorProvider, GaugeProvider, PoolProvider, ProtocolFeeProvider, TokenMetaProvider,
    TokenPriceProvider, TokenYieldProvider,
};
use anyhow::{Context, Result, anyhow};
use async_trait::async_trait;
use lp_yield_domain::{LiquidityGauge, Pool, Price, ProtocolRevenue, TokenMeta};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;
use tracing::debug;

/// Serialized form of a data snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    #[serde(default)]
    pub pools: Vec<Pool>,
    /// USD prices keyed by token address.
    #[serde(default)]
    pub prices: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub tokens: Vec<TokenMeta>,
    #[serde(default)]
    pub gauges: Vec<LiquidityGauge>,
    /// Native token yields in basis points, keyed by token address.
    #[serde(default)]
    pub token_yields: BTreeMap<String, Decimal>,
    #[serde(default)]
    pub protocol_fee_percentage: Decimal,
    #[serde(default)]
    pub fee_distribution: Option<FeeDistribution>,
}

/// Tokens paid out by the fee distributor last week.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeeDistribution {
    pub bal_token: String,
    pub bal_amount: Decimal,
    pub stable_token: String,
    pub stable_amount: Decimal,
    pub ve_supply: Decimal,
}

/// In-memory repository indexed by lowercase address and id.
#[derive(Debug, Clone, Default)]
pub struct SnapshotRepository {
    pools: HashMap<String, Pool>,
    pool_ids_by_address: HashMap<String, String>,
    prices: HashMap<String, Price>,
    tokens: HashMap<String, TokenMeta>,
    gauges: HashMap<String, LiquidityGauge>,
    token_yields: HashMap<String, Decimal>,
    protocol_fee_percentage: Decimal,
    fee_distribution: Option<FeeDistribution>,
}

fn key(value: &str) -> String {
    value.to_ascii_lowercase()
}

impl SnapshotRepository {
    /// Creates an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Indexes a deserialized snapshot.
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut repository = Self::new().with_protocol_fee_percentage(snapshot.protocol_fee_percentage);
        repository.fee_distribution = snapshot.fee_distribution;

        for pool in snapshot.pools {
            repository = repository.with_pool(pool);
        }
        for (address, usd) in snapshot.prices {
            repository = repository.with_price(&address, usd);
        }
        for token in snapshot.tokens {
            repository = repository.with_token(token);
        }
        for gauge in snapshot.gauges {
            repository = repository.with_gauge(gauge);
        }
        for (address, bps) in snapshot.token_yields {
            repository = repository.with_token_yield(&address, bps);
        }
        repository
    }

    /// Parses a JSON snapshot.
    ///
    /// # Errors
    /// Returns an error if the JSON does not match the snapshot format.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Snapshot = serde_json::from_str(json).context("invalid snapshot JSON")?;
        Ok(Self::from_snapshot(snapshot))
    }

    /// Loads a JSON snapshot file.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or parsed.
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("failed to read snapshot {}", path.display()))?;
        let repository = Self::from_json(&json)?;
        debug!(
            path = %path.display(),
            pools = repository.pools.len(),
            prices = repository.prices.len(),
            gauges = repository.gauges.len(),
            "Loaded snapshot"
        );
        Ok(repository)
    }

    #[must_use]
    pub fn with_pool(mut self, pool: Pool) -> Self {
        self.pool_ids_by_address
            .insert(key(&pool.address), key(&pool.id));
        self.pools.insert(key(&pool.id), pool);
        self
    }

    #[must_use]
    pub fn with_price(mut self, address: &str, usd: Decimal) -> Self {
        self.prices.insert(key(address), Price::new(usd));
        self
    }

    #[must_use]
    pub fn with_token(mut self, token: TokenMeta) -> Self {
        self.tokens.insert(key(&token.address), token);
        self
    }

    #[must_use]
    pub fn with_gauge(mut self, gauge: LiquidityGauge) -> Self {
        self.gauges.insert(key(&gauge.pool_id), gauge);
        self
    }

    #[must_use]
    pub fn with_token_yield(mut self, address: &str, bps: Decimal) -> Self {
        self.token_yields.insert(key(address), bps);
        self
    }

    #[must_use]
    pub fn with_protocol_fee_percentage(mut self, fee: Decimal) -> Self {
        self.protocol_fee_percentage = fee;
        self
    }

    #[must_use]
    pub fn with_fee_distribution(mut self, distribution: FeeDistribution) -> Self {
        self.fee_distribution = Some(distribution);
        self
    }

    fn usd_price(&self, address: &str) -> Result<Decimal> {
        self.prices
            .get(&key(address))
            .map(|price| price.usd)
            .ok_or_else(|| anyhow!("No USD price for {address}"))
    }
}

#[async_trait]
impl PoolProvider for SnapshotRepository {
    async fn find_pool(&self, id: &str) -> Result<Option<Pool>> {
        Ok(self.pools.get(&key(id)).cloned())
    }

    async fn find_pool_by_address(&self, address: &str) -> Result<Option<Pool>> {
        Ok(self
            .pool_ids_by_address
            .get(&key(address))
            .and_then(|id| self.pools.get(id))
            .cloned())
    }
}

#[async_trait]
impl TokenPriceProvider for SnapshotRepository {
    async fn find_price(&self, address: &str) -> Result<Option<Price>> {
        Ok(self.prices.get(&key(address)).copied())
    }
}

#[async_trait]
impl TokenMetaProvider for SnapshotRepository {
    async fn find_token_meta(&self, address: &str) -> Result<Option<TokenMeta>> {
        Ok(self.tokens.get(&key(address)).cloned())
    }
}

#[async_trait]
impl TokenYieldProvider for SnapshotRepository {
    async fn find_token_yield(&self, address: &str) -> Result<Option<Decimal>> {
        Ok(self.token_yields.get(&key(address)).copied())
    }
}

#[async_trait]
impl GaugeProvider for SnapshotRepository {
    async fn find_gauge(&self, pool_id: &str) -> Result<Option<LiquidityGauge>> {
        Ok(self.gauges.get(&key(pool_id)).cloned())
    }
}

#[async_trait]
impl ProtocolFeeProvider for SnapshotRepository {
    async fn find_protocol_fee_percentage(&self) -> Result<Decimal> {
        Ok(self.protocol_fee_percentage)
    }
}

#[async_trait]
impl FeeDistributorProvider for SnapshotRepository {
    async fn find_last_week_protocol_revenue(&self) -> Result<ProtocolRevenue> {
        let distribution = self
            .fee_distribution
            .as_ref()
            .ok_or_else(|| anyhow!("Snapshot has no fee distribution"))?;

        let bal_price = self.usd_price(&distribution.bal_token)?;
        let stable_price = self.usd_price(&distribution.stable_token)?;

        Ok(ProtocolRevenue {
            bal_revenue: distribution.bal_amount * bal_price,
            stable_revenue: distribution.stable_amount * stable_price,
            ve_supply: distribution.ve_supply,
        })
    }
}
