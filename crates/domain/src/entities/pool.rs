use crate::entities::same_address;
use crate::enums::PoolType;
use crate::value_objects::price::Price;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A pool snapshot as returned by a pool provider.
///
/// A token whose address equals another pool's address is a holding of that
/// pool's BPT. A token whose address equals this pool's own address is
/// pre-minted BPT and never counts towards liquidity or yield.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pool {
    pub id: String,
    pub address: String,
    pub pool_type: PoolType,
    pub tokens: Vec<PoolToken>,
    pub total_shares: Decimal,

    // Cached subgraph snapshot
    #[serde(default)]
    pub total_swap_fee: Option<Decimal>,
    #[serde(default)]
    pub total_liquidity: Option<Decimal>,
    #[serde(default)]
    pub create_time: Option<u64>,
}

impl Pool {
    pub fn new(
        id: impl Into<String>,
        address: impl Into<String>,
        pool_type: PoolType,
        total_shares: Decimal,
    ) -> Self {
        Self {
            id: id.into(),
            address: address.into(),
            pool_type,
            tokens: Vec::new(),
            total_shares,
            total_swap_fee: None,
            total_liquidity: None,
            create_time: None,
        }
    }

    #[must_use]
    pub fn with_token(mut self, token: PoolToken) -> Self {
        self.tokens.push(token);
        self
    }

    #[must_use]
    pub fn with_total_swap_fee(mut self, total_swap_fee: Decimal) -> Self {
        self.total_swap_fee = Some(total_swap_fee);
        self
    }

    #[must_use]
    pub fn with_total_liquidity(mut self, total_liquidity: Decimal) -> Self {
        self.total_liquidity = Some(total_liquidity);
        self
    }

    #[must_use]
    pub fn with_create_time(mut self, create_time: u64) -> Self {
        self.create_time = Some(create_time);
        self
    }

    /// Returns true if `token` is this pool's own BPT.
    #[must_use]
    pub fn is_own_bpt(&self, token: &PoolToken) -> bool {
        same_address(&token.address, &self.address)
    }

    /// Tokens held by the pool, excluding its own pre-minted BPT.
    pub fn bpt_free_tokens(&self) -> impl Iterator<Item = &PoolToken> {
        self.tokens.iter().filter(|token| !self.is_own_bpt(token))
    }
}

/// One balance slot of a pool.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolToken {
    pub address: String,
    /// Balance in token units (already scaled by `decimals`).
    pub balance: Decimal,
    #[serde(default)]
    pub decimals: u8,
    /// Normalized weight, weighted pools only.
    #[serde(default)]
    pub weight: Option<Decimal>,
    #[serde(default)]
    pub price_rate: Option<Decimal>,
    /// Cached USD price, if the snapshot carries one.
    #[serde(default)]
    pub price: Option<Price>,
    /// Id of the pool whose BPT this token is, when known.
    #[serde(default)]
    pub pool_id: Option<String>,
}

impl PoolToken {
    pub fn new(address: impl Into<String>, balance: Decimal, decimals: u8) -> Self {
        Self {
            address: address.into(),
            balance,
            decimals,
            weight: None,
            price_rate: None,
            price: None,
            pool_id: None,
        }
    }

    #[must_use]
    pub fn with_weight(mut self, weight: Decimal) -> Self {
        self.weight = Some(weight);
        self
    }

    #[must_use]
    pub fn with_price_rate(mut self, price_rate: Decimal) -> Self {
        self.price_rate = Some(price_rate);
        self
    }

    #[must_use]
    pub fn with_price(mut self, usd: Decimal) -> Self {
        self.price = Some(Price::new(usd));
        self
    }

    /// Marks this token as the BPT of the pool with the given id.
    #[must_use]
    pub fn with_pool_id(mut self, pool_id: impl Into<String>) -> Self {
        self.pool_id = Some(pool_id.into());
        self
    }

    /// Price rate, defaulting to one when the snapshot has none.
    #[must_use]
    pub fn price_rate_or_one(&self) -> Decimal {
        self.price_rate.unwrap_or(Decimal::ONE)
    }
}
