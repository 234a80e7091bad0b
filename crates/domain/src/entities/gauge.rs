use primitive_types::U256;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Seconds in the 365 day year used for annualization.
pub const SECONDS_PER_YEAR: u64 = 365 * 86_400;

/// Staking gauge for a pool's BPT.
///
/// `working_supply` is the emission-weighted effective stake, `total_supply`
/// the BPT deposited, `relative_weight` the gauge's share of the global
/// emission schedule in `[0, 1]`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiquidityGauge {
    #[serde(default)]
    pub id: String,
    pub pool_id: String,
    pub working_supply: Decimal,
    pub total_supply: Decimal,
    pub relative_weight: Decimal,
    /// Reward streams keyed by reward token address.
    #[serde(default)]
    pub reward_tokens: BTreeMap<String, RewardStream>,
}

impl LiquidityGauge {
    pub fn new(
        pool_id: impl Into<String>,
        working_supply: Decimal,
        total_supply: Decimal,
        relative_weight: Decimal,
    ) -> Self {
        Self {
            id: String::new(),
            pool_id: pool_id.into(),
            working_supply,
            total_supply,
            relative_weight,
            reward_tokens: BTreeMap::new(),
        }
    }

    #[must_use]
    pub fn with_reward(mut self, token: impl Into<String>, stream: RewardStream) -> Self {
        self.reward_tokens.insert(token.into(), stream);
        self
    }
}

/// A reward token stream deposited into a gauge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RewardStream {
    /// Tokens per second, in the token's smallest unit.
    pub rate: U256,
    /// UNIX timestamp after which the stream stops paying out.
    pub period_finish: u64,
}

impl RewardStream {
    pub fn new(rate: impl Into<U256>, period_finish: u64) -> Self {
        Self {
            rate: rate.into(),
            period_finish,
        }
    }

    /// A stream is active until its period finishes.
    #[must_use]
    pub fn is_active_at(&self, now: u64) -> bool {
        self.period_finish >= now
    }

    /// One year of emissions at the current rate, in raw token units.
    /// Returns `None` on overflow.
    #[must_use]
    pub fn yearly_amount(&self) -> Option<U256> {
        self.rate.checked_mul(U256::from(SECONDS_PER_YEAR))
    }
}
