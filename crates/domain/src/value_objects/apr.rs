use serde::Serialize;

/// Staking APR range in basis points, for the minimum and maximum boost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StakingApr {
    pub min: i64,
    pub max: i64,
}

/// Pool APR split by source, in basis points.
///
/// `min` and `max` are derived on construction and differ only by the
/// staking component.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AprBreakdown {
    swap_fees: i64,
    token_aprs: i64,
    staking_apr: StakingApr,
    rewards_apr: i64,
    protocol_apr: i64,
    min: i64,
    max: i64,
}

impl AprBreakdown {
    pub fn new(
        swap_fees: i64,
        token_aprs: i64,
        staking_apr: StakingApr,
        rewards_apr: i64,
        protocol_apr: i64,
    ) -> Self {
        let base = swap_fees + token_aprs + rewards_apr + protocol_apr;
        Self {
            swap_fees,
            token_aprs,
            staking_apr,
            rewards_apr,
            protocol_apr,
            min: base + staking_apr.min,
            max: base + staking_apr.max,
        }
    }

    pub fn swap_fees(&self) -> i64 {
        self.swap_fees
    }

    pub fn token_aprs(&self) -> i64 {
        self.token_aprs
    }

    pub fn staking_apr(&self) -> StakingApr {
        self.staking_apr
    }

    pub fn rewards_apr(&self) -> i64 {
        self.rewards_apr
    }

    pub fn protocol_apr(&self) -> i64 {
        self.protocol_apr
    }

    pub fn min(&self) -> i64 {
        self.min
    }

    pub fn max(&self) -> i64 {
        self.max
    }
}
