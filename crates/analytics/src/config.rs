//! APR engine configuration.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Protocol parameters the APR engine depends on.
#[derive(Debug, Clone)]
pub struct AprConfig {
    /// Pool whose stakers receive protocol fee revenue.
    pub protocol_revenue_pool_id: String,
    /// Token paid out by the emission schedule.
    pub emission_token: String,
    /// Largest boost an individual staker can reach.
    pub max_boost: Decimal,
    /// Share of staked BPT that accrues emissions without boost.
    pub working_supply_baseline: Decimal,
}

impl Default for AprConfig {
    fn default() -> Self {
        Self {
            protocol_revenue_pool_id:
                "0x5c6ee304399dbdb9c8ef030ab642b10820db8f56000200000000000000000014".to_string(),
            emission_token: "0xba100000625a3754423978a60c9317c58a424e3d".to_string(),
            max_boost: dec!(2.5),
            working_supply_baseline: dec!(0.4),
        }
    }
}

impl AprConfig {
    #[must_use]
    pub fn with_protocol_revenue_pool_id(mut self, pool_id: impl Into<String>) -> Self {
        self.protocol_revenue_pool_id = pool_id.into();
        self
    }

    #[must_use]
    pub fn with_emission_token(mut self, token: impl Into<String>) -> Self {
        self.emission_token = token.into();
        self
    }

    #[must_use]
    pub fn with_max_boost(mut self, max_boost: Decimal) -> Self {
        self.max_boost = max_boost;
        self
    }

    #[must_use]
    pub fn with_working_supply_baseline(mut self, baseline: Decimal) -> Self {
        self.working_supply_baseline = baseline;
        self
    }
}
