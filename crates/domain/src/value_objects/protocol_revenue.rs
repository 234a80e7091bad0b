use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Last week's protocol fee revenue, as paid out by the fee distributor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProtocolRevenue {
    /// Governance token distributed last week, in USD.
    pub bal_revenue: Decimal,
    /// Stable BPT distributed last week, in USD.
    pub stable_revenue: Decimal,
    /// Vote-escrowed token supply at the start of the week.
    pub ve_supply: Decimal,
}

impl ProtocolRevenue {
    #[must_use]
    pub fn weekly_total(&self) -> Decimal {
        self.bal_revenue + self.stable_revenue
    }
}
