use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// USD price of one whole token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Price {
    pub usd: Decimal,
}

impl Price {
    pub fn new(usd: Decimal) -> Self {
        Self { usd }
    }

    /// USD value of `amount` whole tokens.
    #[must_use]
    pub fn value_of(&self, amount: Decimal) -> Decimal {
        amount * self.usd
    }
}
