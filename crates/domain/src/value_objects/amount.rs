use primitive_types::U256;
use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use serde::{Deserialize, Serialize};

/// Largest scale a `Decimal` can carry.
const MAX_SCALE: u8 = 28;

/// Every `U256` is below `10^78`.
const U256_MAX_DIGITS: usize = 78;

/// A raw on-chain token quantity together with the token's decimals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Amount {
    pub raw: U256,
    pub decimals: u8,
}

impl Amount {
    pub fn new(raw: U256, decimals: u8) -> Self {
        Self { raw, decimals }
    }

    /// Value in whole tokens.
    ///
    /// Digits below 28 decimal places are truncated. Returns `None` when the
    /// whole part does not fit a `Decimal`.
    pub fn to_decimal(&self) -> Option<Decimal> {
        if self.decimals > MAX_SCALE {
            let excess = usize::from(self.decimals - MAX_SCALE);
            if excess >= U256_MAX_DIGITS {
                return Some(Decimal::ZERO);
            }
            return Self::new(self.raw / U256::exp10(excess), MAX_SCALE).to_decimal();
        }

        let unit = U256::exp10(usize::from(self.decimals));
        let whole = self.raw / unit;
        if whole.bits() > 128 {
            return None;
        }
        let whole = Decimal::from_u128(whole.low_u128())?;

        // Below 10^28, so it fits an i128.
        let fraction = i128::try_from((self.raw % unit).low_u128()).ok()?;
        let fraction = Decimal::try_from_i128_with_scale(fraction, u32::from(self.decimals)).ok()?;

        whole.checked_add(fraction)
    }
}
