//! Per pool type rules for turning priced balances into USD liquidity.

use lp_yield_domain::{PoolToken, PoolType, Price};
use rust_decimal::Decimal;

/// A pool token together with its resolved USD price.
#[derive(Debug, Clone)]
pub struct PricedPoolToken {
    pub balance: Decimal,
    pub price_rate: Decimal,
    pub price: Price,
}

impl PricedPoolToken {
    pub fn new(token: &PoolToken, price: Price) -> Self {
        Self {
            balance: token.balance,
            price_rate: token.price_rate_or_one(),
            price,
        }
    }

    fn value(&self) -> Decimal {
        self.price.value_of(self.balance)
    }

    fn rate_scaled_value(&self) -> Decimal {
        self.price.value_of(self.balance * self.price_rate)
    }
}

/// How a pool type combines priced token balances.
///
/// Strategies only combine already priced inputs; they never look prices up.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiquidityStrategy {
    /// Weighted, investment and liquidity bootstrapping pools.
    Weighted,
    /// Stable pools trading near parity.
    Stable,
    /// Stable pools of rate-bearing tokens priced in their underlying.
    MetaStable,
    /// Linear pools of a main token and its wrapped, rate-bearing form.
    Linear,
    /// Element convergent curve pools.
    Element,
}

impl LiquidityStrategy {
    #[must_use]
    pub fn for_pool_type(pool_type: PoolType) -> Self {
        match pool_type {
            PoolType::Weighted | PoolType::Investment | PoolType::LiquidityBootstrapping => {
                Self::Weighted
            }
            PoolType::Stable | PoolType::StablePhantom | PoolType::ComposableStable => {
                Self::Stable
            }
            PoolType::MetaStable => Self::MetaStable,
            PoolType::Linear | PoolType::AaveLinear | PoolType::Erc4626Linear => Self::Linear,
            PoolType::Element => Self::Element,
        }
    }

    /// Total USD value of `tokens`.
    #[must_use]
    pub fn calc_total(&self, tokens: &[PricedPoolToken]) -> Decimal {
        match self {
            // Weights describe the invariant, not value; the USD sum is exact
            // once every token is priced.
            Self::Weighted | Self::Stable | Self::Element => {
                tokens.iter().map(PricedPoolToken::value).sum()
            }
            Self::MetaStable | Self::Linear => {
                tokens.iter().map(PricedPoolToken::rate_scaled_value).sum()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn priced(balance: Decimal, usd: Decimal) -> PricedPoolToken {
        PricedPoolToken::new(&PoolToken::new("0x0", balance, 18), Price::new(usd))
    }

    #[test]
    fn test_weighted_sums_usd_values() {
        let tokens = vec![
            PricedPoolToken::new(
                &PoolToken::new("0xa", dec!(100), 18).with_weight(dec!(0.5)),
                Price::new(dec!(1)),
            ),
            PricedPoolToken::new(
                &PoolToken::new("0xb", dec!(200), 18).with_weight(dec!(0.5)),
                Price::new(dec!(1)),
            ),
        ];
        let total = LiquidityStrategy::for_pool_type(PoolType::Weighted).calc_total(&tokens);
        assert_eq!(total, dec!(300));
    }

    #[test]
    fn test_stable_ignores_price_rate() {
        let token = PricedPoolToken::new(
            &PoolToken::new("0xa", dec!(10), 18).with_price_rate(dec!(1.1)),
            Price::new(dec!(2)),
        );
        let total = LiquidityStrategy::Stable.calc_total(&[token, priced(dec!(5), dec!(1))]);
        assert_eq!(total, dec!(25));
    }

    #[test]
    fn test_rate_scaled_strategies() {
        let token = PricedPoolToken::new(
            &PoolToken::new("0xa", dec!(10), 18).with_price_rate(dec!(1.05)),
            Price::new(dec!(1000)),
        );
        assert_eq!(
            LiquidityStrategy::MetaStable.calc_total(std::slice::from_ref(&token)),
            dec!(10500)
        );
        assert_eq!(
            LiquidityStrategy::Linear.calc_total(&[token, priced(dec!(500), dec!(1))]),
            dec!(11000)
        );
    }

    #[test]
    fn test_empty_pool_is_zero() {
        assert_eq!(LiquidityStrategy::Element.calc_total(&[]), Decimal::ZERO);
    }

    #[test]
    fn test_pool_type_dispatch() {
        assert_eq!(
            LiquidityStrategy::for_pool_type(PoolType::ComposableStable),
            LiquidityStrategy::Stable
        );
        assert_eq!(
            LiquidityStrategy::for_pool_type(PoolType::Erc4626Linear),
            LiquidityStrategy::Linear
        );
        assert_eq!(
            LiquidityStrategy::for_pool_type(PoolType::LiquidityBootstrapping),
            LiquidityStrategy::Weighted
        );
    }
}
