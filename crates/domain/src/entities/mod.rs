pub mod gauge;
pub mod pool;
pub mod token;

// Re-export for easier access
pub use gauge::{LiquidityGauge, RewardStream};
pub use pool::{Pool, PoolToken};
pub use token::TokenMeta;

/// Compares two hex addresses, ignoring checksum casing.
#[must_use]
pub fn same_address(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}
