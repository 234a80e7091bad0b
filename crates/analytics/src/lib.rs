//! Pool liquidity valuation and APR composition.
//!
//! This crate turns pool snapshots served by the data providers into:
//! - Total pool liquidity in USD, recursing through nested pools
//! - APR breakdowns in basis points, by yield source
//!
//! Both engines guard against pools that hold their own BPT through nesting.

/// APR composition engine.
pub mod apr;
/// Time sources.
pub mod clock;
/// Engine configuration.
pub mod config;
/// Error types.
pub mod error;
/// Liquidity valuation engine.
pub mod liquidity;
mod lookup;
/// Prelude for convenient imports.
pub mod prelude;
/// Per pool type liquidity rules.
pub mod strategy;

#[cfg(test)]
mod fixtures;

pub use apr::AprEngine;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::AprConfig;
pub use error::{AnalyticsError, Result};
pub use liquidity::LiquidityEngine;
pub use strategy::{LiquidityStrategy, PricedPoolToken};
