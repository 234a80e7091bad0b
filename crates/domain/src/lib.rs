//! Core types for pool valuation and yield analytics.
//!
//! This crate holds the read-only snapshots the analytics engines work on:
//! - Pools, their tokens and the pool type tag
//! - Liquidity gauges and their reward streams
//! - Token metadata and USD prices
//! - APR breakdowns and basis-point helpers
//! - Swap fee metrics

/// Snapshot entities (pools, tokens, gauges).
pub mod entities;
/// Pool type tags.
pub mod enums;
/// Error types.
pub mod error;
/// Pure fee and yield formulas.
pub mod metrics;
/// Derived values and small wrappers.
pub mod value_objects;

pub use entities::{LiquidityGauge, Pool, PoolToken, RewardStream, TokenMeta};
pub use enums::PoolType;
pub use error::DomainError;
pub use value_objects::{
    Amount, AprBreakdown, Percentage, Price, ProtocolRevenue, StakingApr, round_bps,
};
