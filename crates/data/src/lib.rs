//! Data providers for pool analytics.
//!
//! This crate provides the lookup seams the analytics engines depend on,
//! plus implementations that serve them from local data:
//! - Provider traits for pools, prices, token metadata, gauges and revenue
//! - A JSON snapshot repository implementing every provider
//! - The protocol emission schedule

/// Protocol emission schedule.
pub mod emissions;
/// Provider traits and the provider bundle.
pub mod providers;
/// In-memory repositories.
pub mod repositories;

pub use emissions::{EmissionError, EmissionSchedule};
pub use providers::{
    DataProviders, EmissionsProvider, FeeDistributorProvider, GaugeProvider, PoolProvider,
    ProtocolFeeProvider, TokenMetaProvider, TokenPriceProvider, TokenYieldProvider,
};
pub use repositories::{FeeDistribution, Snapshot, SnapshotRepository};
