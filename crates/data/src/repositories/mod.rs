//! Repository implementations backed by local data.
//!
//! This module provides an in-memory snapshot of pools, prices, gauges and
//! protocol revenue that implements every provider trait.

mod snapshot_repository;

pub use snapshot_repository::{FeeDistribution, Snapshot, SnapshotRepository};
