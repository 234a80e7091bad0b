//! Shared test fixtures.

use async_trait::async_trait;
use lp_yield_data::{DataProviders, EmissionSchedule, EmissionsProvider, SnapshotRepository};
use rust_decimal::Decimal;
use std::sync::Arc;

/// 2023-11-14T22:13:20Z, inside the default emission schedule.
pub const NOW: u64 = 1_700_000_000;

/// Emissions provider returning the same total for any period.
pub struct FixedEmissions(pub Decimal);

#[async_trait]
impl EmissionsProvider for FixedEmissions {
    async fn find_emissions_between(&self, _from: u64, _to: u64) -> anyhow::Result<Decimal> {
        Ok(self.0)
    }
}

pub fn providers(repository: SnapshotRepository) -> DataProviders {
    DataProviders::from_snapshot(repository, EmissionSchedule::default())
}

pub fn providers_with_emissions(repository: SnapshotRepository, total: Decimal) -> DataProviders {
    providers(repository).with_emissions(Arc::new(FixedEmissions(total)))
}
