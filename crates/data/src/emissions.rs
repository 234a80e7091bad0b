//! Protocol token emission schedule.
//!
//! Emissions start at a fixed weekly rate and are cut by a constant factor
//! at the start of every mining epoch (one year). Gauges receive their
//! relative weight of whatever the schedule releases.

use crate::providers::EmissionsProvider;
use async_trait::async_trait;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const SECONDS_PER_WEEK: u64 = 7 * 86_400;

/// Errors raised by the emission schedule.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EmissionError {
    /// The queried period starts before the schedule was deployed.
    #[error("Start timestamp {start} is before emission schedule deployment at {deployed}")]
    BeforeDeployment { start: u64, deployed: u64 },
    /// The queried period ends before it starts.
    #[error("Cannot finish at {end} before starting at {start}")]
    EndBeforeStart { start: u64, end: u64 },
    /// The rate reduction coefficient cannot be applied.
    #[error("Invalid rate reduction coefficient")]
    InvalidCoefficient,
    /// Epochs must last at least one second.
    #[error("Epoch length must be positive")]
    ZeroEpochLength,
    /// The released amount does not fit a `Decimal`.
    #[error("Emissions overflow between {start} and {end}")]
    Overflow { start: u64, end: u64 },
}

/// Emission schedule parameters.
#[derive(Debug, Clone)]
pub struct EmissionSchedule {
    /// Tokens released per week during the first epoch.
    pub initial_rate: Decimal,
    /// UNIX timestamp the first epoch starts at.
    pub start_epoch_time: u64,
    /// Epoch length in seconds.
    pub rate_reduction_time: u64,
    /// Factor the weekly rate is divided by at every new epoch.
    pub rate_reduction_coefficient: Decimal,
}

impl Default for EmissionSchedule {
    fn default() -> Self {
        Self {
            initial_rate: dec!(145000),
            start_epoch_time: 1_648_465_251,
            rate_reduction_time: 365 * 86_400,
            // 2^(1/4)
            rate_reduction_coefficient: dec!(1.1892071150027210667174999706),
        }
    }
}

impl EmissionSchedule {
    /// Mining epoch containing `timestamp`.
    pub fn epoch(&self, timestamp: u64) -> Result<u64, EmissionError> {
        if timestamp < self.start_epoch_time {
            return Err(EmissionError::BeforeDeployment {
                start: timestamp,
                deployed: self.start_epoch_time,
            });
        }
        (timestamp - self.start_epoch_time)
            .checked_div(self.rate_reduction_time)
            .ok_or(EmissionError::ZeroEpochLength)
    }

    /// Weekly emission rate at `timestamp`.
    pub fn weekly(&self, timestamp: u64) -> Result<Decimal, EmissionError> {
        self.weekly_rate_for_epoch(self.epoch(timestamp)?)
    }

    /// Total emissions released between `start` and `end`.
    ///
    /// Once the weekly rate stops decaying at `Decimal` precision the rest of
    /// the period is released at that rate.
    pub fn between(&self, start: u64, end: u64) -> Result<Decimal, EmissionError> {
        if end < start {
            return Err(EmissionError::EndBeforeStart { start, end });
        }
        let first_epoch = self.epoch(start)?;
        let last_epoch = self.epoch(end)?;
        let overflow = || EmissionError::Overflow { start, end };

        let mut rate = self.weekly_rate_for_epoch(first_epoch)?;
        let mut total = Decimal::ZERO;
        for epoch in first_epoch..=last_epoch {
            let epoch_start = self
                .start_epoch_time
                .saturating_add(epoch.saturating_mul(self.rate_reduction_time));
            let from = start.max(epoch_start);
            let next_rate = self.reduce(rate)?;
            if next_rate == rate {
                let amount = released(rate, end.saturating_sub(from)).ok_or_else(overflow)?;
                total = total.checked_add(amount).ok_or_else(overflow)?;
                break;
            }

            let to = end.min(epoch_start.saturating_add(self.rate_reduction_time));
            if to > from {
                let amount = released(rate, to - from).ok_or_else(overflow)?;
                total = total.checked_add(amount).ok_or_else(overflow)?;
            }
            rate = next_rate;
        }

        Ok(total)
    }

    fn weekly_rate_for_epoch(&self, epoch: u64) -> Result<Decimal, EmissionError> {
        let mut rate = self.initial_rate;
        for _ in 0..epoch {
            let next_rate = self.reduce(rate)?;
            if next_rate == rate {
                break;
            }
            rate = next_rate;
        }
        Ok(rate)
    }

    fn reduce(&self, rate: Decimal) -> Result<Decimal, EmissionError> {
        rate.checked_div(self.rate_reduction_coefficient)
            .ok_or(EmissionError::InvalidCoefficient)
    }
}

/// Tokens released over `seconds` at a weekly `rate`.
fn released(rate: Decimal, seconds: u64) -> Option<Decimal> {
    rate.checked_mul(Decimal::from(seconds))?
        .checked_div(Decimal::from(SECONDS_PER_WEEK))
}

#[async_trait]
impl EmissionsProvider for EmissionSchedule {
    async fn find_emissions_between(&self, from: u64, to: u64) -> anyhow::Result<Decimal> {
        Ok(self.between(from, to)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule() -> EmissionSchedule {
        EmissionSchedule::default()
    }

    #[test]
    fn test_weekly_rate_first_epoch() {
        let s = schedule();
        assert_eq!(s.weekly(s.start_epoch_time).unwrap(), dec!(145000));
        assert_eq!(
            s.weekly(s.start_epoch_time + s.rate_reduction_time - 1).unwrap(),
            dec!(145000)
        );
    }

    #[test]
    fn test_weekly_rate_reduces_each_epoch() {
        let s = schedule();
        let second = s.weekly(s.start_epoch_time + s.rate_reduction_time).unwrap();
        let fifth = s
            .weekly(s.start_epoch_time + 4 * s.rate_reduction_time)
            .unwrap();

        assert!((second - dec!(121929.98)).abs() < dec!(0.01));
        // Four reductions by 2^(1/4) halve the rate.
        assert!((fifth - dec!(72500)).abs() < dec!(0.000001));
    }

    #[test]
    fn test_between_one_week() {
        let s = schedule();
        let start = s.start_epoch_time;
        assert_eq!(s.between(start, start + SECONDS_PER_WEEK).unwrap(), dec!(145000));
        assert_eq!(s.between(start, start).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_between_spans_epoch_boundary() {
        let s = schedule();
        let boundary = s.start_epoch_time + s.rate_reduction_time;
        let total = s
            .between(boundary - SECONDS_PER_WEEK, boundary + SECONDS_PER_WEEK)
            .unwrap();
        let expected = dec!(145000) + s.weekly(boundary).unwrap();

        assert!((total - expected).abs() < dec!(0.000001));
    }

    #[test]
    fn test_between_rejects_invalid_periods() {
        let s = schedule();
        assert_eq!(
            s.between(s.start_epoch_time - 1, s.start_epoch_time),
            Err(EmissionError::BeforeDeployment {
                start: s.start_epoch_time - 1,
                deployed: s.start_epoch_time,
            })
        );
        assert_eq!(
            s.between(s.start_epoch_time + 10, s.start_epoch_time),
            Err(EmissionError::EndBeforeStart {
                start: s.start_epoch_time + 10,
                end: s.start_epoch_time,
            })
        );
    }

    #[test]
    fn test_between_open_ended_period() {
        let s = schedule();
        let total = s.between(s.start_epoch_time, u64::MAX).unwrap();

        // The first epoch alone releases 52 weeks and a day at 145000.
        let first_epoch = s
            .between(s.start_epoch_time, s.start_epoch_time + s.rate_reduction_time)
            .unwrap();
        assert!(total > first_epoch);
        assert!(s.weekly(u64::MAX).unwrap() < dec!(0.000001));
    }

    #[test]
    fn test_zero_epoch_length_is_rejected() {
        let s = EmissionSchedule {
            rate_reduction_time: 0,
            ..schedule()
        };
        assert_eq!(s.weekly(s.start_epoch_time), Err(EmissionError::ZeroEpochLength));
        assert_eq!(
            s.between(s.start_epoch_time, s.start_epoch_time + 1),
            Err(EmissionError::ZeroEpochLength)
        );
    }

    #[tokio::test]
    async fn test_emissions_provider() {
        let s = schedule();
        let start = s.start_epoch_time;
        let total = s
            .find_emissions_between(start, start + 2 * SECONDS_PER_WEEK)
            .await
            .unwrap();
        assert_eq!(total, dec!(290000));
    }
}
