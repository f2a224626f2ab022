use std::time::Duration;

use thiserror::Error;
use tokio::time::{Instant, sleep};
use tracing::debug;

use super::checker::Probe;
use super::types::{MonitorStatus, PollOutcome};
use crate::endpoint::Endpoint;
use crate::progress::Progress;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PollConfigError {
    #[error("{0} must be greater than zero")]
    NotPositive(&'static str),
    #[error("attempt timeout ({attempt:?}) must not exceed the poll interval ({interval:?})")]
    AttemptExceedsInterval { attempt: Duration, interval: Duration },
}

/// Timing parameters of a polling run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollConfig {
    interval: Duration,
    budget: Duration,
    attempt_timeout: Duration,
}

impl PollConfig {
    pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(1);
    pub const DEFAULT_BUDGET: Duration = Duration::from_secs(600);
    pub const DEFAULT_ATTEMPT_TIMEOUT: Duration = Duration::from_secs(1);

    pub fn new(
        interval: Duration,
        budget: Duration,
        attempt_timeout: Duration,
    ) -> Result<Self, PollConfigError> {
        if interval.is_zero() {
            return Err(PollConfigError::NotPositive("interval"));
        }
        if budget.is_zero() {
            return Err(PollConfigError::NotPositive("timeout"));
        }
        if attempt_timeout.is_zero() {
            return Err(PollConfigError::NotPositive("attempt timeout"));
        }
        if attempt_timeout > interval {
            return Err(PollConfigError::AttemptExceedsInterval {
                attempt: attempt_timeout,
                interval,
            });
        }

        Ok(Self { interval, budget, attempt_timeout })
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    pub fn attempt_timeout(&self) -> Duration {
        self.attempt_timeout
    }

    /// `ceil(budget / interval)`, never less than one
    pub fn total_ticks(&self) -> u64 {
        let ticks = self.budget.as_nanos().div_ceil(self.interval.as_nanos());
        u64::try_from(ticks).unwrap_or(u64::MAX).max(1)
    }
}

impl Default for PollConfig {
    fn default() -> Self {
        Self {
            interval: Self::DEFAULT_INTERVAL,
            budget: Self::DEFAULT_BUDGET,
            attempt_timeout: Self::DEFAULT_ATTEMPT_TIMEOUT,
        }
    }
}

/// Sequential poll driver: one probe in flight, fixed wait between ticks,
/// stops on the first success or when the tick budget is spent.
pub struct PollLoop<P> {
    probe: P,
    config: PollConfig,
}

impl<P: Probe> PollLoop<P> {
    pub fn new(probe: P, config: PollConfig) -> Self {
        Self { probe, config }
    }

    pub fn config(&self) -> &PollConfig {
        &self.config
    }

    /// Poll `endpoint` until it is reachable or the budget runs out.
    ///
    /// Progress advances once per tick, after that tick's probe resolved and
    /// before the next one starts. Only the most recent failure is kept.
    pub async fn run(&self, endpoint: &Endpoint, progress: &mut dyn Progress) -> PollOutcome {
        let total_ticks = self.config.total_ticks();
        let started = Instant::now();
        let mut last_error = None;
        let mut tick = 0;

        progress.start(total_ticks);

        let status = loop {
            tick += 1;
            let result = self.probe.probe(endpoint, self.config.attempt_timeout).await;
            progress.advance(tick);

            if result.reachable {
                break MonitorStatus::Up;
            }

            if let Some(error) = result.error {
                debug!(tick, total_ticks, "{endpoint} unreachable: {error}");
                last_error = Some(error);
            }

            if tick >= total_ticks {
                break MonitorStatus::Down;
            }

            sleep(self.config.interval).await;
        };

        progress.finish();

        PollOutcome {
            status,
            elapsed_ticks: tick,
            total_ticks,
            last_error,
            elapsed: started.elapsed(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn secs(n: u64) -> Duration {
        Duration::from_secs(n)
    }

    #[test]
    fn test_poll_config_validation() {
        assert!(PollConfig::new(secs(1), secs(600), secs(1)).is_ok());

        assert_eq!(
            PollConfig::new(Duration::ZERO, secs(1), secs(1)),
            Err(PollConfigError::NotPositive("interval"))
        );
        assert_eq!(
            PollConfig::new(secs(1), Duration::ZERO, secs(1)),
            Err(PollConfigError::NotPositive("timeout"))
        );
        assert_eq!(
            PollConfig::new(secs(1), secs(1), Duration::ZERO),
            Err(PollConfigError::NotPositive("attempt timeout"))
        );
        assert!(matches!(
            PollConfig::new(secs(1), secs(10), secs(2)),
            Err(PollConfigError::AttemptExceedsInterval { .. })
        ));
    }

    #[test]
    fn test_total_ticks() {
        let ticks = |interval_ms, budget_ms| {
            PollConfig::new(
                Duration::from_millis(interval_ms),
                Duration::from_millis(budget_ms),
                Duration::from_millis(interval_ms),
            )
            .unwrap()
            .total_ticks()
        };

        assert_eq!(ticks(1000, 3000), 3);
        assert_eq!(ticks(1000, 2500), 3);
        assert_eq!(ticks(1000, 600_000), 600);
        assert_eq!(ticks(1000, 10), 1);
        assert_eq!(PollConfig::default().total_ticks(), 600);
    }
}
