//! Randomized delays between page fetches.

use std::time::Duration;

use rand::{Rng, rng};

/// Waits a random duration in `[min, max]` between fetches to the same site.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacer {
    min: Duration,
    max: Duration,
}

impl Pacer {
    /// `max` is raised to `min` when given out of order.
    pub fn new(min: Duration, max: Duration) -> Self {
        Self {
            min,
            max: max.max(min),
        }
    }

    pub fn from_window((min, max): (Duration, Duration)) -> Self {
        Self::new(min, max)
    }

    /// Pick the next delay.
    pub fn next_delay(&self) -> Duration {
        if self.max.is_zero() {
            return Duration::ZERO;
        }
        let millis = rng().random_range(self.min.as_millis()..=self.max.as_millis());
        Duration::from_millis(millis as u64)
    }

    /// Sleep for a freshly drawn delay.
    pub async fn pause(&self) -> Duration {
        let delay = self.next_delay();
        if !delay.is_zero() {
            log::debug!("Pacing: sleeping {} ms", delay.as_millis());
            tokio::time::sleep(delay).await;
        }
        delay
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_stays_in_window() {
        let pacer = Pacer::new(Duration::from_millis(500), Duration::from_millis(2_000));
        for _ in 0..200 {
            let delay = pacer.next_delay();
            assert!(delay >= Duration::from_millis(500));
            assert!(delay <= Duration::from_millis(2_000));
        }
    }

    #[test]
    fn test_inverted_window_collapses_to_min() {
        let pacer = Pacer::new(Duration::from_millis(300), Duration::from_millis(100));
        assert_eq!(pacer.next_delay(), Duration::from_millis(300));
    }

    #[tokio::test(start_paused = true)]
    async fn test_pause_sleeps_for_the_drawn_delay() {
        let pacer = Pacer::new(Duration::from_millis(3_000), Duration::from_millis(7_000));
        let start = tokio::time::Instant::now();
        let delay = pacer.pause().await;
        assert!(delay >= Duration::from_millis(3_000));
        assert!(start.elapsed() >= delay);
    }

    #[tokio::test]
    async fn test_zero_window_does_not_sleep() {
        let pacer = Pacer::new(Duration::ZERO, Duration::ZERO);
        assert_eq!(pacer.pause().await, Duration::ZERO);
    }
}
