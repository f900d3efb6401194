//! Time sources for the countdown engine

use chrono::Utc;
use tokio::time::Instant;

/// Millisecond time source used to compute deadlines and remaining time
pub trait Clock: Send + Sync + std::fmt::Debug {
    fn now_millis(&self) -> i64;
}

/// Wall-clock time
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Monotonic time anchored at the wall clock reading taken on creation.
///
/// Follows tokio's clock, so it ignores wall-clock jumps and advances with
/// paused time under `tokio::time::pause`.
#[derive(Debug, Clone, Copy)]
pub struct InstantClock {
    origin: Instant,
    origin_millis: i64,
}

impl InstantClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            origin_millis: Utc::now().timestamp_millis(),
        }
    }
}

impl Default for InstantClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for InstantClock {
    fn now_millis(&self) -> i64 {
        let elapsed = i64::try_from(self.origin.elapsed().as_millis()).unwrap_or(i64::MAX);
        self.origin_millis.saturating_add(elapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_instant_clock_follows_tokio_time() {
        let clock = InstantClock::new();
        let start = clock.now_millis();

        tokio::time::advance(Duration::from_millis(1_500)).await;
        assert_eq!(clock.now_millis() - start, 1_500);
    }

    #[test]
    fn test_system_clock_is_wall_time() {
        let before = Utc::now().timestamp_millis();
        let now = SystemClock.now_millis();
        assert!(now >= before);
    }
}
