// Fixed-period spawn timer
//
// Driven by elapsed time rather than by a platform timer, so the number of
// spawns depends only on the total time fed in, not on how it was chunked.

use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Spawner {
    period: Duration,
    /// Time accumulated since the last firing
    elapsed: Duration,
    running: bool,
    fired: u64,
}

impl Spawner {
    /// Create a stopped spawner; `period` must be non-zero
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            elapsed: Duration::ZERO,
            running: false,
            fired: 0,
        }
    }

    /// Start firing; time is counted from this call
    pub fn start(&mut self) {
        if !self.running {
            self.running = true;
            self.elapsed = Duration::ZERO;
            log::info!("Spawner started with period {:?}", self.period);
        }
    }

    pub fn stop(&mut self) {
        if self.running {
            self.running = false;
            log::info!("Spawner stopped after {} spawns", self.fired);
        }
    }

    #[cfg(test)]
    pub fn is_running(&self) -> bool {
        self.running
    }

    /// Feed elapsed time and return how many periods completed
    pub fn advance(&mut self, elapsed: Duration) -> u64 {
        if !self.running || self.period.is_zero() {
            return 0;
        }

        self.elapsed += elapsed;
        let period = self.period.as_nanos();
        let total = self.elapsed.as_nanos();
        let count = (total / period) as u64;
        self.elapsed = Duration::from_nanos((total % period) as u64);
        self.fired += count;
        count
    }

    /// Time left until the next firing, or None when stopped
    pub fn until_next(&self) -> Option<Duration> {
        self.running.then(|| self.period.saturating_sub(self.elapsed))
    }

    /// Total number of firings so far
    #[cfg(test)]
    pub fn fired(&self) -> u64 {
        self.fired
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running(period_ms: u64) -> Spawner {
        let mut spawner = Spawner::new(Duration::from_millis(period_ms));
        spawner.start();
        spawner
    }

    #[test]
    fn test_nothing_before_first_period() {
        let mut spawner = running(500);
        assert_eq!(spawner.advance(Duration::from_millis(499)), 0);
        assert_eq!(spawner.fired(), 0);
        assert_eq!(spawner.advance(Duration::from_millis(1)), 1);
    }

    #[test]
    fn test_count_is_floor_of_total_time() {
        for total_ms in [0u64, 250, 500, 999, 1000, 1750, 10_001] {
            let mut spawner = running(500);
            let mut spawned = 0;
            // Feed in uneven chunks, like real frame times
            let mut remaining = total_ms;
            let mut chunk = 7;
            while remaining > 0 {
                let step = chunk.min(remaining);
                spawned += spawner.advance(Duration::from_millis(step));
                remaining -= step;
                chunk = chunk * 3 % 97 + 1;
            }
            assert_eq!(spawned, total_ms / 500, "total {}ms", total_ms);
        }
    }

    #[test]
    fn test_long_gap_fires_multiple_times() {
        let mut spawner = running(500);
        assert_eq!(spawner.advance(Duration::from_millis(2600)), 5);
        assert_eq!(spawner.until_next(), Some(Duration::from_millis(400)));
    }

    #[test]
    fn test_stopped_spawner_does_not_fire() {
        let mut spawner = Spawner::new(Duration::from_millis(500));
        assert_eq!(spawner.advance(Duration::from_secs(10)), 0);
        assert_eq!(spawner.until_next(), None);

        spawner.start();
        spawner.stop();
        assert_eq!(spawner.advance(Duration::from_secs(10)), 0);
        assert!(!spawner.is_running());
    }
}
