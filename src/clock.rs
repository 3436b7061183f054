use std::thread;
use std::time::{Duration, Instant};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Source of time for the run loop.
///
/// Times are measured from when the clock was created so the run loop never
/// depends on wall clock state shared across the process.
pub trait Clock {
    /// Time elapsed since the clock started
    fn now(&self) -> Duration;

    /// Wait for `duration` to pass
    fn sleep(&mut self, duration: Duration);
}

/// Real time
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        SystemClock {
            start: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> Duration {
        self.start.elapsed()
    }

    fn sleep(&mut self, duration: Duration) {
        thread::sleep(duration);
    }
}

/// A clock that only moves when told to; sleeping advances it instantly
#[derive(Debug, Default, Clone)]
pub struct ManualClock {
    now: Duration,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            now: Duration::from_secs(0),
        }
    }

    pub fn advance(&mut self, duration: Duration) {
        self.now += duration;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Duration {
        self.now
    }

    fn sleep(&mut self, duration: Duration) {
        self.advance(duration);
    }
}

/// # Pacer
/// Counts the periods of a fixed rate that have elapsed.
///
/// Boundary `k` falls at `k / hz` seconds. Only the number of boundaries
/// already handed out is stored, so repeated polling never accumulates
/// rounding error: after `t` seconds exactly `floor(t * hz)` periods have
/// been reported in total.
#[derive(Debug, Clone)]
pub struct Pacer {
    hz: u32,
    elapsed: u64,
}

impl Pacer {
    pub fn new(hz: u32) -> Self {
        Pacer {
            hz: hz.max(1),
            elapsed: 0,
        }
    }

    /// Number of boundaries crossed since the last call
    pub fn due(&mut self, now: Duration) -> u64 {
        let total = (now.as_nanos() * u128::from(self.hz) / NANOS_PER_SEC) as u64;
        let due = total.saturating_sub(self.elapsed);
        self.elapsed = self.elapsed.max(total);
        due
    }

    /// When the next boundary falls
    pub fn next_deadline(&self) -> Duration {
        let k = u128::from(self.elapsed + 1);
        let hz = u128::from(self.hz);
        let nanos = (k * NANOS_PER_SEC + hz - 1) / hz;
        Duration::from_nanos(nanos as u64)
    }

    /// Total boundaries reported so far
    pub fn elapsed(&self) -> u64 {
        self.elapsed
    }
}
