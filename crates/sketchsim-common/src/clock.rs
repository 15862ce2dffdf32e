//! Time source for simulated firmware.
//!
//! Firmware measures time with `millis()`/`micros()` and blocks with `delay()`.
//! Components that need either receive a [`Clock`] instead of calling the
//! operating system directly, so tests can swap in a [`ManualClock`].

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// A monotonic time source with a blocking delay.
pub trait Clock: Send + Sync {
    /// Milliseconds since the clock was created.
    fn millis(&self) -> u64;

    /// Microseconds since the clock was created.
    fn micros(&self) -> u64;

    /// Block the caller for `ms` milliseconds.
    fn delay(&self, ms: u64);
}

/// Wall-clock time source. `delay` really sleeps the calling thread.
#[derive(Debug, Clone)]
pub struct SystemClock {
    start: Instant,
}

impl SystemClock {
    /// Create a clock whose epoch is now.
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
    fn millis(&self) -> u64 {
        self.start.elapsed().as_millis() as u64
    }

    fn micros(&self) -> u64 {
        self.start.elapsed().as_micros() as u64
    }

    fn delay(&self, ms: u64) {
        if ms > 0 {
            std::thread::sleep(Duration::from_millis(ms));
        }
    }
}

/// Virtual time source. `delay` advances the counter and returns immediately.
#[derive(Debug, Default)]
pub struct ManualClock {
    now_us: AtomicU64,
}

impl ManualClock {
    /// Create a clock at time zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Advance virtual time by `ms` milliseconds.
    pub fn advance(&self, ms: u64) {
        self.now_us.fetch_add(ms.saturating_mul(1000), Ordering::Relaxed);
    }
}

impl Clock for ManualClock {
    fn millis(&self) -> u64 {
        self.now_us.load(Ordering::Relaxed) / 1000
    }

    fn micros(&self) -> u64 {
        self.now_us.load(Ordering::Relaxed)
    }

    fn delay(&self, ms: u64) {
        self.advance(ms);
    }
}
