use std::cell::Cell;
use std::rc::Rc;
use std::time::{Duration, Instant};

/// Wall-clock provider for the clock's deadlines
pub trait TimeSource {
    fn now(&self) -> Instant;

    /// Block until `duration` has elapsed
    fn sleep(&self, duration: Duration);
}

/// The real monotonic clock
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemTime;

impl TimeSource for SystemTime {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        if !duration.is_zero() {
            std::thread::sleep(duration);
        }
    }
}

/// Simulated time that only moves when told to.
///
/// Clones share the same timeline, so a test can hold one handle while the
/// clock owns another. `sleep` advances time instantly.
#[derive(Debug, Clone)]
pub struct ManualTime {
    origin: Instant,
    elapsed: Rc<Cell<Duration>>,
}

impl ManualTime {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
            elapsed: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    pub fn advance(&self, duration: Duration) {
        self.elapsed.set(self.elapsed.get() + duration);
    }

    /// Total simulated time since creation
    pub fn elapsed(&self) -> Duration {
        self.elapsed.get()
    }
}

impl Default for ManualTime {
    fn default() -> Self {
        Self::new()
    }
}

impl TimeSource for ManualTime {
    fn now(&self) -> Instant {
        self.origin + self.elapsed.get()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration);
    }
}
