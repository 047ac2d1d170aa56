use std::time::{Duration, Instant};

/// Tracks how much of the wall clock the tick pass is eating.
///
/// Busy time is accumulated per tick; once `report_interval` has passed the
/// ratio of busy to wall time is returned so the caller can log it.
#[derive(Debug, Clone)]
pub struct LoadMonitor {
    report_interval: Duration,
    window_start: Option<Instant>,
    busy: Duration,
    last_load: Option<f64>,
}

impl LoadMonitor {
    pub const DEFAULT_REPORT_INTERVAL: Duration = Duration::from_secs(10);

    pub fn new(report_interval: Duration) -> Self {
        Self {
            report_interval,
            window_start: None,
            busy: Duration::ZERO,
            last_load: None,
        }
    }

    /// Record one tick that ended at `now` after `busy` of work.
    ///
    /// Returns the load percentage when a report window closes.
    pub fn record(&mut self, now: Instant, busy: Duration) -> Option<f64> {
        let window_start = *self.window_start.get_or_insert(now);
        self.busy += busy;

        let wall = now.saturating_duration_since(window_start);
        if wall < self.report_interval || wall.is_zero() {
            return None;
        }

        let percent = self.busy.as_secs_f64() / wall.as_secs_f64() * 100.0;
        self.window_start = Some(now);
        self.busy = Duration::ZERO;
        self.last_load = Some(percent);
        Some(percent)
    }

    /// Load from the most recent closed window
    pub fn last_load(&self) -> Option<f64> {
        self.last_load
    }
}

impl Default for LoadMonitor {
    fn default() -> Self {
        Self::new(Self::DEFAULT_REPORT_INTERVAL)
    }
}
