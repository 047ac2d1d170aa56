use std::time::Duration;

/// Tempo and tick resolution of the clock.
///
/// The clock runs at `bpm * ppq` ticks per minute, so one tick lasts
/// `60 / (bpm * ppq)` seconds.
///
/// Fields are only set through [`Tempo::new`], so the tick length is always
/// finite and representable as a [`Duration`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tempo {
    bpm: f64,
    ppq: u32,
}

impl Tempo {
    pub const DEFAULT_BPM: f64 = 120.0;
    pub const DEFAULT_PPQ: u32 = 24;
    pub const MIN_BPM: f64 = 0.001;
    pub const MAX_BPM: f64 = 100_000.0;

    /// Create a tempo. Non-positive or non-finite values fall back to the
    /// defaults, anything else is clamped to `MIN_BPM..=MAX_BPM`.
    pub fn new(bpm: f64, ppq: u32) -> Self {
        let bpm = if bpm.is_finite() && bpm > 0.0 {
            bpm.clamp(Self::MIN_BPM, Self::MAX_BPM)
        } else {
            Self::DEFAULT_BPM
        };
        let ppq = if ppq == 0 { Self::DEFAULT_PPQ } else { ppq };
        Self { bpm, ppq }
    }

    /// Tempo in beats per minute
    pub fn bpm(&self) -> f64 {
        self.bpm
    }

    /// Pulses per quarter note (tick resolution)
    pub fn ppq(&self) -> u32 {
        self.ppq
    }

    /// Ticks per second
    pub fn rate(&self) -> f64 {
        // ticks per second = (bpm / 60) * ppq
        (self.bpm / 60.0) * self.ppq as f64
    }

    /// Length of one tick in seconds
    pub fn tick_seconds(&self) -> f64 {
        60.0 / (self.bpm * self.ppq as f64)
    }

    /// Length of one tick, never shorter than a nanosecond
    pub fn tick_length(&self) -> Duration {
        Duration::try_from_secs_f64(self.tick_seconds())
            .unwrap_or(Duration::MAX)
            .max(Duration::from_nanos(1))
    }

    /// Convert a wall-clock span into the nearest whole tick index
    pub fn seconds_to_ticks(&self, seconds: f64) -> u64 {
        (seconds / self.tick_seconds()).round().max(0.0) as u64
    }

    pub fn ticks_to_seconds(&self, ticks: u64) -> f64 {
        ticks as f64 * self.tick_seconds()
    }
}

impl Default for Tempo {
    fn default() -> Self {
        Self {
            bpm: Self::DEFAULT_BPM,
            ppq: Self::DEFAULT_PPQ,
        }
    }
}
