//! Clock - fixed-rate tick scheduler
//!
//! The host loop asks the clock how long until the next tick is due, sleeps,
//! and asks again. Each due tick fires expired cues, then drives every
//! registered listener. Falling behind is corrected by re-anchoring the
//! deadline to "now" rather than replaying missed ticks.

use std::mem;
use std::time::{Duration, Instant};

use tracing::{info, warn};

use super::cue::Cue;
use super::load::LoadMonitor;
use super::time::{SystemTime, TimeSource};
use super::transport::Transport;
use super::Tickable;
use crate::sequencing::Tempo;

/// Counters describing how the clock has been keeping up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ClockStats {
    /// Tick passes executed (including warped ones)
    pub ticks: u64,
    /// Deadlines that were already missed when computed
    pub late: u64,
    /// Times the deadline was re-anchored to the current time
    pub catch_ups: u64,
}

/// Fixed-rate tick scheduler
pub struct Clock<T: TimeSource = SystemTime> {
    transport: Transport,
    /// Wall-clock length of one tick
    tick_length: Duration,
    /// Absolute deadline of the next tick
    next_due: Instant,
    /// Set after the first on-time tick; lateness is only reported afterwards
    started: bool,
    cues: Vec<Cue>,
    tickables: Vec<Box<dyn Tickable>>,
    load: LoadMonitor,
    stats: ClockStats,
    time: T,
}

impl Clock<SystemTime> {
    /// Create a clock running on the system monotonic clock
    pub fn new(tempo: Tempo) -> Self {
        Self::with_time_source(tempo, SystemTime)
    }
}

impl<T: TimeSource> Clock<T> {
    /// Create a clock reading time from `time`. The first tick is due immediately.
    pub fn with_time_source(tempo: Tempo, time: T) -> Self {
        let next_due = time.now();
        Self {
            transport: Transport::new(tempo),
            tick_length: tempo.tick_length(),
            next_due,
            started: false,
            cues: Vec::new(),
            tickables: Vec::new(),
            load: LoadMonitor::default(),
            stats: ClockStats::default(),
            time,
        }
    }

    /// Start locked (timeline frozen until unlocked)
    pub fn locked(mut self, locked: bool) -> Self {
        if locked {
            self.transport.lock();
        } else {
            self.transport.unlock();
        }
        self
    }

    /// Replace the load report interval
    pub fn load_report_interval(mut self, interval: Duration) -> Self {
        self.load = LoadMonitor::new(interval);
        self
    }

    pub fn tempo(&self) -> Tempo {
        self.transport.tempo()
    }

    pub fn tick_length(&self) -> Duration {
        self.tick_length
    }

    pub fn tick_no(&self) -> u64 {
        self.transport.tick_no()
    }

    pub fn is_locked(&self) -> bool {
        self.transport.is_locked()
    }

    pub fn is_warping(&self) -> bool {
        self.transport.is_warping()
    }

    pub fn transport(&self) -> &Transport {
        &self.transport
    }

    pub fn transport_mut(&mut self) -> &mut Transport {
        &mut self.transport
    }

    pub fn stats(&self) -> ClockStats {
        self.stats
    }

    /// Deadline of the next tick
    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Number of cues still waiting to fire
    pub fn pending_cues(&self) -> usize {
        self.cues.len()
    }

    pub fn lock(&mut self) {
        self.transport.lock();
    }

    pub fn unlock(&mut self) {
        self.transport.unlock();
    }

    pub fn toggle_lock(&mut self) -> bool {
        self.transport.toggle_lock()
    }

    /// Add a listener driven on every tick, after those already registered
    pub fn register(&mut self, tickable: impl Tickable + 'static) {
        self.tickables.push(Box::new(tickable));
    }

    /// Schedule a one-shot callback.
    ///
    /// With `absolute` false the cue is due `when` ticks from now, otherwise
    /// at tick `when`.
    pub fn register_cue(
        &mut self,
        when: u64,
        action: impl FnOnce(&mut Transport) + 'static,
        absolute: bool,
    ) {
        let due = if absolute {
            when
        } else {
            self.transport.tick_no().saturating_add(when)
        };
        self.cues.push(Cue::new(due, action));
    }

    /// Return how long until the next tick, running it first if it is due.
    ///
    /// Returns zero when the tick was overdue and the deadline had to be
    /// re-anchored to the current time.
    pub fn poll(&mut self) -> Duration {
        let now = self.time.now();
        if now < self.next_due {
            return self.next_due - now;
        }

        self.tick();
        let busy = self.time.now().saturating_duration_since(now);
        if let Some(load) = self.load.record(self.time.now(), busy) {
            info!("Tick load: {load:.2}%");
        }

        if !self.transport.is_locked() {
            self.transport.advance();
        }

        self.next_due += self.tick_length;
        if now > self.next_due {
            self.stats.late += 1;
            if self.started {
                let late_by = now - self.next_due;
                warn!(
                    "Running late by {:.2} seconds, catching up (next tick = now)",
                    late_by.as_secs_f64()
                );
            }
            self.next_due = now;
            self.stats.catch_ups += 1;
            return Duration::ZERO;
        }

        self.started = true;
        self.next_due - now
    }

    /// Wait until the next tick is due (or run it if it already is)
    pub fn once(&mut self) {
        let wait = self.poll();
        self.time.sleep(wait);
    }

    /// Run one tick pass: expired cues first, then every listener.
    ///
    /// Does not move the timeline position; `poll` and `warp` do that.
    pub fn tick(&mut self) {
        let tick_no = self.transport.tick_no();

        let (due, pending): (Vec<Cue>, Vec<Cue>) = mem::take(&mut self.cues)
            .into_iter()
            .partition(|cue| cue.is_due(tick_no));
        self.cues = pending;
        for cue in due {
            cue.fire(&mut self.transport);
        }

        let tick_no = self.transport.tick_no();
        for tickable in &mut self.tickables {
            tickable.tick(tick_no, &mut self.transport);
        }

        self.stats.ticks += 1;

        if let Some(request) = self.transport.take_warp_request() {
            self.warp(request.step, request.reverse);
        }
    }

    /// Replay `step` ticks back-to-back without waiting.
    ///
    /// Moves forward, or backward when `reverse`; rewinding stops early at
    /// tick 0. Warps requested by listeners during the replay are ignored.
    pub fn warp(&mut self, step: u64, reverse: bool) {
        if self.transport.is_warping() {
            return;
        }

        let from = self.transport.tick_no();
        self.transport.set_warping(true);
        for _ in 0..step {
            self.tick();
            if reverse {
                if !self.transport.rewind() {
                    break;
                }
            } else {
                self.transport.advance();
            }
        }
        self.transport.set_warping(false);

        info!(
            "Warped {} from tick {} to tick {}",
            if reverse { "backward" } else { "forward" },
            from,
            self.transport.tick_no()
        );
    }

    /// Let every listener wind down (reset and render its final state)
    pub fn shutdown(&mut self) {
        for tickable in &mut self.tickables {
            tickable.shutdown(&mut self.transport);
        }
    }
}
