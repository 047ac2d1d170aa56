use tracing::{debug, info};

use crate::sequencing::Tempo;

/// A warp asked for from inside a tick, executed by the clock once the
/// current tick's listeners have run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WarpRequest {
    pub step: u64,
    pub reverse: bool,
}

/// The mutable half of the clock that listeners, actions and cues may touch.
///
/// Holds the logical timeline position and the lock/warp flags. Tick
/// scheduling and listener bookkeeping stay inside [`Clock`](super::Clock).
#[derive(Debug, Clone)]
pub struct Transport {
    tempo: Tempo,
    tick_no: u64,
    locked: bool,
    warping: bool,
    pending_warp: Option<WarpRequest>,
}

impl Transport {
    pub fn new(tempo: Tempo) -> Self {
        Self {
            tempo,
            tick_no: 0,
            locked: false,
            warping: false,
            pending_warp: None,
        }
    }

    pub fn tempo(&self) -> Tempo {
        self.tempo
    }

    /// Pulses per quarter note
    pub fn ppq(&self) -> u32 {
        self.tempo.ppq()
    }

    /// Current logical position
    pub fn tick_no(&self) -> u64 {
        self.tick_no
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// True while a warp is replaying ticks
    pub fn is_warping(&self) -> bool {
        self.warping
    }

    /// Freeze timeline advancement (rendering keeps running)
    pub fn lock(&mut self) {
        self.locked = true;
    }

    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Flip the lock flag and return the new value
    pub fn toggle_lock(&mut self) -> bool {
        self.locked = !self.locked;
        info!("{} clock", if self.locked { "Paused" } else { "Started" });
        self.locked
    }

    /// Lock the clock and jump back to tick 0
    pub fn reset(&mut self) {
        info!("Reset clock");
        self.locked = true;
        self.tick_no = 0;
    }

    /// Ask the clock to warp after the current tick.
    ///
    /// Ignored while a warp is already running. Returns whether the request
    /// was accepted.
    pub fn request_warp(&mut self, step: u64, reverse: bool) -> bool {
        if self.warping {
            debug!("Ignoring nested warp request");
            return false;
        }
        self.pending_warp = Some(WarpRequest {
            step: step.max(1),
            reverse,
        });
        true
    }

    pub(crate) fn take_warp_request(&mut self) -> Option<WarpRequest> {
        self.pending_warp.take()
    }

    pub(crate) fn set_warping(&mut self, warping: bool) {
        self.warping = warping;
    }

    pub(crate) fn advance(&mut self) {
        self.tick_no += 1;
    }

    /// Step back one tick. Returns false (and stays at 0) when already at the start.
    pub(crate) fn rewind(&mut self) -> bool {
        match self.tick_no.checked_sub(1) {
            Some(tick_no) => {
                self.tick_no = tick_no;
                true
            }
            None => false,
        }
    }
}

impl Default for Transport {
    fn default() -> Self {
        Self::new(Tempo::default())
    }
}
