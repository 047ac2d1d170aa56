//! Real-time tick scheduling.
//!
//! [`Clock`] owns the tick cadence, one-shot [`Cue`]s and the registered
//! [`Tickable`] listeners. Everything a listener is allowed to change about
//! the clock lives on [`Transport`], which is handed to listeners, actions
//! and cues by mutable reference instead of being global state.

pub mod clock;
pub mod cue;
pub mod load;
pub mod time;
pub mod transport;

pub use clock::{Clock, ClockStats};
pub use cue::Cue;
pub use load::LoadMonitor;
pub use time::{ManualTime, SystemTime, TimeSource};
pub use transport::{Transport, WarpRequest};

/// Something driven by the clock on every tick
pub trait Tickable {
    /// Called once per tick pass with the current timeline position
    fn tick(&mut self, tick_no: u64, transport: &mut Transport);

    /// Called once when the host loop is shutting down
    ///
    /// Default implementation does nothing.
    fn shutdown(&mut self, _transport: &mut Transport) {
        // Default: do nothing
    }
}

/// Allow boxed listeners to be registered directly
impl Tickable for Box<dyn Tickable> {
    fn tick(&mut self, tick_no: u64, transport: &mut Transport) {
        (**self).tick(tick_no, transport)
    }

    fn shutdown(&mut self, transport: &mut Transport) {
        (**self).shutdown(transport)
    }
}
