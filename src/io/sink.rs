use std::cell::RefCell;
use std::rc::Rc;

use crate::io::midi::MidiEvent;

/// Somewhere control renders are sent: the device itself or the relay port.
///
/// Sinks are fire-and-forget. Transport errors are the sink's business to
/// report; the surface never waits on an acknowledgement.
pub trait DeviceSink {
    fn send(&mut self, event: MidiEvent);

    /// Release the underlying port. Called once during shutdown.
    fn close(&mut self) {
        // Default: nothing to release
    }
}

impl DeviceSink for Box<dyn DeviceSink> {
    fn send(&mut self, event: MidiEvent) {
        (**self).send(event)
    }

    fn close(&mut self) {
        (**self).close()
    }
}

/// Sink that drops everything (relay disabled, benches)
#[derive(Debug, Default, Clone, Copy)]
pub struct NullSink;

impl DeviceSink for NullSink {
    fn send(&mut self, _event: MidiEvent) {}
}

/// Sink that records every message into a shared log.
///
/// Cloning the sink shares the log, so a test can keep one handle and give
/// the other to the surface.
#[derive(Debug, Default, Clone)]
pub struct RecordingSink {
    log: Rc<RefCell<Vec<MidiEvent>>>,
    closed: Rc<RefCell<bool>>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages sent so far
    pub fn events(&self) -> Vec<MidiEvent> {
        self.log.borrow().clone()
    }

    /// Take and clear the recorded messages
    pub fn drain(&self) -> Vec<MidiEvent> {
        std::mem::take(&mut *self.log.borrow_mut())
    }

    pub fn is_closed(&self) -> bool {
        *self.closed.borrow()
    }
}

impl DeviceSink for RecordingSink {
    fn send(&mut self, event: MidiEvent) {
        self.log.borrow_mut().push(event);
    }

    fn close(&mut self) {
        *self.closed.borrow_mut() = true;
    }
}

/// The pair of sinks every control renders into
pub struct Outputs {
    /// The control surface's own LEDs
    pub device: Box<dyn DeviceSink>,
    /// Relayed notes/controllers for downstream software
    pub relay: Box<dyn DeviceSink>,
}

impl Outputs {
    pub fn new(device: impl DeviceSink + 'static, relay: impl DeviceSink + 'static) -> Self {
        Self {
            device: Box::new(device),
            relay: Box::new(relay),
        }
    }

    pub fn close(&mut self) {
        self.device.close();
        self.relay.close();
    }
}
