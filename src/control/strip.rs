use super::{Control, RenderCtx};
use crate::io::MidiEvent;

/// Continuous touch strip: the raw 0-127 value is mirrored to the device and the relay
#[derive(Debug, Clone)]
pub struct TouchStrip {
    identity: u8,
    value: u8,
    rendered: Option<u8>,
    dirty: bool,
}

impl TouchStrip {
    pub fn new(identity: u8) -> Self {
        Self {
            identity,
            value: 0,
            rendered: None,
            dirty: true,
        }
    }

    pub fn value(&self) -> u8 {
        self.value
    }
}

impl Control for TouchStrip {
    fn identity(&self) -> u8 {
        self.identity
    }

    fn update(&mut self, value: u8) {
        self.value = value & 0x7F;
        self.dirty = true;
    }

    fn tick(&mut self, ctx: &mut RenderCtx<'_>) -> bool {
        if !self.dirty && self.rendered == Some(self.value) {
            return false;
        }

        let event = MidiEvent::control_change(0, self.identity, self.value);
        ctx.outputs.device.send(event);
        ctx.outputs.relay.send(event);

        self.dirty = false;
        self.rendered = Some(self.value);
        true
    }

    fn reset(&mut self) {
        self.value = 0;
        self.rendered = None;
        self.dirty = true;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }
}
