//! Surface - the device model driven by the clock
//!
//! Binds the grid pads, function buttons and touch strips together. On each
//! tick it drains queued hardware input, applies the timeline slice for the
//! current tick (if it changed), and renders every control.

pub mod layout;

use std::sync::Arc;

use rtrb::{Consumer, Producer, RingBuffer};
use tracing::{debug, warn};

use crate::control::{Button, ButtonState, Control, Palette, RenderCtx, TouchStrip};
use crate::engine::{Tickable, Transport};
use crate::io::{InputEvent, InputKind, Outputs};
use crate::timeline::{ControlKey, Directive, Slice, Timeline};
use crate::{GRID_PADS, SPECIAL_BUTTONS, TOUCH_STRIPS, TOUCH_STRIP_BASE};

pub use layout::HEARTBEAT_PAD;

/// Default capacity of the hardware input queue
pub const INPUT_QUEUE_CAPACITY: usize = 1024;

/// Aggregate model of the control surface
pub struct Surface {
    grid: Vec<Button>,
    special: Vec<Button>,
    strips: Vec<TouchStrip>,
    palette: Palette,
    outputs: Outputs,
    /// Input pushed from the MIDI callback thread, drained at the start of each tick
    inbox: Option<Consumer<InputEvent>>,
    timeline: Option<Arc<Timeline>>,
    /// Slice currently applied to the controls
    applied: Option<Arc<Slice>>,
    /// Tick the timeline was last consulted for
    consulted: Option<u64>,
    heartbeat: Option<u8>,
}

impl Surface {
    pub fn new(outputs: Outputs, palette: Palette) -> Self {
        let mut surface = Self {
            grid: Vec::new(),
            special: Vec::new(),
            strips: Vec::new(),
            palette,
            outputs,
            inbox: None,
            timeline: None,
            applied: None,
            consulted: None,
            heartbeat: Some(HEARTBEAT_PAD),
        };
        surface.reset_grid();
        surface
    }

    /// Choose the beat-blinking pad (None disables the heartbeat)
    pub fn with_heartbeat(mut self, pad: Option<u8>) -> Self {
        self.heartbeat = pad;
        self
    }

    /// Create the input queue. The returned producer goes to the input callback.
    pub fn connect_input(&mut self, capacity: usize) -> Producer<InputEvent> {
        let (tx, rx) = RingBuffer::new(capacity);
        self.inbox = Some(rx);
        tx
    }

    pub fn activate_timeline(&mut self, timeline: impl Into<Arc<Timeline>>) {
        self.timeline = Some(timeline.into());
        self.applied = None;
        self.consulted = None;
    }

    /// Rebuild every control in its default layout
    pub fn reset_grid(&mut self) {
        self.grid = (0..GRID_PADS).map(Button::pad).collect();
        self.special = (0..SPECIAL_BUTTONS).map(Button::cc).collect();
        self.strips = (0..TOUCH_STRIPS)
            .map(|i| TouchStrip::new(TOUCH_STRIP_BASE + i))
            .collect();
        layout::apply_default_layout(&mut self.grid, &mut self.special);
        self.applied = None;
        self.consulted = None;
    }

    pub fn pad(&self, identity: u8) -> Option<&Button> {
        self.grid.get(identity as usize)
    }

    pub fn special(&self, identity: u8) -> Option<&Button> {
        self.special.get(identity as usize)
    }

    /// Touch strip by controller number
    pub fn strip(&self, identity: u8) -> Option<&TouchStrip> {
        let index = identity.checked_sub(TOUCH_STRIP_BASE)?;
        self.strips.get(index as usize)
    }

    pub fn applied_slice(&self) -> Option<&Slice> {
        self.applied.as_deref()
    }

    fn button_mut(&mut self, key: ControlKey) -> Option<&mut Button> {
        match key {
            ControlKey::Pad(n) => self.grid.get_mut(n as usize),
            ControlKey::Special(n) => self.special.get_mut(n as usize),
        }
    }

    /// Route a hardware event to its control. Returns false if nothing owns it.
    pub fn dispatch(&mut self, event: InputEvent) -> bool {
        let id = event.identity;
        let control: Option<&mut dyn Control> = match event.kind {
            InputKind::Note => self.grid.get_mut(id as usize).map(|c| c as &mut dyn Control),
            InputKind::ControlChange if id < SPECIAL_BUTTONS => {
                self.special.get_mut(id as usize).map(|c| c as &mut dyn Control)
            }
            InputKind::ControlChange if id >= TOUCH_STRIP_BASE => self
                .strips
                .get_mut((id - TOUCH_STRIP_BASE) as usize)
                .map(|c| c as &mut dyn Control),
            InputKind::ControlChange => None,
        };

        match control {
            Some(control) => {
                control.update(event.value);
                true
            }
            None => {
                warn!(?event, "Unhandled input event");
                false
            }
        }
    }

    fn drain_inbox(&mut self) {
        let Some(mut inbox) = self.inbox.take() else {
            return;
        };
        while let Ok(event) = inbox.pop() {
            self.dispatch(event);
        }
        self.inbox = Some(inbox);
    }

    /// Apply the slice scheduled at `tick_no`, if any and if it differs from
    /// the one already applied.
    fn apply_timeline(&mut self, tick_no: u64) {
        let Some(timeline) = self.timeline.clone() else {
            return;
        };
        if self.consulted == Some(tick_no) {
            return;
        }
        self.consulted = Some(tick_no);

        let Some(slice) = timeline.get(tick_no) else {
            return;
        };
        // Equal slices at different ticks are treated as the same slice
        if self.applied.as_deref() == Some(&**slice) {
            debug!(tick_no, "Slice unchanged");
            return;
        }

        if let Some(previous) = self.applied.take() {
            for (key, directive) in previous.iter() {
                if directive.sticky {
                    continue;
                }
                if let Some(button) = self.button_mut(key) {
                    button.reset();
                }
            }
        }

        for (key, directive) in slice.iter() {
            if let Some(button) = self.button_mut(key) {
                configure(button, directive);
            }
        }
        debug!(tick_no, directives = slice.len(), "Applied slice");
        self.applied = Some(Arc::clone(slice));
    }

    fn beat(&mut self, tick_no: u64, transport: &Transport) {
        let Some(pad) = self.heartbeat.and_then(|pad| self.grid.get_mut(pad as usize)) else {
            return;
        };
        if transport.is_locked() {
            return;
        }
        let ppq = transport.ppq().max(1) as u64;
        let state = if (tick_no / ppq) % 2 == 0 {
            ButtonState::Active
        } else {
            ButtonState::Inactive
        };
        pad.set_state(state);
    }

    /// Render every control (only dirty or changed ones emit output)
    pub fn render(&mut self, transport: &mut Transport) -> usize {
        let mut ctx = RenderCtx {
            palette: &self.palette,
            outputs: &mut self.outputs,
            transport,
        };

        let mut rendered = 0;
        for button in self.grid.iter_mut().chain(self.special.iter_mut()) {
            rendered += button.tick(&mut ctx) as usize;
        }
        for strip in &mut self.strips {
            rendered += strip.tick(&mut ctx) as usize;
        }
        rendered
    }
}

fn configure(button: &mut Button, directive: &Directive) {
    button.set_leds(directive.leds);
    button.set_routing(directive.routing.clone());
    button.set_action(directive.action.clone());
    button.set_channel(directive.channel);
    button.mark_dirty();
}

impl Tickable for Surface {
    fn tick(&mut self, tick_no: u64, transport: &mut Transport) {
        self.drain_inbox();
        self.apply_timeline(tick_no);
        self.beat(tick_no, transport);
        self.render(transport);
    }

    /// Reset every control, render the cleared state once and close the sinks
    fn shutdown(&mut self, transport: &mut Transport) {
        for button in self.grid.iter_mut().chain(self.special.iter_mut()) {
            button.reset();
        }
        for strip in &mut self.strips {
            strip.reset();
        }
        self.render(transport);
        self.outputs.close();
    }
}
