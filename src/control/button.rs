use tracing::trace;

use super::{ButtonState, Control, LedPair, OutputRouting, RenderCtx};
use crate::action::Action;
use crate::io::MidiEvent;

/// Which message family a button speaks
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ButtonKind {
    /// Grid pad, addressed by note number
    Note,
    /// Toggle-style function button, addressed by controller number
    ControlChange,
}

/// A two-state button with LEDs, optional relay routing and an optional action
#[derive(Debug, Clone)]
pub struct Button {
    kind: ButtonKind,
    identity: u8,
    state: ButtonState,
    /// Last rendered state (None forces a render)
    rendered: Option<ButtonState>,
    dirty: bool,
    leds: LedPair,
    routing: OutputRouting,
    action: Action,
    channel: u8,
}

impl Button {
    fn new(kind: ButtonKind, identity: u8) -> Self {
        Self {
            kind,
            identity,
            state: ButtonState::Inactive,
            rendered: None,
            dirty: true,
            leds: LedPair::OFF,
            routing: OutputRouting::None,
            action: Action::Noop,
            channel: 0,
        }
    }

    /// Grid pad (note messages)
    pub fn pad(identity: u8) -> Self {
        Self::new(ButtonKind::Note, identity)
    }

    /// Function button (control change messages)
    pub fn cc(identity: u8) -> Self {
        Self::new(ButtonKind::ControlChange, identity)
    }

    pub fn kind(&self) -> ButtonKind {
        self.kind
    }

    pub fn state(&self) -> ButtonState {
        self.state
    }

    /// Force the state (used by the heartbeat pad)
    pub fn set_state(&mut self, state: ButtonState) {
        if self.state != state {
            self.state = state;
            self.dirty = true;
        }
    }

    pub fn rendered_state(&self) -> Option<ButtonState> {
        self.rendered
    }

    pub fn leds(&self) -> LedPair {
        self.leds
    }

    pub fn set_leds(&mut self, leds: LedPair) {
        self.leds = leds;
    }

    pub fn routing(&self) -> &OutputRouting {
        &self.routing
    }

    pub fn set_routing(&mut self, routing: OutputRouting) {
        self.routing = routing;
    }

    pub fn action(&self) -> &Action {
        &self.action
    }

    pub fn set_action(&mut self, action: Action) {
        self.action = action;
    }

    pub fn channel(&self) -> u8 {
        self.channel
    }

    pub fn set_channel(&mut self, channel: u8) {
        self.channel = channel;
    }

    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    fn message(&self, channel: u8, target: u8, value: u8) -> MidiEvent {
        match self.kind {
            ButtonKind::Note => MidiEvent::note_on(channel, target, value),
            ButtonKind::ControlChange => MidiEvent::control_change(channel, target, value),
        }
    }
}

impl Control for Button {
    fn identity(&self) -> u8 {
        self.identity
    }

    /// Values other than 0 and 127 are ignored entirely
    fn update(&mut self, value: u8) {
        if let Some(state) = ButtonState::from_value(value) {
            self.state = state;
            self.dirty = true;
        }
    }

    fn tick(&mut self, ctx: &mut RenderCtx<'_>) -> bool {
        if !self.dirty && self.rendered == Some(self.state) {
            return false;
        }

        self.state = self.action.apply(self.state, ctx.transport);

        let led = self.leds.for_state(self.state);
        let color_value = ctx.palette.intensity(led);
        ctx.outputs
            .device
            .send(self.message(0, self.identity, color_value));

        let level = self.state.level();
        match &self.routing {
            // Unrouted function buttons pass themselves through
            OutputRouting::None => {
                if self.kind == ButtonKind::ControlChange {
                    let event = self.message(self.channel, self.identity, level);
                    ctx.outputs.relay.send(event);
                }
            }
            routing => {
                let channel = routing.channel().unwrap_or(self.channel);
                for &target in routing.targets() {
                    let event = self.message(channel, target, level);
                    ctx.outputs.relay.send(event);
                }
            }
        }

        trace!(identity = self.identity, state = ?self.state, "rendered button");
        self.dirty = false;
        self.rendered = Some(self.state);
        true
    }

    fn reset(&mut self) {
        self.state = ButtonState::Inactive;
        self.rendered = None;
        self.dirty = true;
        self.leds = LedPair::OFF;
        self.routing = OutputRouting::None;
        self.action = Action::Noop;
        self.channel = 0;
    }

    fn is_dirty(&self) -> bool {
        self.dirty
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::control::{Color, Palette};
    use crate::engine::Transport;
    use crate::io::{Outputs, RecordingSink};

    struct Rig {
        device: RecordingSink,
        relay: RecordingSink,
        outputs: Outputs,
        palette: Palette,
        transport: Transport,
    }

    impl Rig {
        fn new() -> Self {
            let device = RecordingSink::new();
            let relay = RecordingSink::new();
            Self {
                outputs: Outputs::new(device.clone(), relay.clone()),
                device,
                relay,
                palette: Palette::default(),
                transport: Transport::default(),
            }
        }

        fn tick(&mut self, control: &mut impl Control) -> bool {
            let mut ctx = RenderCtx {
                palette: &self.palette,
                outputs: &mut self.outputs,
                transport: &mut self.transport,
            };
            control.tick(&mut ctx)
        }
    }

    #[test]
    fn test_first_tick_renders_once() {
        let mut rig = Rig::new();
        let mut pad = Button::pad(5);

        assert!(rig.tick(&mut pad));
        assert!(!rig.tick(&mut pad));

        assert_eq!(rig.device.events(), vec![MidiEvent::note_on(0, 5, 0)]);
        // Unrouted pads relay nothing
        assert!(rig.relay.events().is_empty());
        assert!(!pad.is_dirty());
    }

    #[test]
    fn test_press_renders_active_led_and_routing() {
        let mut rig = Rig::new();
        let mut pad = Button::pad(5);
        pad.set_leds(LedPair::of(Color::Red));
        pad.set_routing(OutputRouting::from_targets(vec![60, 64], 2));
        rig.tick(&mut pad);
        rig.device.drain();
        rig.relay.drain();

        pad.update(127);
        assert!(rig.tick(&mut pad));

        assert_eq!(rig.device.events(), vec![MidiEvent::note_on(0, 5, 6)]);
        assert_eq!(
            rig.relay.events(),
            vec![MidiEvent::note_on(2, 60, 127), MidiEvent::note_on(2, 64, 127)]
        );
        assert_eq!(pad.rendered_state(), Some(ButtonState::Active));
    }

    #[test]
    fn test_repeated_update_still_renders_once() {
        let mut rig = Rig::new();
        let mut pad = Button::pad(1);
        rig.tick(&mut pad);

        pad.update(127);
        pad.update(127);
        assert!(rig.tick(&mut pad));
        assert!(!rig.tick(&mut pad));
    }

    #[test]
    fn test_middle_values_are_ignored() {
        let mut pad = Button::pad(1);
        let mut rig = Rig::new();
        rig.tick(&mut pad);
        assert!(!pad.is_dirty());

        pad.update(64);

        assert_eq!(pad.state(), ButtonState::Inactive);
        assert!(!pad.is_dirty());
        assert!(!rig.tick(&mut pad));
    }

    #[test]
    fn test_cc_button_passes_itself_through() {
        let mut rig = Rig::new();
        let mut button = Button::cc(3);
        button.set_channel(4);

        button.update(127);
        rig.tick(&mut button);

        assert_eq!(
            rig.device.events(),
            vec![MidiEvent::control_change(0, 3, 2)]
        );
        assert_eq!(
            rig.relay.events(),
            vec![MidiEvent::control_change(4, 3, 127)]
        );
    }

    #[test]
    fn test_action_runs_before_render() {
        let mut rig = Rig::new();
        let mut button = Button::cc(9);
        button.set_action(Action::ClockReset);
        rig.tick(&mut button);
        assert!(!rig.transport.is_locked());

        button.update(127);
        rig.tick(&mut button);

        assert!(rig.transport.is_locked());
    }

    #[test]
    fn test_reset_clears_configuration_and_renders_once() {
        let mut rig = Rig::new();
        let mut pad = Button::pad(7);
        pad.set_leds(LedPair::of(Color::Blue));
        pad.set_routing(OutputRouting::from_targets(vec![40], 0));
        pad.set_action(Action::Print("hi".into()));
        pad.set_channel(9);
        pad.update(127);
        rig.tick(&mut pad);
        rig.device.drain();

        pad.reset();

        assert_eq!(pad.state(), ButtonState::Inactive);
        assert_eq!(pad.leds(), LedPair::OFF);
        assert!(pad.routing().is_none());
        assert!(pad.action().is_noop());
        assert_eq!(pad.channel(), 0);

        assert!(rig.tick(&mut pad));
        assert!(!rig.tick(&mut pad));
        assert_eq!(rig.device.events(), vec![MidiEvent::note_on(0, 7, 0)]);
    }
}
