use traffic_jam::action::Action;
use traffic_jam::control::{ButtonState, Color, Control, LedPair, OutputRouting, Palette};
use traffic_jam::engine::{Clock, ManualTime, Tickable, TimeSource, Transport};
use traffic_jam::io::{InputEvent, MidiEvent, Outputs, RecordingSink};
use traffic_jam::sequencing::Tempo;
use traffic_jam::surface::layout::{FORWARD_BUTTON, TOGGLE_BUTTON};
use traffic_jam::surface::Surface;
use traffic_jam::timeline::{ControlKey, Directive, Timeline};

struct Rig {
    surface: Surface,
    device: RecordingSink,
    relay: RecordingSink,
    transport: Transport,
}

impl Rig {
    fn new(timeline: Timeline) -> Self {
        let device = RecordingSink::new();
        let relay = RecordingSink::new();
        let mut surface = Surface::new(
            Outputs::new(device.clone(), relay.clone()),
            Palette::default(),
        )
        .with_heartbeat(None);
        surface.activate_timeline(timeline);
        Self {
            surface,
            device,
            relay,
            transport: Transport::default(),
        }
    }

    fn tick(&mut self, tick_no: u64) {
        self.surface.tick(tick_no, &mut self.transport);
    }

    fn clear(&self) {
        self.device.drain();
        self.relay.drain();
    }
}

fn pad(n: u8) -> (ControlKey, Directive) {
    (ControlKey::Pad(n), Directive::for_control(ControlKey::Pad(n)))
}

/// Slice A at tick 0 configures pads 5 (sticky) and 6; slice B at tick 10 only touches pad 7
fn two_slices() -> Timeline {
    let (key5, d5) = pad(5);
    let (key6, d6) = pad(6);
    let (key7, d7) = pad(7);
    Timeline::builder()
        .at(0)
        .directive(
            key5,
            d5.leds(LedPair::of(Color::Blue))
                .routing(vec![40])
                .channel(3)
                .action(Action::Print("five".into()))
                .sticky(true),
        )
        .directive(key6, d6.leds(LedPair::of(Color::Red)).routing(vec![41]))
        .at(10)
        .directive(key7, d7)
        .build()
        .unwrap()
}

#[test]
fn sticky_control_keeps_configuration() {
    let mut rig = Rig::new(two_slices());
    rig.tick(0);
    let before = rig.surface.pad(5).unwrap().clone();

    rig.tick(10);

    let after = rig.surface.pad(5).unwrap();
    assert_eq!(after.leds(), before.leds());
    assert_eq!(after.routing(), before.routing());
    assert_eq!(after.action(), before.action());
    assert_eq!(after.channel(), 3);
    assert_eq!(
        *after.routing(),
        OutputRouting::Single {
            target: 40,
            channel: 3
        }
    );
}

#[test]
fn non_sticky_control_is_reset() {
    let mut rig = Rig::new(two_slices());
    rig.tick(0);
    assert_eq!(rig.surface.pad(6).unwrap().leds(), LedPair::of(Color::Red));

    rig.tick(10);

    let pad6 = rig.surface.pad(6).unwrap();
    assert_eq!(pad6.leds(), LedPair::OFF);
    assert!(pad6.routing().is_none());
    assert!(pad6.action().is_noop());
    assert_eq!(pad6.channel(), 0);

    // Pressing it now relays nothing
    rig.clear();
    rig.surface.dispatch(InputEvent::note(6, 127));
    rig.surface.dispatch(InputEvent::note(5, 127));
    rig.tick(10);
    assert_eq!(rig.relay.events(), vec![MidiEvent::note_on(3, 40, 127)]);
}

#[test]
fn new_slice_controls_render_on_first_tick() {
    let mut rig = Rig::new(two_slices());
    rig.tick(0);
    rig.clear();

    rig.tick(10);

    let device = rig.device.events();
    // Pad 6 renders its reset, pad 7 its new configuration
    assert!(device.contains(&MidiEvent::note_on(0, 6, 0)));
    assert!(device.iter().any(|e| *e == MidiEvent::note_on(0, 7, 8)));
    assert!(!device.iter().any(|e| matches!(e, MidiEvent::NoteOn { key: 5, .. })));
}

#[test]
fn equal_slices_are_not_reapplied() {
    let (key, directive) = pad(2);
    let timeline = Timeline::builder()
        .at(0)
        .directive(key, directive.clone())
        .at(24)
        .directive(key, directive)
        .build()
        .unwrap();
    let mut rig = Rig::new(timeline);
    rig.tick(0);
    rig.clear();

    rig.tick(24);

    assert!(rig.device.events().is_empty());
    assert!(rig.relay.events().is_empty());
}

#[test]
fn middle_values_leave_pads_alone() {
    let mut rig = Rig::new(two_slices());
    rig.tick(0);
    rig.clear();

    rig.surface.dispatch(InputEvent::note(5, 64));

    let pad5 = rig.surface.pad(5).unwrap();
    assert_eq!(pad5.state(), ButtonState::Inactive);
    assert!(!pad5.is_dirty());
    rig.tick(0);
    assert!(rig.device.events().is_empty());
}

fn clock_with_surface() -> (Clock<ManualTime>, ManualTime, rtrb::Producer<InputEvent>) {
    let time = ManualTime::new();
    let mut clock = Clock::with_time_source(Tempo::new(120.0, 24), time.clone());
    let mut surface = Surface::new(
        Outputs::new(RecordingSink::new(), RecordingSink::new()),
        Palette::default(),
    );
    let input = surface.connect_input(64);
    clock.register(surface);
    (clock, time, input)
}

#[test]
fn forward_button_warps_fifty_ticks() {
    let (mut clock, time, mut input) = clock_with_surface();
    clock.warp(10, false);
    assert_eq!(clock.tick_no(), 10);
    let before = time.now();

    input
        .push(InputEvent::control_change(FORWARD_BUTTON, 127))
        .unwrap();
    clock.tick();

    assert_eq!(clock.tick_no(), 60);
    assert_eq!(time.now(), before);
    assert!(!clock.is_warping());

    // Holding the button does not warp again
    clock.tick();
    assert_eq!(clock.tick_no(), 60);
}

#[test]
fn toggle_button_starts_and_stops_the_clock() {
    let (clock, _time, mut input) = clock_with_surface();
    let mut clock = clock.locked(true);
    clock.once();
    assert_eq!(clock.tick_no(), 0);

    input
        .push(InputEvent::control_change(TOGGLE_BUTTON, 127))
        .unwrap();
    clock.once();
    assert!(!clock.is_locked());
    assert_eq!(clock.tick_no(), 1);

    // Releasing does not toggle back
    input
        .push(InputEvent::control_change(TOGGLE_BUTTON, 0))
        .unwrap();

    for _ in 0..5 {
        clock.once();
    }
    assert_eq!(clock.tick_no(), 6);
}
