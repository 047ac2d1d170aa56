use crate::io::midi::MidiEvent;

/// Which message family an input event arrived as
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    Note,
    ControlChange,
}

/// A hardware input event, reduced to what the surface dispatches on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: InputKind,
    /// Note or controller number
    pub identity: u8,
    /// Velocity or controller value
    pub value: u8,
    pub channel: u8,
}

impl InputEvent {
    pub fn note(identity: u8, value: u8) -> Self {
        Self {
            kind: InputKind::Note,
            identity,
            value,
            channel: 0,
        }
    }

    pub fn control_change(identity: u8, value: u8) -> Self {
        Self {
            kind: InputKind::ControlChange,
            identity,
            value,
            channel: 0,
        }
    }
}

/// Reduce a decoded MIDI message to a surface input event.
///
/// Note-off is delivered as a note with value 0 so pads release the same way
/// whether the device sends note-off or a zero-velocity note-on.
pub fn midi_to_input(midi: MidiEvent) -> InputEvent {
    match midi {
        MidiEvent::NoteOn {
            channel,
            key,
            velocity,
        } => InputEvent {
            kind: InputKind::Note,
            identity: key,
            value: velocity,
            channel,
        },
        MidiEvent::NoteOff { channel, key, .. } => InputEvent {
            kind: InputKind::Note,
            identity: key,
            value: 0,
            channel,
        },
        MidiEvent::ControlChange {
            channel,
            controller,
            value,
        } => InputEvent {
            kind: InputKind::ControlChange,
            identity: controller,
            value,
            channel,
        },
    }
}

/// Decode raw bytes straight into an input event
pub fn bytes_to_input(bytes: &[u8]) -> Option<InputEvent> {
    MidiEvent::from_bytes(bytes).map(midi_to_input)
}
