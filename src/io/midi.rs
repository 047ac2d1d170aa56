/// Channel voice messages exchanged with the control surface and the relay port.
///
/// Only the messages the surface speaks are modelled. Anything else the
/// device sends (pitch bend, program change, system messages) decodes to
/// `None` and is dropped at the input callback.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MidiEvent {
    NoteOn { channel: u8, key: u8, velocity: u8 },
    NoteOff { channel: u8, key: u8, velocity: u8 },
    ControlChange { channel: u8, controller: u8, value: u8 },
}

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;
const CONTROL_CHANGE: u8 = 0xB0;

impl MidiEvent {
    /// Note-on helper (data bytes are masked to 7 bits)
    pub fn note_on(channel: u8, key: u8, velocity: u8) -> Self {
        MidiEvent::NoteOn {
            channel: channel & 0x0F,
            key: key & 0x7F,
            velocity: velocity & 0x7F,
        }
    }

    /// Control-change helper (data bytes are masked to 7 bits)
    pub fn control_change(channel: u8, controller: u8, value: u8) -> Self {
        MidiEvent::ControlChange {
            channel: channel & 0x0F,
            controller: controller & 0x7F,
            value: value & 0x7F,
        }
    }

    pub fn channel(&self) -> u8 {
        match *self {
            MidiEvent::NoteOn { channel, .. }
            | MidiEvent::NoteOff { channel, .. }
            | MidiEvent::ControlChange { channel, .. } => channel,
        }
    }

    /// Decode a note or control change message.
    ///
    /// Returns `None` for other channel messages, system messages, running
    /// status and truncated input.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        let (&status, data) = bytes.split_first()?;
        let channel = status & 0x0F;
        let data_at = |i: usize| data.get(i).map(|b| b & 0x7F);

        match status & 0xF0 {
            NOTE_OFF => Some(MidiEvent::NoteOff {
                channel,
                key: data_at(0)?,
                velocity: data_at(1)?,
            }),
            NOTE_ON => Some(MidiEvent::NoteOn {
                channel,
                key: data_at(0)?,
                velocity: data_at(1)?,
            }),
            CONTROL_CHANGE => Some(MidiEvent::ControlChange {
                channel,
                controller: data_at(0)?,
                value: data_at(1)?,
            }),
            _ => None,
        }
    }

    /// Encode into the three wire bytes
    pub fn to_bytes(&self) -> [u8; 3] {
        match *self {
            MidiEvent::NoteOff {
                channel,
                key,
                velocity,
            } => [NOTE_OFF | (channel & 0x0F), key & 0x7F, velocity & 0x7F],
            MidiEvent::NoteOn {
                channel,
                key,
                velocity,
            } => [NOTE_ON | (channel & 0x0F), key & 0x7F, velocity & 0x7F],
            MidiEvent::ControlChange {
                channel,
                controller,
                value,
            } => [
                CONTROL_CHANGE | (channel & 0x0F),
                controller & 0x7F,
                value & 0x7F,
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_note_on() {
        assert_eq!(
            MidiEvent::from_bytes(&[0x93, 60, 127]),
            Some(MidiEvent::NoteOn {
                channel: 3,
                key: 60,
                velocity: 127
            })
        );
    }

    #[test]
    fn decodes_control_change() {
        assert_eq!(
            MidiEvent::from_bytes(&[0xB0, 8, 0]),
            Some(MidiEvent::ControlChange {
                channel: 0,
                controller: 8,
                value: 0
            })
        );
    }

    #[test]
    fn rejects_truncated_and_system_messages() {
        assert_eq!(MidiEvent::from_bytes(&[]), None);
        assert_eq!(MidiEvent::from_bytes(&[0x90, 60]), None);
        assert_eq!(MidiEvent::from_bytes(&[0xF8]), None);
    }

    #[test]
    fn ignores_messages_the_surface_does_not_speak() {
        // Pitch bend, program change, aftertouch
        assert_eq!(MidiEvent::from_bytes(&[0xE1, 0x00, 0x40]), None);
        assert_eq!(MidiEvent::from_bytes(&[0xC2, 5]), None);
        assert_eq!(MidiEvent::from_bytes(&[0xA0, 60, 10]), None);
    }

    #[test]
    fn helpers_mask_data_bytes() {
        assert_eq!(
            MidiEvent::control_change(17, 200, 255).to_bytes(),
            [0xB1, 0x48, 0x7F]
        );
    }
}
