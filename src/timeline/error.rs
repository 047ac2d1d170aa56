use super::ControlKey;
use crate::io::document::DocumentError;

/// Problems found while loading a timeline. All of them are reported at load
/// time; a timeline that loads never fails on the tick path.
#[derive(Debug, thiserror::Error)]
pub enum TimelineError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error("Failed to parse timeline")]
    Parse(#[source] serde_yaml::Error),

    #[error("Invalid time key '{key}'")]
    InvalidTime {
        key: String,
        #[source]
        source: humantime::DurationError,
    },

    #[error("Time key '{key}' resolves to tick {tick}, which is already defined")]
    DuplicateTick { key: String, tick: u64 },

    #[error("Unknown control '{key}' at tick {tick}")]
    UnknownControl { tick: u64, key: String },

    #[error("Control {key} at tick {tick} is not on the surface")]
    ControlOutOfRange { tick: u64, key: ControlKey },

    #[error("Unknown action '{command}' for control {key} at tick {tick}")]
    UnknownAction {
        tick: u64,
        key: ControlKey,
        command: String,
    },

    #[error("Unknown note '{name}' for control {key} at tick {tick}")]
    UnknownNote {
        tick: u64,
        key: ControlKey,
        name: String,
    },

    #[error("Note {note} for control {key} at tick {tick} is outside 0-127")]
    NoteOutOfRange { tick: u64, key: ControlKey, note: u64 },

    #[error("Channel {channel} for control {key} at tick {tick} is outside 0-15")]
    ChannelOutOfRange {
        tick: u64,
        key: ControlKey,
        channel: u8,
    },
}
