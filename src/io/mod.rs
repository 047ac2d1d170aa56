// Purpose - external interfaces: MIDI wire format, input events, output sinks, documents

pub mod converter;
pub mod document;
pub mod midi;
pub mod sink;

pub use converter::{InputEvent, InputKind};
pub use midi::MidiEvent;
pub use sink::{DeviceSink, NullSink, Outputs, RecordingSink};
