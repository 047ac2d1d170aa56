pub mod action; // Button behaviors (print, clock transport)
pub mod control; // Buttons, strips, LEDs and palettes
pub mod engine; // Tick clock, cues and transport
pub mod io; // MIDI wire format, input events and output sinks
pub mod sequencing; // Tempo math, warp steps and note names
pub mod surface; // The control surface aggregate
pub mod timeline; // Tick-indexed schedule of directives

/// Grid pads, addressed by note numbers 0..64
pub const GRID_PADS: u8 = 64;
/// Function buttons, addressed by controller numbers 0..16
pub const SPECIAL_BUTTONS: u8 = 16;
/// Controller number of the first touch strip
pub const TOUCH_STRIP_BASE: u8 = 48;
pub const TOUCH_STRIPS: u8 = 8;
