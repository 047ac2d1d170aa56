//! The schedule: a sparse map from tick to the directives applied at that tick.
//!
//! A timeline is built once (from a YAML document or with
//! [`TimelineBuilder`]) and is read-only afterwards. Every directive is fully
//! populated at build time so the tick path never sees a partial entry.

pub mod builder;
pub mod directive;
pub mod document;
pub mod error;

pub use builder::TimelineBuilder;
pub use directive::Directive;
pub use error::TimelineError;

use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::sequencing::{NoteDb, Tempo};
use crate::{GRID_PADS, SPECIAL_BUTTONS};

/// Which control a directive targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ControlKey {
    /// Grid pad by note number
    Pad(u8),
    /// Function button by controller number (`ccN` in documents)
    Special(u8),
}

impl ControlKey {
    /// Parse `"12"` or `"cc8"`
    pub fn parse(key: &str) -> Option<Self> {
        let key = key.trim();
        match key.strip_prefix("cc") {
            Some(number) => number.parse().ok().map(ControlKey::Special),
            None => key.parse().ok().map(ControlKey::Pad),
        }
    }

    /// Note or controller number on the device
    pub fn identity(&self) -> u8 {
        match *self {
            ControlKey::Pad(n) | ControlKey::Special(n) => n,
        }
    }

    /// Whether the surface has such a control
    pub fn is_on_surface(&self) -> bool {
        match *self {
            ControlKey::Pad(n) => n < GRID_PADS,
            ControlKey::Special(n) => n < SPECIAL_BUTTONS,
        }
    }
}

impl fmt::Display for ControlKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlKey::Pad(n) => write!(f, "{n}"),
            ControlKey::Special(n) => write!(f, "cc{n}"),
        }
    }
}

/// The directives applied together at one tick
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Slice {
    directives: BTreeMap<ControlKey, Directive>,
}

impl Slice {
    pub fn get(&self, key: ControlKey) -> Option<&Directive> {
        self.directives.get(&key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (ControlKey, &Directive)> {
        self.directives.iter().map(|(key, directive)| (*key, directive))
    }

    pub fn len(&self) -> usize {
        self.directives.len()
    }

    pub fn is_empty(&self) -> bool {
        self.directives.is_empty()
    }

    pub(crate) fn insert(&mut self, key: ControlKey, directive: Directive) {
        self.directives.insert(key, directive);
    }
}

/// Immutable tick-indexed schedule
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    slices: BTreeMap<u64, Arc<Slice>>,
}

impl Timeline {
    pub fn builder() -> TimelineBuilder {
        TimelineBuilder::new()
    }

    /// Load a YAML timeline document
    pub fn load(
        path: impl AsRef<Path>,
        tempo: Tempo,
        notes: &NoteDb,
    ) -> Result<Self, TimelineError> {
        document::load(path.as_ref(), tempo, notes)
    }

    /// Parse a YAML timeline from a string
    pub fn from_yaml_str(text: &str, tempo: Tempo, notes: &NoteDb) -> Result<Self, TimelineError> {
        document::parse(text, tempo, notes)
    }

    /// Slice scheduled exactly at `tick`
    pub fn get(&self, tick: u64) -> Option<&Arc<Slice>> {
        self.slices.get(&tick)
    }

    /// Scheduled ticks in ascending order
    pub fn ticks(&self) -> impl Iterator<Item = u64> + '_ {
        self.slices.keys().copied()
    }

    pub fn last_tick(&self) -> Option<u64> {
        self.slices.keys().next_back().copied()
    }

    pub fn len(&self) -> usize {
        self.slices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_control_keys() {
        assert_eq!(ControlKey::parse("12"), Some(ControlKey::Pad(12)));
        assert_eq!(ControlKey::parse("cc8"), Some(ControlKey::Special(8)));
        assert_eq!(ControlKey::parse("cc"), None);
        assert_eq!(ControlKey::parse("pad"), None);
        assert_eq!(ControlKey::parse("300"), None);
    }

    #[test]
    fn surface_ranges() {
        assert!(ControlKey::Pad(63).is_on_surface());
        assert!(!ControlKey::Pad(64).is_on_surface());
        assert!(ControlKey::Special(15).is_on_surface());
        assert!(!ControlKey::Special(16).is_on_surface());
    }

    #[test]
    fn display_matches_document_syntax() {
        assert_eq!(ControlKey::Pad(4).to_string(), "4");
        assert_eq!(ControlKey::Special(9).to_string(), "cc9");
    }
}
