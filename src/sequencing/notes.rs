/*
MIDI Note Names
===============

Timeline documents may route a control to notes by name ("C4 E4 G4").
`NoteDb` maps those names to MIDI note numbers.

Middle C (C4) = MIDI note 60, which is the standard reference point.

The MIDI formula: note_number = 12 * (octave + 1) + semitone
Where semitone: C=0, C#=1, D=2, D#=3, E=4, F=5, F#=6, G=7, G#=8, A=9, A#=10, B=11

Names are generated for octaves -1 through 9. Lookups ignore case, so
"Db4", "DB4" and "db4" are the same note. Only numbers below 127 are
generated.
*/

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::io::document::{self, DocumentError};

/// Semitone offsets within one octave (sharps and flats are aliases)
const SEMITONES: &[(&str, u8)] = &[
    ("c", 0),
    ("c#", 1),
    ("db", 1),
    ("d", 2),
    ("d#", 3),
    ("eb", 3),
    ("e", 4),
    ("f", 5),
    ("f#", 6),
    ("gb", 6),
    ("g", 7),
    ("g#", 8),
    ("ab", 8),
    ("a", 9),
    ("a#", 10),
    ("bb", 10),
    ("b", 11),
];

/// Lookup table from note name to MIDI note number
#[derive(Debug, Clone)]
pub struct NoteDb {
    notes: HashMap<String, u8>,
}

impl NoteDb {
    /// Build the table from a semitone map (`name -> 0..=11`)
    pub fn from_semitones<'a>(semitones: impl IntoIterator<Item = (&'a str, u8)>) -> Self {
        let semitones: Vec<(&str, u8)> = semitones.into_iter().collect();
        let mut notes = HashMap::new();

        for (i, step) in (0u16..132).step_by(12).enumerate() {
            let octave = i as i32 - 1;
            for &(name, semitone) in &semitones {
                let number = step + semitone as u16;
                if number >= 127 {
                    continue;
                }
                notes.insert(format!("{}{}", name.to_lowercase(), octave), number as u8);
            }
        }

        Self { notes }
    }

    /// Load a semitone map from a YAML document
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let semitones: BTreeMap<String, u8> = document::read_yaml(path.as_ref())?;
        Ok(Self::from_semitones(
            semitones.iter().map(|(name, semitone)| (name.as_str(), *semitone)),
        ))
    }

    /// Look up a note by name, ignoring case (e.g. "C4", "Eb3")
    pub fn get(&self, name: &str) -> Option<u8> {
        self.notes.get(&name.to_lowercase()).copied()
    }

    pub fn len(&self) -> usize {
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }
}

impl Default for NoteDb {
    fn default() -> Self {
        Self::from_semitones(SEMITONES.iter().copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_c_is_60() {
        let db = NoteDb::default();
        assert_eq!(db.get("C4"), Some(60));
        assert_eq!(db.get("c4"), Some(60));
    }

    #[test]
    fn a440_is_69() {
        assert_eq!(NoteDb::default().get("A4"), Some(69));
    }

    #[test]
    fn octave_minus_one_starts_at_zero() {
        let db = NoteDb::default();
        assert_eq!(db.get("C-1"), Some(0));
        assert_eq!(db.get("B-1"), Some(11));
    }

    #[test]
    fn sharps_and_flats_are_equal() {
        let db = NoteDb::default();
        assert_eq!(db.get("C#4"), db.get("Db4"));
        assert_eq!(db.get("f#2"), db.get("gb2"));
        assert_eq!(db.get("Db4"), Some(61));
        assert_eq!(db.get("Bb3"), Some(58));
    }

    #[test]
    fn lookups_ignore_case() {
        let db = NoteDb::default();
        for name in ["Eb3", "EB3", "eb3", "eB3"] {
            assert_eq!(db.get(name), Some(51), "{name}");
        }
    }

    #[test]
    fn top_of_range_is_excluded() {
        let db = NoteDb::default();
        assert_eq!(db.get("F#9"), Some(126));
        assert_eq!(db.get("G9"), None);
    }

    #[test]
    fn unknown_names_are_none() {
        assert_eq!(NoteDb::default().get("H2"), None);
    }

    #[test]
    fn custom_semitones() {
        let db = NoteDb::from_semitones([("do", 0), ("sol", 7)]);
        assert_eq!(db.get("DO4"), Some(60));
        assert_eq!(db.get("sol4"), Some(67));
        assert_eq!(db.get("C4"), None);
    }
}
