use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;

use super::led::{Brightness, Color, LedState};
use crate::io::document::{self, DocumentError};

/// Color lookup table: `(color, brightness) -> LED intensity value`.
///
/// The intensity is the color's base offset plus the brightness increment,
/// clamped to the 7-bit MIDI range.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    colors: HashMap<Color, u8>,
    states: HashMap<Brightness, u8>,
}

/// On-disk palette document
#[derive(Debug, Deserialize)]
struct PaletteDocument {
    colors: HashMap<Color, u8>,
    states: HashMap<Brightness, u8>,
}

impl Palette {
    pub fn new(
        colors: impl IntoIterator<Item = (Color, u8)>,
        states: impl IntoIterator<Item = (Brightness, u8)>,
    ) -> Self {
        Self {
            colors: colors.into_iter().collect(),
            states: states.into_iter().collect(),
        }
    }

    /// Load `{colors: {name: base}, states: {name: increment}}` from YAML.
    ///
    /// Every color and every brightness must have an entry.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DocumentError> {
        let path = path.as_ref();
        let doc: PaletteDocument = document::read_yaml(path)?;
        Self::from_document(doc, path)
    }

    fn from_document(doc: PaletteDocument, path: &Path) -> Result<Self, DocumentError> {
        let missing: Vec<String> = Color::ALL
            .iter()
            .filter(|color| !doc.colors.contains_key(color))
            .map(|color| format!("color {color:?}"))
            .chain(
                Brightness::ALL
                    .iter()
                    .filter(|state| !doc.states.contains_key(state))
                    .map(|state| format!("state {state:?}")),
            )
            .collect();

        if !missing.is_empty() {
            return Err(DocumentError::Incomplete {
                path: path.to_path_buf(),
                missing,
            });
        }
        Ok(Self::new(doc.colors, doc.states))
    }

    /// Raw value to send for an LED. Entries missing from the table read as 0.
    pub fn intensity(&self, led: LedState) -> u8 {
        let base = self.colors.get(&led.color).copied().unwrap_or(0);
        let step = self.states.get(&led.brightness).copied().unwrap_or(0);
        base.saturating_add(step).min(127)
    }
}

impl Default for Palette {
    /// The surface's factory palette: four brightness steps per color
    fn default() -> Self {
        let colors = Color::ALL
            .iter()
            .enumerate()
            .map(|(i, &color)| (color, (i * 4) as u8));
        let states = Brightness::ALL
            .iter()
            .enumerate()
            .map(|(i, &brightness)| (brightness, i as u8));
        Self::new(colors, states)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_palette_layout() {
        let palette = Palette::default();
        assert_eq!(
            palette.intensity(LedState::new(Color::Black, Brightness::Dim)),
            0
        );
        assert_eq!(
            palette.intensity(LedState::new(Color::Red, Brightness::Bright)),
            6
        );
        assert_eq!(
            palette.intensity(LedState::new(Color::White, Brightness::BrightFlash)),
            71
        );
    }

    #[test]
    fn intensity_is_base_plus_increment() {
        let palette = Palette::new([(Color::Orange, 120)], [(Brightness::Bright, 2)]);
        assert_eq!(
            palette.intensity(LedState::new(Color::Orange, Brightness::Bright)),
            122
        );
        // Missing brightness reads as no increment
        assert_eq!(
            palette.intensity(LedState::new(Color::Orange, Brightness::Dim)),
            120
        );
    }

    #[test]
    fn intensity_is_clamped() {
        let palette = Palette::new([(Color::White, 126)], [(Brightness::BrightFlash, 3)]);
        assert_eq!(
            palette.intensity(LedState::new(Color::White, Brightness::BrightFlash)),
            127
        );
    }

    #[test]
    fn document_must_cover_every_entry() {
        let doc: PaletteDocument =
            serde_yaml::from_str("colors: {red: 4}\nstates: {dim: 0}\n").unwrap();
        let err = Palette::from_document(doc, Path::new("partial.yaml")).unwrap_err();

        match err {
            DocumentError::Incomplete { missing, .. } => {
                assert!(missing.contains(&"color Mint".to_string()));
                assert!(missing.contains(&"state Bright".to_string()));
                assert!(!missing.contains(&"color Red".to_string()));
                assert_eq!(missing.len(), Color::ALL.len() - 1 + Brightness::ALL.len() - 1);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn complete_document_loads() {
        let palette = Palette::default();
        let doc = PaletteDocument {
            colors: palette.colors.clone(),
            states: palette.states.clone(),
        };
        assert_eq!(
            Palette::from_document(doc, Path::new("full.yaml")).unwrap(),
            palette
        );
    }

    #[test]
    fn document_rejects_unknown_color() {
        let result: Result<PaletteDocument, _> =
            serde_yaml::from_str("colors: {chartreuse: 4}\nstates: {dim: 0}\n");
        assert!(result.is_err());
    }
}
