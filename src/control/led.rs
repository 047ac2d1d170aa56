use serde::{Deserialize, Serialize};

use super::ButtonState;

/// Pad colors understood by the surface palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Orange,
    LightOrange,
    WarmYellow,
    Yellow,
    Lime,
    Green,
    Mint,
    Cyan,
    Turquoise,
    Blue,
    Plum,
    Violet,
    Purple,
    Magenta,
    Fuchsia,
    White,
}

impl Color {
    pub const ALL: [Color; 18] = [
        Color::Black,
        Color::Red,
        Color::Orange,
        Color::LightOrange,
        Color::WarmYellow,
        Color::Yellow,
        Color::Lime,
        Color::Green,
        Color::Mint,
        Color::Cyan,
        Color::Turquoise,
        Color::Blue,
        Color::Plum,
        Color::Violet,
        Color::Purple,
        Color::Magenta,
        Color::Fuchsia,
        Color::White,
    ];
}

/// Brightness step within a color
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Brightness {
    Dim,
    DimFlash,
    Bright,
    BrightFlash,
}

impl Brightness {
    pub const ALL: [Brightness; 4] = [
        Brightness::Dim,
        Brightness::DimFlash,
        Brightness::Bright,
        Brightness::BrightFlash,
    ];
}

/// What one LED shows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LedState {
    pub color: Color,
    #[serde(rename = "state")]
    pub brightness: Brightness,
}

impl LedState {
    pub const fn new(color: Color, brightness: Brightness) -> Self {
        Self { color, brightness }
    }
}

/// LED appearance for the two button states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedPair {
    pub inactive: LedState,
    pub active: LedState,
}

impl LedPair {
    /// Unconfigured pads are dark
    pub const OFF: LedPair = LedPair::of(Color::Black);

    /// Dim when inactive, bright when active
    pub const fn of(color: Color) -> Self {
        Self {
            inactive: LedState::new(color, Brightness::Dim),
            active: LedState::new(color, Brightness::Bright),
        }
    }

    pub fn for_state(&self, state: ButtonState) -> LedState {
        match state {
            ButtonState::Inactive => self.inactive,
            ButtonState::Active => self.active,
        }
    }
}

impl Default for LedPair {
    fn default() -> Self {
        Self::OFF
    }
}
