//! Renderable pieces of device state.
//!
//! Every control follows the same diff-render contract: `update` records new
//! input and marks the control dirty, `tick` renders only when the control is
//! dirty or its state moved away from what was last rendered, and `reset`
//! returns it to the unconfigured default and forces one more render.

pub mod button;
pub mod led;
pub mod palette;
pub mod routing;
pub mod strip;

pub use button::{Button, ButtonKind};
pub use led::{Brightness, Color, LedPair, LedState};
pub use palette::Palette;
pub use routing::OutputRouting;
pub use strip::TouchStrip;

use crate::engine::Transport;
use crate::io::Outputs;

/// Discrete button state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum ButtonState {
    #[default]
    Inactive,
    Active,
}

impl ButtonState {
    /// Map a raw input value. Only 0 and 127 mean anything.
    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            0 => Some(ButtonState::Inactive),
            127 => Some(ButtonState::Active),
            _ => None,
        }
    }

    /// Value relayed downstream for this state
    pub fn level(self) -> u8 {
        match self {
            ButtonState::Inactive => 0,
            ButtonState::Active => 127,
        }
    }
}

/// Everything a control needs while rendering
pub struct RenderCtx<'a> {
    pub palette: &'a Palette,
    pub outputs: &'a mut Outputs,
    pub transport: &'a mut Transport,
}

/// Shared contract of buttons and strips
pub trait Control {
    /// Note or controller number on the device
    fn identity(&self) -> u8;

    /// Apply a raw input value from the device
    fn update(&mut self, value: u8);

    /// Render if needed. Returns whether anything was sent.
    fn tick(&mut self, ctx: &mut RenderCtx<'_>) -> bool;

    /// Restore the unconfigured default and force one more render
    fn reset(&mut self);

    /// Whether the next tick renders regardless of state
    fn is_dirty(&self) -> bool;
}
