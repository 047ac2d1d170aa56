//! Default controller layout applied whenever the grid is rebuilt

use crate::action::Action;
use crate::control::{Button, Color, LedPair};

/// Pad that blinks with the beat while the clock runs
pub const HEARTBEAT_PAD: u8 = 63;

/// Function buttons wired to the transport
pub const TOGGLE_BUTTON: u8 = 8;
pub const RESET_BUTTON: u8 = 9;
pub const REWIND_BUTTON: u8 = 10;
pub const FORWARD_BUTTON: u8 = 11;

/// Ticks scrubbed per rewind/forward press
pub const TRANSPORT_WARP_STEP: u64 = 50;

pub(crate) fn apply_default_layout(grid: &mut [Button], special: &mut [Button]) {
    if let Some(pad) = grid.get_mut(HEARTBEAT_PAD as usize) {
        pad.set_leds(LedPair::of(Color::Mint));
    }

    let transport_actions = [
        (TOGGLE_BUTTON, Action::ClockToggleLock),
        (RESET_BUTTON, Action::ClockReset),
        (
            REWIND_BUTTON,
            Action::ClockWarp {
                step: TRANSPORT_WARP_STEP,
                reverse: true,
            },
        ),
        (
            FORWARD_BUTTON,
            Action::ClockWarp {
                step: TRANSPORT_WARP_STEP,
                reverse: false,
            },
        ),
    ];

    for (identity, action) in transport_actions {
        if let Some(button) = special.get_mut(identity as usize) {
            button.set_action(action);
        }
    }
}
