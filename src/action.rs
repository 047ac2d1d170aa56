//! Behaviors attached to buttons, run when the button renders.
//!
//! An action sees the state the button is about to render and returns the
//! state to actually render. Clock side effects go through the
//! [`Transport`] handed in, and are complete before the render happens.

use tracing::info;

use crate::control::ButtonState;
use crate::engine::Transport;
use crate::sequencing::WarpStep;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Action {
    /// Render the state unchanged
    #[default]
    Noop,
    /// Log a message when pressed
    Print(String),
    /// Pause/resume the timeline
    ClockToggleLock,
    /// Lock the clock and return to tick 0
    ClockReset,
    /// Scrub the timeline by `step` ticks
    ClockWarp { step: u64, reverse: bool },
}

impl Action {
    /// Warp action with the step resolved against `ppq` (at least 1 tick)
    pub fn warp(step: impl Into<WarpStep>, reverse: bool, ppq: u32) -> Self {
        Action::ClockWarp {
            step: step.into().to_ticks(ppq),
            reverse,
        }
    }

    /// Parse a timeline command string.
    ///
    /// Accepted forms: `print <message>`, `[clock] toggle`, `[clock] reset`,
    /// `[clock] forward <step>`, `[clock] rewind <step>`. Steps are tick
    /// counts or decimal beat fractions.
    pub fn from_command(command: &str, ppq: u32) -> Option<Self> {
        let mut tokens = command.split_whitespace().peekable();

        if tokens.peek() == Some(&"print") {
            tokens.next();
            return Some(Action::Print(tokens.collect::<Vec<_>>().join(" ")));
        }

        if tokens.peek() == Some(&"clock") {
            tokens.next();
        }

        let action = match (tokens.next()?, tokens.next()) {
            ("toggle", None) => Action::ClockToggleLock,
            ("reset", None) => Action::ClockReset,
            ("forward", Some(step)) => Action::warp(WarpStep::parse(step)?, false, ppq),
            ("rewind", Some(step)) => Action::warp(WarpStep::parse(step)?, true, ppq),
            _ => return None,
        };

        match tokens.next() {
            Some(_) => None,
            None => Some(action),
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, Action::Noop)
    }

    /// Run the action for a button about to render `state`
    pub fn apply(&self, state: ButtonState, transport: &mut Transport) -> ButtonState {
        if state != ButtonState::Active {
            return state;
        }

        match self {
            Action::Noop => {}
            Action::Print(message) => {
                info!(target: "traffic_jam::print", "{message}");
            }
            Action::ClockToggleLock => {
                transport.toggle_lock();
            }
            Action::ClockReset => transport.reset(),
            Action::ClockWarp { step, reverse } => {
                if !transport.is_warping() {
                    transport.request_warp(*step, *reverse);
                }
            }
        }

        state
    }
}
