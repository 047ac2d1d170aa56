use std::fmt;

use super::transport::Transport;

/// One-shot callback fired once the clock reaches `due`.
pub struct Cue {
    due: u64,
    action: Box<dyn FnOnce(&mut Transport)>,
}

impl Cue {
    pub fn new(due: u64, action: impl FnOnce(&mut Transport) + 'static) -> Self {
        Self {
            due,
            action: Box::new(action),
        }
    }

    /// Tick at (or after) which the cue fires
    pub fn due(&self) -> u64 {
        self.due
    }

    pub fn is_due(&self, tick_no: u64) -> bool {
        self.due <= tick_no
    }

    /// Run the callback, consuming the cue
    pub fn fire(self, transport: &mut Transport) {
        (self.action)(transport)
    }
}

impl fmt::Debug for Cue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Cue").field("due", &self.due).finish_non_exhaustive()
    }
}
