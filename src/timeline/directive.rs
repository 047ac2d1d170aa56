use super::ControlKey;
use crate::action::Action;
use crate::control::{Brightness, Color, LedPair, LedState, OutputRouting};

/// Fully populated configuration for one control within one slice
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Directive {
    pub leds: LedPair,
    pub routing: OutputRouting,
    pub action: Action,
    pub channel: u8,
    /// Survive slice changes until a later slice targets the control again
    pub sticky: bool,
}

impl Directive {
    /// Default LEDs for scheduled controls: orange, dim when inactive
    pub const DEFAULT_LEDS: LedPair = LedPair {
        inactive: LedState::new(Color::Orange, Brightness::Dim),
        active: LedState::new(Color::Orange, Brightness::Bright),
    };

    /// Defaults for `key`: orange LEDs, relay its own identity on channel 0,
    /// no action, not sticky
    pub fn for_control(key: ControlKey) -> Self {
        Self {
            leds: Self::DEFAULT_LEDS,
            routing: OutputRouting::Single {
                target: key.identity(),
                channel: 0,
            },
            action: Action::Noop,
            channel: 0,
            sticky: false,
        }
    }

    pub fn leds(mut self, leds: LedPair) -> Self {
        self.leds = leds;
        self
    }

    /// Relay targets, sent on the directive's channel
    pub fn routing(mut self, targets: Vec<u8>) -> Self {
        self.routing = OutputRouting::from_targets(targets, self.channel);
        self
    }

    pub fn unrouted(mut self) -> Self {
        self.routing = OutputRouting::None;
        self
    }

    pub fn action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Set the channel (also moves any relay routing to it)
    pub fn channel(mut self, channel: u8) -> Self {
        self.channel = channel;
        self.routing = match self.routing {
            OutputRouting::None => OutputRouting::None,
            OutputRouting::Single { target, .. } => OutputRouting::Single { target, channel },
            OutputRouting::Multiple { targets, .. } => OutputRouting::Multiple { targets, channel },
        };
        self
    }

    pub fn sticky(mut self, sticky: bool) -> Self {
        self.sticky = sticky;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_route_to_own_identity() {
        let directive = Directive::for_control(ControlKey::Pad(12));
        assert_eq!(
            directive.routing,
            OutputRouting::Single {
                target: 12,
                channel: 0
            }
        );
        assert_eq!(directive.leds, Directive::DEFAULT_LEDS);
        assert!(directive.action.is_noop());
        assert!(!directive.sticky);
    }

    #[test]
    fn channel_moves_routing() {
        let directive = Directive::for_control(ControlKey::Special(3))
            .routing(vec![60, 64])
            .channel(5);
        assert_eq!(
            directive.routing,
            OutputRouting::Multiple {
                targets: vec![60, 64],
                channel: 5
            }
        );
    }
}
