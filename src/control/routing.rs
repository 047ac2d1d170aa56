/// Where a button's state is relayed, resolved once when the timeline loads
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OutputRouting {
    /// Not relayed
    #[default]
    None,
    /// One note/controller on a channel
    Single { target: u8, channel: u8 },
    /// Several notes/controllers on one channel (chords)
    Multiple { targets: Vec<u8>, channel: u8 },
}

impl OutputRouting {
    /// Build from a target list: empty is `None`, one target is `Single`
    pub fn from_targets(mut targets: Vec<u8>, channel: u8) -> Self {
        match targets.len() {
            0 => OutputRouting::None,
            1 => OutputRouting::Single {
                target: targets.remove(0),
                channel,
            },
            _ => OutputRouting::Multiple { targets, channel },
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, OutputRouting::None)
    }

    /// Channel of the relayed messages, if routed
    pub fn channel(&self) -> Option<u8> {
        match self {
            OutputRouting::None => None,
            OutputRouting::Single { channel, .. } | OutputRouting::Multiple { channel, .. } => {
                Some(*channel)
            }
        }
    }

    /// Relay targets in order
    pub fn targets(&self) -> &[u8] {
        match self {
            OutputRouting::None => &[],
            OutputRouting::Single { target, .. } => std::slice::from_ref(target),
            OutputRouting::Multiple { targets, .. } => targets,
        }
    }
}
