use std::collections::BTreeMap;
use std::sync::Arc;

use super::{ControlKey, Directive, Slice, Timeline, TimelineError};

/// Builder for constructing timelines with a fluent API
///
/// ```
/// use traffic_jam::timeline::{ControlKey, Directive, Timeline};
///
/// let timeline = Timeline::builder()
///     .at(0)
///     .directive(ControlKey::Pad(0), Directive::for_control(ControlKey::Pad(0)).sticky(true))
///     .at(96)
///     .directive(ControlKey::Pad(1), Directive::for_control(ControlKey::Pad(1)))
///     .build()
///     .unwrap();
///
/// assert_eq!(timeline.len(), 2);
/// ```
#[derive(Debug, Default)]
pub struct TimelineBuilder {
    slices: BTreeMap<u64, Slice>,
    cursor: u64, // Tick new directives are added at
}

impl TimelineBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Move to `tick`, creating an (initially empty) slice there
    pub fn at(mut self, tick: u64) -> Self {
        self.cursor = tick;
        self.slices.entry(tick).or_default();
        self
    }

    /// Add a directive to the slice at the current tick
    pub fn directive(mut self, key: ControlKey, directive: Directive) -> Self {
        self.insert(self.cursor, key, directive);
        self
    }

    /// Add a directive at an explicit tick (later inserts for the same control win)
    pub fn insert(&mut self, tick: u64, key: ControlKey, directive: Directive) {
        self.slices.entry(tick).or_default().insert(key, directive);
    }

    /// Create an empty slice at `tick` if none exists
    pub fn touch(&mut self, tick: u64) {
        self.slices.entry(tick).or_default();
    }

    pub fn contains(&self, tick: u64) -> bool {
        self.slices.contains_key(&tick)
    }

    /// Build the final timeline
    /// Returns Result to reject controls that are not on the surface
    pub fn build(self) -> Result<Timeline, TimelineError> {
        for (&tick, slice) in &self.slices {
            if let Some((key, _)) = slice.iter().find(|(key, _)| !key.is_on_surface()) {
                return Err(TimelineError::ControlOutOfRange { tick, key });
            }
        }

        Ok(Timeline {
            slices: self
                .slices
                .into_iter()
                .map(|(tick, slice)| (tick, Arc::new(slice)))
                .collect(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::action::Action;

    #[test]
    fn test_builder_basic() {
        let timeline = TimelineBuilder::new()
            .at(0)
            .directive(ControlKey::Pad(0), Directive::for_control(ControlKey::Pad(0)))
            .directive(ControlKey::Pad(1), Directive::for_control(ControlKey::Pad(1)))
            .at(48)
            .directive(
                ControlKey::Special(8),
                Directive::for_control(ControlKey::Special(8)).action(Action::ClockToggleLock),
            )
            .build()
            .unwrap();

        assert_eq!(timeline.ticks().collect::<Vec<_>>(), vec![0, 48]);
        assert_eq!(timeline.get(0).unwrap().len(), 2);
        assert_eq!(
            timeline.get(48).unwrap().get(ControlKey::Special(8)).unwrap().action,
            Action::ClockToggleLock
        );
        assert_eq!(timeline.last_tick(), Some(48));
        assert!(timeline.get(1).is_none());
    }

    #[test]
    fn test_empty_slice_is_kept() {
        let timeline = TimelineBuilder::new().at(10).build().unwrap();
        assert!(timeline.get(10).unwrap().is_empty());
    }

    #[test]
    fn test_out_of_range_control() {
        let result = TimelineBuilder::new()
            .at(5)
            .directive(ControlKey::Pad(64), Directive::for_control(ControlKey::Pad(64)))
            .build();

        assert!(matches!(
            result,
            Err(TimelineError::ControlOutOfRange {
                tick: 5,
                key: ControlKey::Pad(64)
            })
        ));
    }
}
