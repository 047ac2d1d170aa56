//! YAML timeline documents.
//!
//! ```yaml
//! 0:
//!   0: {note: "C4 E4 G4", channel: 1, sticky: true}
//!   cc8: {action: clock toggle}
//! "1m 30s":
//!   12:
//!     action: print drop incoming
//!     led:
//!       active: {color: red, state: bright}
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use serde::Deserialize;

use super::{ControlKey, Directive, Timeline, TimelineBuilder, TimelineError};
use crate::action::Action;
use crate::control::{Brightness, Color, LedPair, LedState};
use crate::io::document;
use crate::sequencing::{NoteDb, Tempo};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
enum TimeKey {
    Tick(u64),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Deserialize)]
#[serde(untagged)]
enum RawControlKey {
    Number(u64),
    Text(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct DirectiveDocument {
    channel: u8,
    sticky: bool,
    action: Option<String>,
    note: Option<NoteSpec>,
    led: Option<LedDocument>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NoteSpec {
    Number(u64),
    Names(String),
    List(Vec<NoteRef>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum NoteRef {
    Number(u64),
    Name(String),
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct LedDocument {
    active: PartialLed,
    inactive: PartialLed,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct PartialLed {
    color: Option<Color>,
    state: Option<Brightness>,
}

type SliceDocument = BTreeMap<RawControlKey, Option<DirectiveDocument>>;
type TimelineDocument = BTreeMap<TimeKey, Option<SliceDocument>>;

pub(crate) fn load(path: &Path, tempo: Tempo, notes: &NoteDb) -> Result<Timeline, TimelineError> {
    let doc: TimelineDocument = document::read_yaml(path)?;
    build(doc, tempo, notes)
}

pub(crate) fn parse(text: &str, tempo: Tempo, notes: &NoteDb) -> Result<Timeline, TimelineError> {
    let doc: TimelineDocument = serde_yaml::from_str(text).map_err(TimelineError::Parse)?;
    build(doc, tempo, notes)
}

fn build(doc: TimelineDocument, tempo: Tempo, notes: &NoteDb) -> Result<Timeline, TimelineError> {
    let mut builder = TimelineBuilder::new();

    for (time_key, slice) in doc {
        let tick = resolve_tick(&time_key, tempo)?;
        if builder.contains(tick) {
            return Err(TimelineError::DuplicateTick {
                key: describe_time(&time_key),
                tick,
            });
        }
        builder.touch(tick);

        for (raw_key, spec) in slice.unwrap_or_default() {
            let key = resolve_control(&raw_key, tick)?;
            let directive = resolve_directive(key, spec.unwrap_or_default(), tick, tempo, notes)?;
            builder.insert(tick, key, directive);
        }
    }

    builder.build()
}

fn describe_time(key: &TimeKey) -> String {
    match key {
        TimeKey::Tick(tick) => tick.to_string(),
        TimeKey::Text(text) => text.clone(),
    }
}

/// Bare integers are ticks, anything else is a duration like "1m 30s"
fn resolve_tick(key: &TimeKey, tempo: Tempo) -> Result<u64, TimelineError> {
    match key {
        TimeKey::Tick(tick) => Ok(*tick),
        TimeKey::Text(text) => {
            if let Ok(tick) = text.trim().parse::<u64>() {
                return Ok(tick);
            }
            let duration = humantime::parse_duration(text.trim()).map_err(|source| {
                TimelineError::InvalidTime {
                    key: text.clone(),
                    source,
                }
            })?;
            Ok(tempo.seconds_to_ticks(duration.as_secs_f64()))
        }
    }
}

fn resolve_control(key: &RawControlKey, tick: u64) -> Result<ControlKey, TimelineError> {
    let parsed = match key {
        RawControlKey::Number(n) => u8::try_from(*n).ok().map(ControlKey::Pad),
        RawControlKey::Text(text) => ControlKey::parse(text),
    };

    parsed.ok_or_else(|| TimelineError::UnknownControl {
        tick,
        key: match key {
            RawControlKey::Number(n) => n.to_string(),
            RawControlKey::Text(text) => text.clone(),
        },
    })
}

fn resolve_directive(
    key: ControlKey,
    spec: DirectiveDocument,
    tick: u64,
    tempo: Tempo,
    notes: &NoteDb,
) -> Result<Directive, TimelineError> {
    if spec.channel > 15 {
        return Err(TimelineError::ChannelOutOfRange {
            tick,
            key,
            channel: spec.channel,
        });
    }

    let mut directive = Directive::for_control(key)
        .channel(spec.channel)
        .sticky(spec.sticky);

    if let Some(command) = spec.action.as_deref().filter(|c| !c.trim().is_empty()) {
        let action = Action::from_command(command, tempo.ppq()).ok_or_else(|| {
            TimelineError::UnknownAction {
                tick,
                key,
                command: command.to_string(),
            }
        })?;
        directive = directive.action(action);
    }

    if let Some(note) = spec.note {
        let targets = resolve_notes(note, key, tick, notes)?;
        directive = directive.routing(targets);
    }

    if let Some(led) = spec.led {
        let defaults = Directive::DEFAULT_LEDS;
        directive = directive.leds(LedPair {
            active: merge_led(led.active, defaults.active),
            inactive: merge_led(led.inactive, defaults.inactive),
        });
    }

    Ok(directive)
}

fn merge_led(partial: PartialLed, default: LedState) -> LedState {
    LedState {
        color: partial.color.unwrap_or(default.color),
        brightness: partial.state.unwrap_or(default.brightness),
    }
}

fn resolve_notes(
    spec: NoteSpec,
    key: ControlKey,
    tick: u64,
    notes: &NoteDb,
) -> Result<Vec<u8>, TimelineError> {
    let refs = match spec {
        NoteSpec::Number(n) => vec![NoteRef::Number(n)],
        NoteSpec::Names(names) => names
            .split_whitespace()
            .map(|name| NoteRef::Name(name.to_string()))
            .collect(),
        NoteSpec::List(list) => list,
    };

    refs.into_iter()
        .map(|note| match note {
            NoteRef::Number(n) => u8::try_from(n)
                .ok()
                .filter(|n| *n <= 127)
                .ok_or(TimelineError::NoteOutOfRange { tick, key, note: n }),
            NoteRef::Name(name) => {
                if let Ok(n) = name.parse::<u64>() {
                    return u8::try_from(n)
                        .ok()
                        .filter(|n| *n <= 127)
                        .ok_or(TimelineError::NoteOutOfRange { tick, key, note: n });
                }
                notes
                    .get(&name)
                    .ok_or(TimelineError::UnknownNote { tick, key, name })
            }
        })
        .collect()
}
