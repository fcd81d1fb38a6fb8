//! Melodic events: notes and rests with exact durations.

use super::note::Note;
use super::time::{format_time, quarters, Time};
use std::fmt;

/// One event of a melodic line.
///
/// Rests carry a duration but no pitch; they never match anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Event {
    Note { pitch: Note, duration: Time },
    Rest { duration: Time },
}

impl Event {
    /// A note lasting `duration` quarter lengths
    pub fn note(pitch: Note, duration: Time) -> Self {
        Event::Note { pitch, duration }
    }

    /// A rest lasting `duration` quarter lengths
    pub fn rest(duration: Time) -> Self {
        Event::Rest { duration }
    }

    /// A one-quarter note
    pub fn quarter(pitch: Note) -> Self {
        Event::note(pitch, quarters(1))
    }

    pub fn pitch(&self) -> Option<&Note> {
        match self {
            Event::Note { pitch, .. } => Some(pitch),
            Event::Rest { .. } => None,
        }
    }

    pub fn duration(&self) -> Time {
        match self {
            Event::Note { duration, .. } | Event::Rest { duration } => *duration,
        }
    }

    pub fn is_rest(&self) -> bool {
        matches!(self, Event::Rest { .. })
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Event::Note { pitch, .. } => write!(f, "{}", pitch)?,
            Event::Rest { .. } => write!(f, "_")?,
        }
        // Quarter notes are the implicit default
        if self.duration() != quarters(1) {
            write!(f, "@{}", format_time(self.duration()))?;
        }
        Ok(())
    }
}

/// Total duration of a run of events
pub fn total_duration(events: &[Event]) -> Time {
    events.iter().map(Event::duration).sum()
}
