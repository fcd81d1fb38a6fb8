//! Rest segmentation
//!
//! A line is realized in rest-delimited chunks: every maximal run of notes
//! becomes a segment that remembers where it starts, in quarter lengths from
//! the start of the line. Rests separate segments and never open an empty one.

use crate::types::time::{Arc, Time};
use crate::types::{Event, Span};
use num_traits::Zero;

/// A rest-free run of events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    /// Event indices of the run
    pub span: Span,
    /// Onset and release in quarter lengths from the start of the line
    pub arc: Arc,
}

/// Segments of a line plus the indices of the rests between them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Segmentation {
    pub segments: Vec<Segment>,
    pub rests: Vec<usize>,
}

impl Segmentation {
    /// Slice of `events` covered by segment `index`
    pub fn events<'a>(&self, events: &'a [Event], index: usize) -> Option<&'a [Event]> {
        self.segments
            .get(index)
            .and_then(|seg| events.get(seg.span.range()))
    }
}

/// Split `events` at every rest
pub fn split_on_rests(events: &[Event]) -> Segmentation {
    let mut result = Segmentation::default();
    let mut offset = Time::zero();
    let mut open: Option<(usize, Time)> = None;

    for (idx, event) in events.iter().enumerate() {
        if event.is_rest() {
            if let Some((start, onset)) = open.take() {
                result.segments.push(Segment {
                    span: Span::new(start, idx - start),
                    arc: Arc::new(onset, offset),
                });
            }
            result.rests.push(idx);
        } else if open.is_none() {
            open = Some((idx, offset));
        }
        offset = offset + event.duration();
    }

    if let Some((start, onset)) = open {
        result.segments.push(Segment {
            span: Span::new(start, events.len() - start),
            arc: Arc::new(onset, offset),
        });
    }

    result
}
