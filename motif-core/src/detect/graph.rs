//! Similarity graph between spans
//!
//! For every pair of start indices `i < j` and lengths `(l1, l2)` with
//! `|l1 - l2| <= D`, stores the best score of elastically aligning span
//! `(i, l1)` against span `(j, l2)`: either side may hold while the other
//! advances, as long as the running length difference stays within `D`.
//! This is a longest-common-subsequence restricted to a diagonal band.
//!
//! The table is flat and pre-sized to `N(N-1)/2 * (L_max+1) * (2D+1)` cells,
//! addressed by `(pair(i, j), l1, l2 - l1 + D)`. Only pairs with `i < j` are
//! stored; the reverse pairing has no cell. The diagonal is swept for lengths
//! below `L_max` only, so `(L_max, L_max)` is never defined while the
//! off-diagonal band cells `(L_max, L_max - k)` are.

use crate::error::{DetectError, Result};
use crate::types::{Event, Span};
use log::debug;

/// Cell value of a pairing with no defined similarity
const UNDEFINED: u32 = u32::MAX;

/// Elementary match score of two positions.
///
/// 1 when both positions hold notes of the same pitch; 0 when either is a
/// rest, out of range, or `None` (no partner, used for one-sided moves).
pub fn contribution(events: &[Event], a: Option<usize>, b: Option<usize>) -> u32 {
    let first = a.and_then(|i| events.get(i)).and_then(Event::pitch);
    let second = b.and_then(|j| events.get(j)).and_then(Event::pitch);
    match (first, second) {
        (Some(p1), Some(p2)) if p1 == p2 => 1,
        _ => 0,
    }
}

/// Banded similarity table over all span pairs of one event sequence
#[derive(Debug, Clone)]
pub struct SimilarityGraph {
    /// Number of events in the sequence
    len: usize,
    /// Largest span length with a row in the table
    max_length: usize,
    /// Slack `D`
    slack: usize,
    /// Cells per length row: 2D + 1
    band: usize,
    /// `UNDEFINED` marks cells with no similarity
    cells: Vec<u32>,
}

impl SimilarityGraph {
    /// Build the full table for `events`.
    ///
    /// `max_length` is clamped to the sequence length and `slack` to
    /// `max_length`. Fails only when the table size overflows `usize` or
    /// cannot be allocated.
    pub fn build(events: &[Event], max_length: usize, slack: usize) -> Result<Self> {
        let len = events.len();
        let max_length = max_length.min(len);
        let slack = slack.min(max_length);
        let band = 2 * slack + 1;

        let pairs = len * len.saturating_sub(1) / 2;
        let size = pairs
            .checked_mul(max_length + 1)
            .and_then(|n| n.checked_mul(band))
            .ok_or_else(|| {
                DetectError::Configuration(format!(
                    "similarity table for {} events (max length {}, slack {}) is too large",
                    len, max_length, slack
                ))
            })?;

        debug!(
            "Building similarity table: {} events, max length {}, slack {}, {} cells",
            len, max_length, slack, size
        );

        let mut cells = Vec::new();
        cells.try_reserve_exact(size).map_err(|e| {
            DetectError::Configuration(format!(
                "cannot allocate similarity table of {} cells: {}; lower max_length or max_length_difference",
                size, e
            ))
        })?;
        cells.resize(size, UNDEFINED);

        let mut graph = SimilarityGraph {
            len,
            max_length,
            slack,
            band,
            cells,
        };

        graph.fill_base_cases();

        for length in 1..max_length {
            for i in 0..len {
                for j in i + 1..len {
                    // Every remaining cell of this row ends past the sequence
                    if !Span::new(j, length).fits(len) {
                        break;
                    }
                    graph.fill(events, i, j, length, length);

                    let upper = (length + slack).min(max_length);
                    for m in length + 1..=upper {
                        graph.fill(events, i, j, m, length);
                        graph.fill(events, i, j, length, m);
                    }
                }
            }
        }

        debug!("Similarity table built: {} defined cells", graph.len());
        Ok(graph)
    }

    /// Empty spans score 0 against each other, and so does any span of at
    /// most `D` events aligned against an empty span (a leading gap).
    fn fill_base_cases(&mut self) {
        for i in 0..self.len {
            for j in i + 1..self.len {
                self.set(i, j, 0, 0, 0);
                for m in 1..=self.slack {
                    if Span::new(i, m).fits(self.len) {
                        if let Some(prev) = self.cell(i, j, m - 1, 0) {
                            self.set(i, j, m, 0, prev);
                        }
                    }
                    if Span::new(j, m).fits(self.len) {
                        if let Some(prev) = self.cell(i, j, 0, m - 1) {
                            self.set(i, j, 0, m, prev);
                        }
                    }
                }
            }
        }
    }

    fn fill(&mut self, events: &[Event], i: usize, j: usize, length1: usize, length2: usize) {
        let last1 = i + length1 - 1;
        let last2 = j + length2 - 1;
        if last1 >= self.len || last2 >= self.len {
            return;
        }

        let mut best = self
            .cell(i, j, length1 - 1, length2 - 1)
            .map(|s| s + contribution(events, Some(last1), Some(last2)));

        // One-sided moves: hold one span while the other advances
        if (length1 - 1).abs_diff(length2) <= self.slack {
            let held = self
                .cell(i, j, length1 - 1, length2)
                .map(|s| s + contribution(events, Some(last1), None));
            best = best.max(held);
        }
        if length1.abs_diff(length2 - 1) <= self.slack {
            let held = self
                .cell(i, j, length1, length2 - 1)
                .map(|s| s + contribution(events, None, Some(last2)));
            best = best.max(held);
        }

        if let Some(score) = best {
            self.set(i, j, length1, length2, score);
        }
    }

    fn pair_index(&self, i: usize, j: usize) -> usize {
        i * (2 * self.len - i - 1) / 2 + (j - i - 1)
    }

    fn slot(&self, i: usize, j: usize, length1: usize, length2: usize) -> Option<usize> {
        if i >= j || j >= self.len || length1 > self.max_length || length2 > self.max_length {
            return None;
        }
        if length1.abs_diff(length2) > self.slack {
            return None;
        }
        let offset = length2 + self.slack - length1;
        Some((self.pair_index(i, j) * (self.max_length + 1) + length1) * self.band + offset)
    }

    fn cell(&self, i: usize, j: usize, length1: usize, length2: usize) -> Option<u32> {
        self.slot(i, j, length1, length2)
            .and_then(|s| self.cells.get(s).copied())
            .filter(|&score| score != UNDEFINED)
    }

    fn set(&mut self, i: usize, j: usize, length1: usize, length2: usize, score: u32) {
        if let Some(cell) = self
            .slot(i, j, length1, length2)
            .and_then(|s| self.cells.get_mut(s))
        {
            *cell = score;
        }
    }

    /// Similarity of `a` against the later span `b`.
    ///
    /// `None` when no cell exists: `b` does not start after `a`, the lengths
    /// differ by more than the slack, or either span leaves the sequence.
    pub fn get(&self, a: Span, b: Span) -> Option<u32> {
        self.cell(a.start, b.start, a.length, b.length)
    }

    /// All stored neighbors of `span` with their similarity
    pub fn row(&self, span: Span) -> impl Iterator<Item = (Span, u32)> + '_ {
        let lo = span.length.saturating_sub(self.slack);
        let hi = span.length.saturating_add(self.slack).min(self.max_length);
        (span.start.saturating_add(1)..self.len).flat_map(move |j| {
            (lo..=hi).filter_map(move |length| {
                let neighbor = Span::new(j, length);
                self.get(span, neighbor).map(|s| (neighbor, s))
            })
        })
    }

    /// Every stored `(span, later span, similarity)` entry
    pub fn iter(&self) -> impl Iterator<Item = (Span, Span, u32)> + '_ {
        (0..self.len).flat_map(move |i| {
            (0..=self.max_length).flat_map(move |length| {
                let span = Span::new(i, length);
                self.row(span).map(move |(neighbor, s)| (span, neighbor, s))
            })
        })
    }

    /// Number of defined cells
    pub fn len(&self) -> usize {
        self.cells.iter().filter(|&&c| c != UNDEFINED).count()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.iter().all(|&c| c == UNDEFINED)
    }

    /// Number of cells the table was sized for
    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn event_count(&self) -> usize {
        self.len
    }

    pub fn max_length(&self) -> usize {
        self.max_length
    }

    pub fn slack(&self) -> usize {
        self.slack
    }
}
