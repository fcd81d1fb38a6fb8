//! The pattern finder: enumerate candidate spans and keep the most prominent.

use super::config::FinderConfig;
use super::graph::{contribution, SimilarityGraph};
use crate::error::{DetectError, Result};
use crate::types::time::{format_time, Time};
use crate::types::{Event, Span};
use log::{debug, info, trace};
use num_traits::Zero;
use once_cell::unsync::OnceCell;

/// A winning span together with its prominence
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Candidate {
    pub span: Span,
    pub prominence: f64,
}

/// Repeated-pattern finder over one borrowed event sequence.
///
/// The similarity graph is built lazily on first use and cached for the life
/// of the finder; later queries reuse it.
pub struct PatternFinder<'a> {
    events: &'a [Event],
    config: FinderConfig,
    graph: OnceCell<SimilarityGraph>,
}

impl<'a> PatternFinder<'a> {
    /// Validate `config` against `events` and create a finder.
    ///
    /// Fails on an invalid configuration or an empty sequence. Nothing is
    /// computed yet.
    pub fn new(events: &'a [Event], config: FinderConfig) -> Result<Self> {
        config.validate()?;
        if events.is_empty() {
            return Err(DetectError::EmptyInput);
        }
        Ok(Self {
            events,
            config,
            graph: OnceCell::new(),
        })
    }

    pub fn events(&self) -> &'a [Event] {
        self.events
    }

    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    /// Upper bound on candidate length; the sequence length when unset
    pub fn max_length(&self) -> usize {
        self.config.max_length.unwrap_or(self.events.len())
    }

    /// Whether the similarity graph has been built yet
    pub fn is_graph_built(&self) -> bool {
        self.graph.get().is_some()
    }

    /// The similarity graph, building it on first call
    pub fn graph(&self) -> Result<&SimilarityGraph> {
        self.graph.get_or_try_init(|| {
            SimilarityGraph::build(
                self.events,
                self.max_length(),
                self.config.max_length_difference,
            )
        })
    }

    /// Pitch-match score of positions `i` and `j`
    pub fn contribution(&self, i: usize, j: usize) -> u32 {
        contribution(self.events, Some(i), Some(j))
    }

    /// Similarity of `a` against the later span `b`, if stored
    pub fn similarity(&self, a: Span, b: Span) -> Result<Option<u32>> {
        Ok(self.graph()?.get(a, b))
    }

    /// Prominence of `span` under the configured policy
    pub fn prominence(&self, span: Span) -> Result<f64> {
        Ok(self.config.policy.score(self.graph()?, span))
    }

    /// The most prominent span, or `None` when no candidate is eligible
    pub fn best_melody(&self) -> Result<Option<Span>> {
        Ok(self.best_candidate()?.map(|c| c.span))
    }

    /// Search every candidate span, shortest first, then by start.
    ///
    /// A candidate replaces the current best only with a strictly greater
    /// prominence, so ties keep the first one seen.
    pub fn best_candidate(&self) -> Result<Option<Candidate>> {
        let len = self.events.len();
        let min_length = self.config.min_length;
        let max_length = self.max_length().min(len);

        if len < min_length {
            debug!(
                "Sequence of {} events is shorter than min_length {}",
                len, min_length
            );
            return Ok(None);
        }

        let graph = self.graph()?;
        let policy = self.config.policy;
        let filter = self.config.filters_duration();

        let mut best: Option<Candidate> = None;
        let mut considered = 0usize;

        for length in min_length..=max_length {
            // Window sum of durations, slid one event at a time
            let mut window: Time = if filter {
                self.events[..length].iter().map(Event::duration).sum()
            } else {
                Time::zero()
            };

            for start in 0..=len - length {
                if filter {
                    if start > 0 {
                        window = window - self.events[start - 1].duration()
                            + self.events[start + length - 1].duration();
                    }
                    if !self.config.admits_duration(window) {
                        continue;
                    }
                }

                considered += 1;
                let span = Span::new(start, length);
                let prominence = policy.score(graph, span);
                if best.map_or(true, |b| prominence > b.prominence) {
                    trace!("New best {} with prominence {:.3}", span, prominence);
                    best = Some(Candidate { span, prominence });
                }
            }
        }

        match &best {
            Some(c) => info!(
                "Best melody {} ({} events) with prominence {:.3} out of {} candidates",
                c.span, c.span.length, c.prominence, considered
            ),
            None => info!(
                "No candidate in duration window [{}, {}]",
                self.config.min_duration.map_or("-".to_string(), format_time),
                self.config.max_duration.map_or("-".to_string(), format_time)
            ),
        }

        Ok(best)
    }
}

/// Find the most prominent repeated span of `events` under `config`
pub fn detect_melody(events: &[Event], config: FinderConfig) -> Result<Option<Span>> {
    PatternFinder::new(events, config)?.best_melody()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detect::ProminencePolicy;
    use crate::notation::parse_events;
    use crate::types::time::quarters;

    #[test]
    fn test_empty_input_rejected() {
        let result = PatternFinder::new(&[], FinderConfig::default());
        assert!(matches!(result, Err(DetectError::EmptyInput)));
    }

    #[test]
    fn test_bad_config_rejected_before_input() {
        let result = PatternFinder::new(&[], FinderConfig::new().with_min_length(0));
        assert!(matches!(result, Err(DetectError::Configuration(_))));
    }

    #[test]
    fn test_spans_past_the_end_score_zero() {
        let events = parse_events("C4 D4 C4 D4").unwrap();
        let config = FinderConfig::new().with_policy(ProminencePolicy::thresholded());
        let finder = PatternFinder::new(&events, config).unwrap();
        assert_eq!(finder.prominence(Span::new(usize::MAX, 1)).unwrap(), 0.0);
        assert_eq!(finder.prominence(Span::new(0, usize::MAX)).unwrap(), 0.0);
    }

    #[test]
    fn test_graph_is_lazy() {
        let events = parse_events("C4 D4 C4 D4").unwrap();
        let finder = PatternFinder::new(&events, FinderConfig::default()).unwrap();
        assert!(!finder.is_graph_built());
        finder.best_melody().unwrap();
        assert!(finder.is_graph_built());
    }

    #[test]
    fn test_sequence_shorter_than_min_length() {
        let events = parse_events("C4 D4 C4").unwrap();
        let config = FinderConfig::new().with_min_length(4);
        let finder = PatternFinder::new(&events, config).unwrap();
        assert_eq!(finder.best_melody().unwrap(), None);
        // Nothing to rank, nothing built
        assert!(!finder.is_graph_built());
    }

    #[test]
    fn test_single_event_sequence() {
        let events = parse_events("C4").unwrap();
        let best = detect_melody(&events, FinderConfig::default()).unwrap();
        assert_eq!(best, Some(Span::new(0, 1)));
    }

    #[test]
    fn test_ties_keep_first_seen() {
        // Every candidate of an all-rest line scores 0: the first one wins
        let events = parse_events("_ _ _").unwrap();
        let best = detect_melody(&events, FinderConfig::default()).unwrap();
        assert_eq!(best, Some(Span::new(0, 1)));
    }

    #[test]
    fn test_exact_duration_window() {
        // Only two-beat candidates are eligible
        let events = parse_events("C4@2 D4 E4 C4@2 D4 E4").unwrap();
        let config = FinderConfig::new().with_duration_window(quarters(2), quarters(2));
        let finder = PatternFinder::new(&events, config).unwrap();
        let best = finder.best_melody().unwrap().unwrap();
        let total: Time = events[best.range()].iter().map(Event::duration).sum();
        assert_eq!(total, quarters(2));
    }
}
