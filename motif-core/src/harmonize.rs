//! Harmonizer capability
//!
//! The realization search itself lives outside this crate. A harmonizer takes
//! one bass event, the melodic context around it and a rule set, and answers
//! with candidate realizations ranked by cost. The detector supplies the
//! melodic context: the pitches of the most prominent repeated span.

use crate::detect::{FinderConfig, PatternFinder};
use crate::error::Result;
use crate::types::{Event, Note, Span};
use log::debug;

/// Pitches a harmonizer should keep in mind around a bass event
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MelodicContext {
    /// The motif the pitches were taken from, if one was found
    pub motif: Option<Span>,
    /// Distinct pitches of the motif, in first-appearance order
    pub pitches: Vec<Note>,
}

impl MelodicContext {
    /// Collect the distinct pitches of `span` in `events`; rests are skipped
    pub fn from_span(events: &[Event], span: Span) -> Self {
        let mut pitches: Vec<Note> = Vec::new();
        for pitch in events
            .get(span.range())
            .unwrap_or_default()
            .iter()
            .filter_map(Event::pitch)
        {
            if !pitches.contains(pitch) {
                pitches.push(*pitch);
            }
        }
        Self {
            motif: Some(span),
            pitches,
        }
    }

    pub fn contains(&self, note: &Note) -> bool {
        self.pitches.contains(note)
    }
}

/// One candidate voicing above a bass event
#[derive(Debug, Clone, PartialEq)]
pub struct Realization {
    pub pitches: Vec<Note>,
    /// Lower is better
    pub cost: f64,
}

/// External realization engine.
///
/// `Rules` is whatever rule configuration the engine understands.
pub trait Harmonizer {
    type Rules;

    /// Candidate realizations of `bass`, in any order
    fn realize(
        &self,
        bass: &Event,
        context: &MelodicContext,
        rules: &Self::Rules,
    ) -> Result<Vec<Realization>>;
}

/// Realize every event of a bass line against the motif of `melody`.
///
/// The motif is detected once with `config`; an empty or motif-less melody
/// gives an empty context. Rests in the bass map to `None`, as do events for
/// which the harmonizer offers nothing. Otherwise the cheapest realization
/// is kept, the first one on equal cost.
pub fn harmonize_line<H: Harmonizer>(
    harmonizer: &H,
    bass: &[Event],
    melody: &[Event],
    config: FinderConfig,
    rules: &H::Rules,
) -> Result<Vec<Option<Realization>>> {
    let context = if melody.is_empty() {
        MelodicContext::default()
    } else {
        let finder = PatternFinder::new(melody, config)?;
        match finder.best_melody()? {
            Some(span) => MelodicContext::from_span(melody, span),
            None => MelodicContext::default(),
        }
    };
    debug!(
        "Harmonizing {} bass events against motif {:?} ({} pitches)",
        bass.len(),
        context.motif,
        context.pitches.len()
    );

    bass.iter()
        .map(|event| {
            if event.is_rest() {
                return Ok(None);
            }
            let candidates = harmonizer.realize(event, &context, rules)?;
            Ok(candidates.into_iter().fold(None, |best: Option<Realization>, r| match best {
                Some(b) if b.cost <= r.cost => Some(b),
                _ => Some(r),
            }))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DetectError;
    use crate::notation::parse_events;

    /// Offers the bass alone, plus the bass with each context pitch; a
    /// context pitch is cheaper the earlier it appears in the motif.
    struct ContextEcho;

    impl Harmonizer for ContextEcho {
        type Rules = f64;

        fn realize(
            &self,
            bass: &Event,
            context: &MelodicContext,
            base_cost: &f64,
        ) -> Result<Vec<Realization>> {
            let root = *bass.pitch().ok_or_else(|| {
                DetectError::Harmonization("rest passed to realize".to_string())
            })?;
            let mut out = vec![Realization {
                pitches: vec![root],
                cost: base_cost + 100.0,
            }];
            for (rank, pitch) in context.pitches.iter().enumerate() {
                out.push(Realization {
                    pitches: vec![root, *pitch],
                    cost: base_cost + rank as f64,
                });
            }
            Ok(out)
        }
    }

    struct Refuses;

    impl Harmonizer for Refuses {
        type Rules = ();

        fn realize(&self, _: &Event, _: &MelodicContext, _: &()) -> Result<Vec<Realization>> {
            Err(DetectError::Harmonization("no rules".to_string()))
        }
    }

    #[test]
    fn test_context_collects_distinct_pitches() {
        let melody = parse_events("C4 D4 _ C4 E4").unwrap();
        let context = MelodicContext::from_span(&melody, Span::new(0, 5));
        let names: Vec<String> = context.pitches.iter().map(|p| p.to_string()).collect();
        assert_eq!(names, vec!["C4", "D4", "E4"]);
        assert!(context.contains(&"D4".parse().unwrap()));
    }

    #[test]
    fn test_context_of_span_past_end_is_empty() {
        let melody = parse_events("C4 D4").unwrap();
        let context = MelodicContext::from_span(&melody, Span::new(1, 5));
        assert!(context.pitches.is_empty());
    }

    #[test]
    fn test_harmonize_line_picks_cheapest() {
        let melody = parse_events("C4 D4 E4 C4 F5 C4 D4 E4 C4 G4").unwrap();
        let bass = parse_events("C3 _ G2").unwrap();
        let out = harmonize_line(&ContextEcho, &bass, &melody, FinderConfig::default(), &0.0)
            .unwrap();

        assert_eq!(out.len(), 3);
        assert!(out[1].is_none());
        let first = out[0].as_ref().unwrap();
        assert_eq!(first.cost, 0.0);
        assert_eq!(first.pitches[1].to_string(), "C4");
    }

    #[test]
    fn test_harmonize_without_melody_uses_bass_only() {
        let bass = parse_events("C3").unwrap();
        let out = harmonize_line(&ContextEcho, &bass, &[], FinderConfig::default(), &1.0).unwrap();
        let only = out[0].as_ref().unwrap();
        assert_eq!(only.pitches.len(), 1);
        assert_eq!(only.cost, 101.0);
    }

    #[test]
    fn test_harmonizer_errors_propagate() {
        let bass = parse_events("C3").unwrap();
        let melody = parse_events("C4 C4").unwrap();
        let result = harmonize_line(&Refuses, &bass, &melody, FinderConfig::default(), &());
        assert!(matches!(result, Err(DetectError::Harmonization(_))));
    }

    #[test]
    fn test_bad_config_surfaces_before_realizing() {
        let bass = parse_events("C3").unwrap();
        let melody = parse_events("C4 C4").unwrap();
        let config = FinderConfig::new().with_min_length(0);
        let result = harmonize_line(&ContextEcho, &bass, &melody, config, &0.0);
        assert!(matches!(result, Err(DetectError::Configuration(_))));
    }
}
