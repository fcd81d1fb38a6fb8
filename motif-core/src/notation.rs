//! Text notation for event sequences.
//!
//! Whitespace-separated tokens, one per event:
//!
//! - `C4`, `F#3`, `Bb2` - a note (octave defaults to 4)
//! - `_` - a rest
//! - `@dur` suffix - duration in quarter lengths (`2`, `3/2`, `0.5`); defaults to 1
//!
//! `C4@1/2 D4 _@2 E4` is a half-beat C, a quarter D, a half rest and a quarter E.
//! Anything after `#` at the start of a line, or after `//`, is a comment.

use crate::error::{DetectError, Result};
use crate::types::time::{parse_time, quarters};
use crate::types::{Event, Note};

/// Parse a whole notation string into events
pub fn parse_events(notation: &str) -> Result<Vec<Event>> {
    let mut events = Vec::new();
    for line in notation.lines() {
        let line = strip_comment(line);
        for token in line.split_whitespace() {
            events.push(parse_event(token)?);
        }
    }
    Ok(events)
}

/// Parse a single `pitch[@dur]` or `_[@dur]` token
pub fn parse_event(token: &str) -> Result<Event> {
    let (head, duration) = match token.split_once('@') {
        Some((head, dur)) => {
            let duration = parse_time(dur)
                .map_err(|e| DetectError::Notation(format!("{} in '{}'", e, token)))?;
            (head, duration)
        }
        None => (token, quarters(1)),
    };

    if head == "_" {
        return Ok(Event::rest(duration));
    }

    let pitch: Note = head
        .parse()
        .map_err(|e| DetectError::Notation(format!("{} in '{}'", e, token)))?;
    Ok(Event::note(pitch, duration))
}

/// Render events back into notation
pub fn format_events(events: &[Event]) -> String {
    events
        .iter()
        .map(|e| e.to_string())
        .collect::<Vec<_>>()
        .join(" ")
}

fn strip_comment(line: &str) -> &str {
    let trimmed = line.trim_start();
    if trimmed.starts_with('#') {
        return "";
    }
    match line.find("//") {
        Some(idx) => &line[..idx],
        None => line,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::time::time;

    #[test]
    fn test_parse_simple_line() {
        let events = parse_events("C4 D4 E4 C4").unwrap();
        assert_eq!(events.len(), 4);
        assert!(events.iter().all(|e| e.duration() == quarters(1)));
        assert_eq!(events[1].pitch().unwrap().to_string(), "D4");
    }

    #[test]
    fn test_parse_rests_and_durations() {
        let events = parse_events("C4@1/2 _@2 Bb3@0.5 _").unwrap();
        assert_eq!(events.len(), 4);
        assert_eq!(events[0].duration(), time(1, 2));
        assert!(events[1].is_rest());
        assert_eq!(events[1].duration(), quarters(2));
        assert_eq!(events[2].duration(), time(1, 2));
        assert!(events[3].is_rest());
    }

    #[test]
    fn test_comments_and_lines() {
        let src = "# theme\nC4 D4 // first bar\n  E4\n";
        let events = parse_events(src).unwrap();
        assert_eq!(format_events(&events), "C4 D4 E4");
    }

    #[test]
    fn test_bad_tokens_are_notation_errors() {
        assert!(matches!(
            parse_events("C4 H4"),
            Err(DetectError::Notation(_))
        ));
        assert!(matches!(
            parse_events("C4@x"),
            Err(DetectError::Notation(_))
        ));
        assert!(matches!(parse_events("_@-1"), Err(DetectError::Notation(_))));
    }

    #[test]
    fn test_format_round_trip() {
        let src = "C4@3/2 _ F#5@2";
        let events = parse_events(src).unwrap();
        assert_eq!(format_events(&events), src);
    }

    #[test]
    fn test_edge_spellings_round_trip() {
        let src = "Cb4 E#4 B#3 Fb4@1/2";
        let events = parse_events(src).unwrap();
        let rendered = format_events(&events);
        assert_eq!(rendered, src);
        assert_eq!(parse_events(&rendered).unwrap(), events);
    }

    #[test]
    fn test_empty_notation() {
        assert!(parse_events("   \n").unwrap().is_empty());
    }
}
