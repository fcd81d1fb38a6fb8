//! Human-readable rendering of detection results

use anyhow::Result;
use colored::*;
use motif_core::notation::format_events;
use motif_core::segment::split_on_rests;
use motif_core::types::time::format_time;
use motif_core::types::total_duration;
use motif_core::{Event, FinderConfig, PatternFinder, Span};

/// Run a detection and describe the winner
pub fn describe_detection(events: &[Event], config: &FinderConfig) -> Result<String> {
    let finder = PatternFinder::new(events, config.clone())?;
    let report = match finder.best_candidate()? {
        Some(best) => {
            let figure = &events[best.span.range()];
            format!(
                "{} {} {} ({} events, {} quarters), prominence {:.3}\n  {}",
                "🎼".bright_yellow(),
                "Best melody".bright_cyan().bold(),
                best.span.to_string().bright_green(),
                best.span.length,
                format_time(total_duration(figure)),
                best.prominence,
                format_events(figure).cyan()
            )
        }
        None if events.len() < config.min_length => format!(
            "{} Line of {} events is shorter than min_length {}",
            "∅".yellow(),
            events.len(),
            config.min_length
        ),
        None => format!(
            "{} No candidate satisfies the duration window [{}, {}]",
            "∅".yellow(),
            config.min_duration.map_or("-".to_string(), format_time),
            config.max_duration.map_or("-".to_string(), format_time)
        ),
    };
    Ok(report)
}

/// Describe the rest-delimited segments of a line
pub fn describe_segments(events: &[Event]) -> String {
    let segmentation = split_on_rests(events);
    if segmentation.segments.is_empty() {
        return "No segments (line is empty or all rests)".to_string();
    }

    let mut output = format!("{} segment(s):\n", segmentation.segments.len());
    for (index, segment) in segmentation.segments.iter().enumerate() {
        output.push_str(&format!(
            "  {} {} at {} for {}: {}\n",
            format!("#{}", index + 1).bright_magenta(),
            segment.span,
            format_time(segment.arc.start),
            format_time(segment.arc.duration()),
            format_events(&events[segment.span.range()]).cyan()
        ));
    }
    output
}

/// Similarity of one span pair
pub fn describe_similarity(
    events: &[Event],
    config: &FinderConfig,
    a: Span,
    b: Span,
) -> Result<String> {
    let finder = PatternFinder::new(events, config.clone())?;
    Ok(match finder.similarity(a, b)? {
        Some(score) => format!("similarity {} → {} = {}", a, b, score.to_string().bright_green()),
        None => format!("{} no stored cell for {} → {}", "∅".yellow(), a, b),
    })
}

/// Strongest neighbors of a span, best first, at most `limit`
pub fn describe_row(
    events: &[Event],
    config: &FinderConfig,
    span: Span,
    limit: usize,
) -> Result<String> {
    let finder = PatternFinder::new(events, config.clone())?;
    let graph = finder.graph()?;
    let mut row: Vec<(Span, u32)> = graph.row(span).filter(|(_, s)| *s > 0).collect();
    row.sort_by(|a, b| b.1.cmp(&a.1).then(a.0.cmp(&b.0)));

    let mut output = format!(
        "{} prominence {:.3} ({})\n",
        span.to_string().bright_green(),
        finder.prominence(span)?,
        config.policy
    );
    if row.is_empty() {
        output.push_str("  no matching neighbors\n");
    }
    for (neighbor, score) in row.into_iter().take(limit) {
        output.push_str(&format!("  {} {}\n", neighbor, score));
    }
    Ok(output)
}

/// One line per configuration field
pub fn describe_config(config: &FinderConfig) -> String {
    format!(
        "min_length            {}\nmax_length            {}\nmax_length_difference {}\nmin_duration          {}\nmax_duration          {}\npolicy                {}",
        config.min_length,
        config
            .max_length
            .map_or("sequence length".to_string(), |m| m.to_string()),
        config.max_length_difference,
        config.min_duration.map_or("none".to_string(), format_time),
        config.max_duration.map_or("none".to_string(), format_time),
        config.policy
    )
}
