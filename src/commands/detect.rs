//! Detection commands (detect, load, segments, similarity, row, show)

use crate::commands::{CommandContext, CommandResult};
use crate::report;
use colored::*;
use motif_core::notation::format_events;
use motif_core::Span;
use std::path::Path;

/// Number of neighbors `row` prints
const ROW_LIMIT: usize = 10;

/// Handle `detect [events]`: replace the line if events are given, then detect
pub fn cmd_detect(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !args.is_empty() {
        if let Err(e) = ctx.set_events(args) {
            return CommandResult::Error(e.to_string());
        }
    }
    run_detection(ctx)
}

/// Handle `load <file>`: read a notation file and detect
pub fn cmd_load(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: load <file>".to_string());
    }
    match ctx.load_file(Path::new(args)) {
        Ok(count) => {
            println!("📂 Loaded {} events from {}", count, args.bright_green());
            run_detection(ctx)
        }
        Err(e) => CommandResult::Error(format!("{:#}", e)),
    }
}

/// Handle `segments [events]`
pub fn cmd_segments(args: &str, ctx: &mut CommandContext) -> CommandResult {
    if !args.is_empty() {
        if let Err(e) = ctx.set_events(args) {
            return CommandResult::Error(e.to_string());
        }
    }
    CommandResult::Message(report::describe_segments(&ctx.events))
}

/// Handle `similarity <start1> <length1> <start2> <length2>`
pub fn cmd_similarity(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let numbers = match parse_numbers(args, 4) {
        Some(n) => n,
        None => {
            return CommandResult::Error(
                "Usage: similarity <start1> <length1> <start2> <length2>".to_string(),
            )
        }
    };
    let a = Span::new(numbers[0], numbers[1]);
    let b = Span::new(numbers[2], numbers[3]);
    match report::describe_similarity(&ctx.events, &ctx.config, a, b) {
        Ok(msg) => CommandResult::Message(msg),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `row <start> <length>`: strongest neighbors of a span
pub fn cmd_row(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let numbers = match parse_numbers(args, 2) {
        Some(n) => n,
        None => return CommandResult::Error("Usage: row <start> <length>".to_string()),
    };
    let span = Span::new(numbers[0], numbers[1]);
    match report::describe_row(&ctx.events, &ctx.config, span, ROW_LIMIT) {
        Ok(msg) => CommandResult::Message(msg),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

/// Handle `show`: print the current line with indices
pub fn cmd_show(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    if ctx.events.is_empty() {
        return CommandResult::Message("No events loaded".to_string());
    }
    let mut output = String::new();
    if let Some(source) = &ctx.source {
        output.push_str(&format!("from {}\n", source.display()));
    }
    output.push_str(&format_events(&ctx.events));
    output.push('\n');
    for (idx, event) in ctx.events.iter().enumerate() {
        output.push_str(&format!("  {:>3} {}\n", idx, event));
    }
    CommandResult::Message(output)
}

/// Detect on the current line and report
pub fn run_detection(ctx: &CommandContext) -> CommandResult {
    match report::describe_detection(&ctx.events, &ctx.config) {
        Ok(msg) => CommandResult::Message(msg),
        Err(e) => CommandResult::Error(e.to_string()),
    }
}

fn parse_numbers(args: &str, count: usize) -> Option<Vec<usize>> {
    let numbers: Vec<usize> = args
        .split_whitespace()
        .map(|t| t.parse().ok())
        .collect::<Option<_>>()?;
    (numbers.len() == count).then_some(numbers)
}

#[cfg(test)]
mod tests {
    use super::*;
    use motif_core::FinderConfig;

    const THEME: &str = "C4 D4 E4 C4 F5 C4 D4 E4 C4 G4 C3 D3 E3 C3";

    fn ctx() -> CommandContext {
        colored::control::set_override(false);
        CommandContext::new(FinderConfig::new().with_max_length_difference(2))
    }

    #[test]
    fn test_detect_with_inline_events() {
        let mut ctx = ctx();
        match cmd_detect(THEME, &mut ctx) {
            CommandResult::Message(m) => assert!(m.contains("[0, 4)")),
            other => panic!("unexpected {:?}", other),
        }
        assert_eq!(ctx.events.len(), 14);
    }

    #[test]
    fn test_detect_on_empty_line_is_error() {
        let mut ctx = ctx();
        match cmd_detect("", &mut ctx) {
            CommandResult::Error(e) => assert!(e.contains("Empty input")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_detect_bad_notation_keeps_line() {
        let mut ctx = ctx();
        ctx.set_events("C4 D4").unwrap();
        assert!(matches!(cmd_detect("C4 X9", &mut ctx), CommandResult::Error(_)));
        assert_eq!(ctx.events.len(), 2);
    }

    #[test]
    fn test_similarity_command() {
        let mut ctx = ctx();
        ctx.set_events(THEME).unwrap();
        match cmd_similarity("0 2 5 2", &mut ctx) {
            CommandResult::Message(m) => assert!(m.ends_with("= 2")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(
            cmd_similarity("0 2 5", &mut ctx),
            CommandResult::Error(_)
        ));
        match cmd_similarity("5 2 0 2", &mut ctx) {
            CommandResult::Message(m) => assert!(m.contains("no stored cell")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_row_command_usage() {
        let mut ctx = ctx();
        ctx.set_events(THEME).unwrap();
        assert!(matches!(cmd_row("0", &mut ctx), CommandResult::Error(_)));
        assert!(matches!(cmd_row("0 4", &mut ctx), CommandResult::Message(_)));
        match cmd_row(&format!("{} 1", usize::MAX), &mut ctx) {
            CommandResult::Message(m) => assert!(m.contains("no matching neighbors")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_segments_command() {
        let mut ctx = ctx();
        match cmd_segments("C3 _ G2", &mut ctx) {
            CommandResult::Message(m) => assert!(m.starts_with("2 segment(s)")),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_load_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.motif");
        std::fs::write(&path, THEME).unwrap();

        let mut ctx = ctx();
        let arg = path.to_string_lossy().to_string();
        match cmd_load(&arg, &mut ctx) {
            CommandResult::Message(m) => assert!(m.contains("C4 D4 E4 C4")),
            other => panic!("unexpected {:?}", other),
        }
        assert!(matches!(cmd_load("", &mut ctx), CommandResult::Error(_)));
    }

    #[test]
    fn test_show_lists_indices() {
        let mut ctx = ctx();
        assert!(matches!(cmd_show("", &mut ctx), CommandResult::Message(m) if m == "No events loaded"));
        ctx.set_events("C4 _@2").unwrap();
        match cmd_show("", &mut ctx) {
            CommandResult::Message(m) => assert!(m.contains("  1 _@2")),
            other => panic!("unexpected {:?}", other),
        }
    }
}
