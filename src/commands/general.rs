//! General REPL commands (help, quit, watch)

use crate::commands::{CommandContext, CommandResult};
use colored::*;

/// Handle `help` command
pub fn cmd_help(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    print_help();
    CommandResult::Success
}

/// Handle `quit` or `exit` command
pub fn cmd_quit(_args: &str, _ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Exit
}

/// Handle `watch <file>` command
pub fn cmd_watch(args: &str, _ctx: &mut CommandContext) -> CommandResult {
    if args.is_empty() {
        return CommandResult::Error("Usage: watch <file>".to_string());
    }
    CommandResult::Watch(args.to_string())
}

/// Print help information
fn print_help() {
    println!("{}", "🎼 Motif Help".bold());
    println!("{}", "=============".bold());
    println!();
    println!("{}", "Notation:".green());
    println!("  {}          - Quarter note, C in octave 4", "C4".cyan());
    println!("  {}      - Sharp, flat; octave defaults to 4", "F#3 Bb".cyan());
    println!("  {}      - Duration in quarters (n, n/d or decimal)", "C4@3/2".cyan());
    println!("  {}         - Rest lasting two quarters", "_@2".cyan());
    println!("  {}  - Comments (whole line, or trailing)", "# ...  // ...".cyan());
    println!();
    println!("{}", "Detection:".green());
    println!("  {}  - Detect on the typed line", "C4 D4 E4 C4 ...".cyan());
    println!("  {}   - Detect (optionally on a new line)", "detect [events]".cyan());
    println!("  {}       - Load a notation file and detect", "load <file>".cyan());
    println!("  {}      - Re-detect whenever a file changes", "watch <file>".cyan());
    println!("  {}              - Print the current line", "show".cyan());
    println!("  {}  - Rest-delimited segments", "segments [events]".cyan());
    println!(
        "  {}  - One table cell",
        "similarity <s1> <l1> <s2> <l2>".cyan()
    );
    println!("  {}       - Strongest neighbors of a span", "row <s> <l>".cyan());
    println!();
    println!("{}", "Configuration:".green());
    println!("  {}  - Change a setting", "set <key> <value>".cyan());
    println!("      keys: min_length, max_length, max_length_difference (slack),");
    println!("            min_duration, max_duration, policy");
    println!("      {} clears max_length and the duration bounds", "none".cyan());
    println!("      policies: {}, {}", "weighted".cyan(), "thresholded[:n]".cyan());
    println!("  {}            - Show the current settings", "config".cyan());
    println!("  {}             - Restore the launch settings", "reset".cyan());
    println!();
    println!("  {} / {}       - Leave", "quit".cyan(), "exit".cyan());
}
