//! Finder configuration commands (set, config, reset)

use crate::commands::{CommandContext, CommandResult};
use crate::report::describe_config;
use anyhow::{anyhow, Result};
use colored::*;
use motif_core::types::time::parse_time;
use motif_core::{FinderConfig, ProminencePolicy, Time};

/// Handle `set <key> <value>`
///
/// The change only sticks if the resulting configuration validates.
pub fn cmd_set(args: &str, ctx: &mut CommandContext) -> CommandResult {
    let (key, value) = match args.split_once(char::is_whitespace) {
        Some((key, value)) => (key, value.trim()),
        None => return CommandResult::Error("Usage: set <key> <value>".to_string()),
    };

    let mut updated = ctx.config.clone();
    if let Err(e) = apply(&mut updated, key, value) {
        return CommandResult::Error(e.to_string());
    }
    if let Err(e) = updated.validate() {
        return CommandResult::Error(e.to_string());
    }

    log::debug!("Config {} = {}", key, value);
    ctx.config = updated;
    CommandResult::Message(format!("⚙️  {} = {}", key.bright_cyan(), value.bright_green()))
}

/// Handle `config`
pub fn cmd_config(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    CommandResult::Message(describe_config(&ctx.config))
}

/// Handle `reset`: back to the configuration the session started with
pub fn cmd_reset(_args: &str, ctx: &mut CommandContext) -> CommandResult {
    ctx.config = ctx.launch_config.clone();
    CommandResult::Message("⚙️  Configuration reset to launch settings".to_string())
}

fn apply(config: &mut FinderConfig, key: &str, value: &str) -> Result<()> {
    match key {
        "min_length" => config.min_length = parse_count(value)?,
        "max_length" => config.max_length = parse_optional(value, parse_count)?,
        "max_length_difference" | "slack" => config.max_length_difference = parse_count(value)?,
        "min_duration" => config.min_duration = parse_optional(value, parse_duration)?,
        "max_duration" => config.max_duration = parse_optional(value, parse_duration)?,
        "policy" => config.policy = value.parse::<ProminencePolicy>()?,
        _ => return Err(anyhow!("Unknown setting '{}'", key)),
    }
    Ok(())
}

fn parse_count(value: &str) -> Result<usize> {
    value
        .parse::<usize>()
        .map_err(|_| anyhow!("Expected a non-negative integer, got '{}'", value))
}

fn parse_duration(value: &str) -> Result<Time> {
    parse_time(value)
}

/// `none` clears an optional setting
fn parse_optional<T>(value: &str, parse: fn(&str) -> Result<T>) -> Result<Option<T>> {
    if value.eq_ignore_ascii_case("none") {
        Ok(None)
    } else {
        parse(value).map(Some)
    }
}
