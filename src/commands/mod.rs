//! Command registry for REPL commands
//!
//! Provides a clean, extensible pattern for handling REPL commands.

pub mod detect;
pub mod general;
pub mod settings;

use anyhow::{Context, Result};
use motif_core::notation::parse_events;
use motif_core::{Event, FinderConfig};
use std::path::{Path, PathBuf};

/// Result of executing a command
#[derive(Debug)]
pub enum CommandResult {
    /// Command executed successfully, continue REPL
    Success,
    /// Command executed, show this message
    Message(String),
    /// Exit the REPL
    Exit,
    /// Not a command, try reading the line as events
    NotACommand,
    /// Error occurred
    Error(String),
    /// Watch a file for changes
    Watch(String),
}

/// Session state shared by command handlers
#[derive(Debug, Clone, Default)]
pub struct CommandContext {
    pub config: FinderConfig,
    /// Configuration the session started with; `reset` returns to it
    pub launch_config: FinderConfig,
    /// The current line
    pub events: Vec<Event>,
    /// File the current line was loaded from, if any
    pub source: Option<PathBuf>,
}

impl CommandContext {
    pub fn new(config: FinderConfig) -> Self {
        Self {
            launch_config: config.clone(),
            config,
            events: Vec::new(),
            source: None,
        }
    }

    /// Replace the current line with events parsed from `notation`
    pub fn set_events(&mut self, notation: &str) -> Result<usize> {
        self.events = parse_events(notation)?;
        self.source = None;
        Ok(self.events.len())
    }

    /// Replace the current line with the contents of a notation file
    pub fn load_file(&mut self, path: &Path) -> Result<usize> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        self.events = parse_events(&contents)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        self.source = Some(path.to_path_buf());
        log::debug!("Loaded {} events from {}", self.events.len(), path.display());
        Ok(self.events.len())
    }
}

/// A command handler function
pub type CommandHandler = fn(&str, &mut CommandContext) -> CommandResult;

/// Registry of available commands
pub struct CommandRegistry {
    /// Commands indexed by their prefix (e.g., "set policy")
    /// Sorted by prefix length descending for longest-match-first lookup
    commands: Vec<(String, CommandHandler)>,
}

impl CommandRegistry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self {
            commands: Vec::new(),
        }
    }

    /// Register a command with its prefix
    pub fn register(&mut self, prefix: &str, handler: CommandHandler) {
        self.commands.push((prefix.to_string(), handler));
        // Sort by prefix length descending for longest-match-first
        self.commands.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    }

    /// Execute a command, returning NotACommand if no match found
    pub fn execute(&self, input: &str, ctx: &mut CommandContext) -> CommandResult {
        for (prefix, handler) in &self.commands {
            if input == prefix || input.starts_with(&format!("{} ", prefix)) {
                let args = if input.len() > prefix.len() {
                    input[prefix.len()..].trim()
                } else {
                    ""
                };
                return handler(args, ctx);
            }
        }
        CommandResult::NotACommand
    }

    /// Get all registered command prefixes
    pub fn list_commands(&self) -> Vec<&str> {
        self.commands.iter().map(|(p, _)| p.as_str()).collect()
    }
}

impl Default for CommandRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Create a fully populated command registry with all built-in commands
pub fn create_registry() -> CommandRegistry {
    let mut registry = CommandRegistry::new();

    // Detection commands
    registry.register("detect", detect::cmd_detect);
    registry.register("load", detect::cmd_load);
    registry.register("segments", detect::cmd_segments);
    registry.register("similarity", detect::cmd_similarity);
    registry.register("row", detect::cmd_row);
    registry.register("show", detect::cmd_show);

    // Configuration
    registry.register("set", settings::cmd_set);
    registry.register("config", settings::cmd_config);
    registry.register("reset", settings::cmd_reset);

    // General commands
    registry.register("help", general::cmd_help);
    registry.register("quit", general::cmd_quit);
    registry.register("exit", general::cmd_quit);
    registry.register("watch", general::cmd_watch);

    registry
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_longest_prefix_wins() {
        fn short(_: &str, _: &mut CommandContext) -> CommandResult {
            CommandResult::Message("short".to_string())
        }
        fn long(args: &str, _: &mut CommandContext) -> CommandResult {
            CommandResult::Message(format!("long:{}", args))
        }

        let mut registry = CommandRegistry::new();
        registry.register("set", short);
        registry.register("set policy", long);
        let mut ctx = CommandContext::default();

        match registry.execute("set policy weighted", &mut ctx) {
            CommandResult::Message(m) => assert_eq!(m, "long:weighted"),
            other => panic!("unexpected {:?}", other),
        }
        match registry.execute("set min_length 2", &mut ctx) {
            CommandResult::Message(m) => assert_eq!(m, "short"),
            other => panic!("unexpected {:?}", other),
        }
    }

    #[test]
    fn test_unknown_input_is_not_a_command() {
        let registry = create_registry();
        let mut ctx = CommandContext::default();
        assert!(matches!(
            registry.execute("C4 D4 E4", &mut ctx),
            CommandResult::NotACommand
        ));
        // A prefix must be followed by a space
        assert!(matches!(
            registry.execute("settle", &mut ctx),
            CommandResult::NotACommand
        ));
    }

    #[test]
    fn test_registry_lists_builtins() {
        let registry = create_registry();
        let commands = registry.list_commands();
        for name in ["detect", "load", "watch", "set", "config", "help", "quit"] {
            assert!(commands.contains(&name), "missing {}", name);
        }
    }

    #[test]
    fn test_set_events_replaces_line() {
        let mut ctx = CommandContext::default();
        assert_eq!(ctx.set_events("C4 _ D4").unwrap(), 3);
        assert!(ctx.set_events("C4 Q4").is_err());
    }

    #[test]
    fn test_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("theme.motif");
        std::fs::write(&path, "# theme\nC4 D4 E4 C4\nF5 C4 D4 E4 C4\n").unwrap();

        let mut ctx = CommandContext::default();
        assert_eq!(ctx.load_file(&path).unwrap(), 9);
        assert_eq!(ctx.source.as_deref(), Some(path.as_path()));

        let missing = dir.path().join("missing.motif");
        assert!(ctx.load_file(&missing).is_err());
    }
}
