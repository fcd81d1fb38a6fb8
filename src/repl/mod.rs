//! REPL (Read-Eval-Print Loop) for interactive motif detection

use crate::commands::detect::run_detection;
use crate::commands::{create_registry, CommandContext, CommandRegistry, CommandResult};
use crate::repl::watcher::{is_reload, FileWatcher};
use anyhow::Result;
use colored::*;
use crossbeam_channel::{unbounded, Receiver, Sender};
use motif_core::FinderConfig;
use notify::Event;
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RustylineResult};
use std::path::Path;
use std::thread;

pub mod watcher;

/// Types of events the REPL loop handles
enum ReplEvent {
    Input(Result<String, ReadlineError>),
}

/// Interactive detection session
pub struct Repl {
    editor: Option<DefaultEditor>,
    registry: CommandRegistry,
    ctx: CommandContext,

    // Event channels
    tx_input: Sender<ReplEvent>,
    rx_input: Receiver<ReplEvent>,
    tx_watcher: Sender<notify::Result<Event>>,
    rx_watcher: Receiver<notify::Result<Event>>,

    // File watcher, created on the first `watch`
    watcher: Option<FileWatcher>,
}

impl Repl {
    /// Create a new REPL instance
    pub fn new(config: FinderConfig) -> RustylineResult<Self> {
        let editor = DefaultEditor::new()?;
        let (tx_input, rx_input) = unbounded();
        let (tx_watcher, rx_watcher) = unbounded();

        Ok(Repl {
            editor: Some(editor),
            registry: create_registry(),
            ctx: CommandContext::new(config),
            tx_input,
            rx_input,
            tx_watcher,
            rx_watcher,
            watcher: None,
        })
    }

    /// Evaluate one input line. Returns false when the session should end.
    pub fn handle_line(&mut self, line: &str) -> bool {
        if line.is_empty() {
            return true;
        }

        match self.registry.execute(line, &mut self.ctx) {
            CommandResult::Success => {}
            CommandResult::Message(msg) => println!("{}", msg),
            CommandResult::Exit => {
                println!("{} 🎼", "Goodbye!".bright_cyan());
                return false;
            }
            CommandResult::Error(e) => {
                println!("{} {}", "Error:".bright_red().bold(), e.red());
            }
            CommandResult::Watch(path) => self.start_watching(&path),
            CommandResult::NotACommand => {
                // Anything else is read as a line of events
                match self.ctx.set_events(line) {
                    Ok(_) => print_result(run_detection(&self.ctx)),
                    Err(e) => println!(
                        "{} {}",
                        "Parse error:".bright_red().bold(),
                        e.to_string().red()
                    ),
                }
            }
        }
        true
    }

    fn start_watching(&mut self, path: &str) {
        if self.watcher.is_none() {
            match FileWatcher::new(self.tx_watcher.clone()) {
                Ok(w) => self.watcher = Some(w),
                Err(e) => {
                    println!("{} Failed to create watcher: {}", "Error:".red(), e);
                    return;
                }
            }
        }

        if let Some(w) = &mut self.watcher {
            if let Err(e) = w.watch(path) {
                println!("{} Failed to watch {}: {}", "Error:".red(), path, e);
                return;
            }
            println!("👀 Watching {} for changes...", path.bright_green());
        }

        // Detect on the current contents right away
        self.reload(Path::new(path));
    }

    fn reload(&mut self, path: &Path) {
        match self.ctx.load_file(path) {
            Ok(count) => {
                println!("{} Reloaded {} events", "✓".bright_green(), count);
                print_result(run_detection(&self.ctx));
            }
            Err(e) => println!("{} {:#}", "Error:".red(), e),
        }
    }

    fn handle_watch_event(&mut self, event: Event) {
        if !is_reload(&event) {
            return;
        }
        for path in event.paths {
            let watched = self
                .watcher
                .as_ref()
                .is_some_and(|w| w.is_watched(&path));
            if !watched {
                continue;
            }
            println!("{} File changed: {}", "⚡".bright_yellow(), path.display());
            self.reload(&path);
        }
    }

    /// Run the REPL loop
    pub fn run(&mut self) -> Result<()> {
        println!(
            "{} {}",
            "🎼".bright_yellow(),
            "Motif: repeated-pattern detector".bright_cyan().bold()
        );
        println!(
            "Type a line like: {}",
            "C4 D4 E4 C4 F5 C4 D4 E4 C4 G4".cyan()
        );
        println!(
            "Type '{}' for more information, '{}' or {} to exit.\n",
            "help".bright_green(),
            "quit".bright_red(),
            "Ctrl+C".bright_red()
        );

        // Move editor to thread
        let mut editor = self
            .editor
            .take()
            .ok_or_else(|| anyhow::anyhow!("REPL is already running"))?;
        let tx_input = self.tx_input.clone();

        thread::spawn(move || loop {
            let prompt = format!("{} ", "motif>".bright_magenta().bold());
            match editor.readline(&prompt) {
                Ok(line) => {
                    let line = line.trim().to_string();
                    if !line.is_empty() {
                        let _ = editor.add_history_entry(&line);
                    }
                    if tx_input.send(ReplEvent::Input(Ok(line))).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    let _ = tx_input.send(ReplEvent::Input(Err(err)));
                    break;
                }
            }
        });

        loop {
            crossbeam_channel::select! {
                recv(self.rx_input) -> msg => match msg {
                    Ok(ReplEvent::Input(Ok(line))) => {
                        if !self.handle_line(&line) {
                            break;
                        }
                    }
                    Ok(ReplEvent::Input(Err(ReadlineError::Interrupted | ReadlineError::Eof))) => {
                        println!("{} 🎼", "Goodbye!".bright_cyan());
                        break;
                    }
                    Ok(ReplEvent::Input(Err(err))) => {
                        println!(
                            "{} {}",
                            "Error reading input:".bright_red().bold(),
                            err.to_string().red()
                        );
                        break;
                    }
                    Err(_) => break, // Channel closed
                },

                recv(self.rx_watcher) -> msg => match msg {
                    Ok(Ok(event)) => self.handle_watch_event(event),
                    Ok(Err(e)) => println!("{} Watch error: {}", "Error:".red(), e),
                    Err(_) => break,
                }
            }
        }

        Ok(())
    }

    pub fn context(&self) -> &CommandContext {
        &self.ctx
    }
}

fn print_result(result: CommandResult) {
    match result {
        CommandResult::Message(msg) => println!("{}", msg),
        CommandResult::Error(e) => println!("{} {}", "Error:".bright_red().bold(), e.red()),
        _ => {}
    }
}

/// Convenience function to start the REPL
pub fn start(config: FinderConfig) -> Result<()> {
    let mut repl =
        Repl::new(config).map_err(|e| anyhow::anyhow!("Failed to initialize REPL: {}", e))?;
    repl.run()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn repl() -> Repl {
        colored::control::set_override(false);
        Repl::new(FinderConfig::new().with_max_length_difference(2)).unwrap()
    }

    #[test]
    fn test_plain_line_is_detected() {
        let mut repl = repl();
        assert!(repl.handle_line("C4 D4 E4 C4 F5 C4 D4 E4 C4 G4"));
        assert_eq!(repl.context().events.len(), 10);
    }

    #[test]
    fn test_commands_and_exit() {
        let mut repl = repl();
        assert!(repl.handle_line("set min_length 2"));
        assert_eq!(repl.context().config.min_length, 2);
        assert!(repl.handle_line("not notation at all"));
        assert!(repl.context().events.is_empty());
        assert!(!repl.handle_line("quit"));
    }

    #[test]
    fn test_watch_loads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("line.motif");
        std::fs::write(&path, "C3 G2 C3 G2").unwrap();

        let mut repl = repl();
        let line = format!("watch {}", path.display());
        assert!(repl.handle_line(&line));
        assert_eq!(repl.context().events.len(), 4);
        assert_eq!(repl.context().source.as_deref(), Some(path.as_path()));
    }
}
