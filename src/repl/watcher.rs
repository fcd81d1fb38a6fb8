use crossbeam_channel::Sender;
use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use std::path::{Path, PathBuf};

/// Watches notation files on notify's background thread and forwards
/// events to a channel.
pub struct FileWatcher {
    watcher: RecommendedWatcher,
    watched: Vec<PathBuf>,
}

impl FileWatcher {
    /// Create a new file watcher that sends events to the provided channel
    pub fn new(tx: Sender<notify::Result<Event>>) -> notify::Result<Self> {
        let watcher = notify::recommended_watcher(move |res| {
            // Receiver dropped means the REPL is shutting down
            let _ = tx.send(res);
        })?;

        Ok(Self {
            watcher,
            watched: Vec::new(),
        })
    }

    /// Start watching `path`; watching the same file twice is a no-op
    pub fn watch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<()> {
        let path = path.as_ref();
        if self.is_watched(path) {
            return Ok(());
        }
        self.watcher.watch(path, RecursiveMode::NonRecursive)?;
        self.watched.push(path.to_path_buf());
        Ok(())
    }

    pub fn unwatch<P: AsRef<Path>>(&mut self, path: P) -> notify::Result<()> {
        let path = path.as_ref();
        self.watcher.unwatch(path)?;
        self.watched.retain(|p| p != path);
        Ok(())
    }

    /// Whether `path` is currently watched. Event paths from notify are
    /// absolute, so a relative watch also matches by suffix.
    pub fn is_watched(&self, path: &Path) -> bool {
        self.watched
            .iter()
            .any(|p| p == path || path.ends_with(p) || p.ends_with(path))
    }

    pub fn watched(&self) -> &[PathBuf] {
        &self.watched
    }
}

/// Whether an event means a watched file has new contents
pub fn is_reload(event: &Event) -> bool {
    matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_))
}
