//! Debounced regeneration while the tag registry is being edited.
//!
//! A `notify` watcher on the registry's and the output's directories marks
//! the watcher dirty when either file is created, modified or removed. Call
//! [`RegistryWatcher::poll`] from an idle hook (an editor frame, a dev tool
//! loop): when dirty, it re-reads the registry at most once per interval and
//! rewrites the output if its body differs, so a deleted or hand-edited
//! output is restored. Failures are logged and retried; they never reach the
//! caller as errors.
//!
//! If the filesystem watcher cannot be created, every poll past the
//! interval re-reads the registry instead.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::mpsc;
use std::time::{Duration, Instant};

use notify::{EventKind, RecommendedWatcher, RecursiveMode, Watcher};

use crate::{toml_parser::TagsConfig, write_if_changed};

/// Minimum time between two registry reads unless configured otherwise.
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(2);

/// Paths and timing for a [`RegistryWatcher`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WatcherConfig {
    pub registry_path: PathBuf,
    pub output_path: PathBuf,
    pub interval: Duration,
}

impl WatcherConfig {
    pub fn new(registry_path: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            registry_path: registry_path.into(),
            output_path: output_path.into(),
            interval: DEFAULT_INTERVAL,
        }
    }

    /// Builder method: set the minimum polling interval.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }
}

/// Result of one [`RegistryWatcher::poll`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollOutcome {
    /// A play session is running; nothing was read.
    Paused,
    /// No registry or output change since the last read.
    Idle,
    /// A change is pending but the interval has not elapsed yet.
    Throttled,
    /// Registry read; output already up to date.
    Unchanged,
    /// The output was (re)written.
    Regenerated,
    /// Reading, parsing or writing failed; logged and retried later.
    Failed,
}

type EventReceiver = mpsc::Receiver<notify::Result<notify::Event>>;

/// Watches a tag registry file and regenerates its constants on change.
pub struct RegistryWatcher {
    config: WatcherConfig,
    /// `None` if the filesystem watcher failed; every poll then re-reads.
    watcher: Option<RecommendedWatcher>,
    rx: EventReceiver,
    dirty: bool,
    last_read: Option<Instant>,
    playing: bool,
}

impl RegistryWatcher {
    /// Create a watcher and start watching the registry and output directories.
    ///
    /// The first poll always reads the registry.
    pub fn new(config: WatcherConfig) -> Self {
        let (tx, rx) = mpsc::channel();
        let watcher = notify::recommended_watcher(move |res: notify::Result<notify::Event>| {
            let _ = tx.send(res);
        });

        let watcher = match watcher {
            Ok(mut watcher) => {
                if watch_dirs(&mut watcher, &config) {
                    Some(watcher)
                } else {
                    None
                }
            }
            Err(e) => {
                tracing::warn!("failed to create registry watcher, falling back to polling: {e}");
                None
            }
        };

        Self {
            config,
            watcher,
            rx,
            dirty: true,
            last_read: None,
            playing: false,
        }
    }

    #[inline]
    pub fn config(&self) -> &WatcherConfig {
        &self.config
    }

    /// Whether filesystem events drive regeneration (as opposed to timed polling).
    #[inline]
    pub fn is_watching(&self) -> bool {
        self.watcher.is_some()
    }

    /// Suspend polling while the host runs a play session.
    ///
    /// Events seen while paused are kept and handled on the first poll after.
    pub fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
    }

    #[inline]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Make the next poll past the interval re-read the registry.
    pub fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub fn poll(&mut self) -> PollOutcome {
        self.poll_at(Instant::now())
    }

    /// [`poll`](Self::poll) with an explicit clock reading.
    pub fn poll_at(&mut self, now: Instant) -> PollOutcome {
        if self.playing {
            return PollOutcome::Paused;
        }

        self.drain_events();
        if self.watcher.is_none() {
            self.dirty = true;
        }
        if !self.dirty {
            return PollOutcome::Idle;
        }

        if let Some(last) = self.last_read
            && now.saturating_duration_since(last) < self.config.interval
        {
            return PollOutcome::Throttled;
        }
        self.last_read = Some(now);
        self.dirty = false;

        let registry = match TagsConfig::from_file(&self.config.registry_path) {
            Ok(registry) => registry,
            Err(e) => {
                tracing::warn!(
                    path = %self.config.registry_path.display(),
                    "failed to read tag registry: {e}"
                );
                return PollOutcome::Failed;
            }
        };

        match write_if_changed(&registry, &self.config.output_path) {
            Ok(true) => {
                tracing::info!(
                    path = %self.config.output_path.display(),
                    "regenerated tag constants"
                );
                PollOutcome::Regenerated
            }
            Ok(false) => PollOutcome::Unchanged,
            Err(e) => {
                tracing::warn!("failed to regenerate tag constants: {e}");
                self.dirty = true;
                PollOutcome::Failed
            }
        }
    }

    /// Move pending filesystem events into the dirty flag.
    fn drain_events(&mut self) {
        if self.watcher.is_none() {
            return;
        }

        loop {
            match self.rx.try_recv() {
                Ok(Ok(event)) => {
                    if matches!(event.kind, EventKind::Access(_)) {
                        continue;
                    }
                    if event.paths.iter().any(|path| self.is_tracked(path)) {
                        tracing::trace!(kind = ?event.kind, "tag registry or output changed");
                        self.dirty = true;
                    }
                }
                Ok(Err(e)) => {
                    tracing::warn!("registry watcher error: {e}");
                    self.dirty = true;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => {
                    tracing::warn!("registry watcher disconnected, falling back to polling");
                    self.watcher = None;
                    break;
                }
            }
        }
    }

    fn is_tracked(&self, path: &Path) -> bool {
        let Some(name) = path.file_name() else {
            return false;
        };
        [&self.config.registry_path, &self.config.output_path]
            .iter()
            .any(|tracked| tracked.file_name() == Some(name))
    }
}

impl fmt::Debug for RegistryWatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryWatcher")
            .field("config", &self.config)
            .field("watching", &self.is_watching())
            .field("dirty", &self.dirty)
            .field("last_read", &self.last_read)
            .field("playing", &self.playing)
            .finish()
    }
}

/// Watch the directories holding the registry and the output.
///
/// Directories are watched rather than files so that atomic saves and a
/// deleted output are still seen.
fn watch_dirs(watcher: &mut RecommendedWatcher, config: &WatcherConfig) -> bool {
    let mut dirs: Vec<&Path> = Vec::with_capacity(2);
    for path in [&config.registry_path, &config.output_path] {
        let dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir,
            _ => Path::new("."),
        };
        if !dirs.contains(&dir) {
            dirs.push(dir);
        }
    }

    for dir in dirs {
        if let Err(e) = watcher.watch(dir, RecursiveMode::NonRecursive) {
            tracing::warn!(
                dir = %dir.display(),
                "failed to watch directory, falling back to polling: {e}"
            );
            return false;
        }
    }
    true
}
