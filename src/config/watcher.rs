//! Configuration file watcher for hot reload.
//!
//! # Responsibilities
//! - Watch the directory holding `clavier.toml` (editors save via
//!   rename-replace, which swaps the file's inode; watching the file
//!   itself goes silent after the first save)
//! - Collapse save bursts so one editor write triggers one reload
//! - Gate updates behind load + validation; a rejected candidate never
//!   reaches the update channel and the active snapshot stays in place

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::{Duration, Instant};

use notify::{Config, Event, RecommendedWatcher, RecursiveMode, Watcher};
use tokio::sync::mpsc;

use crate::config::loader::load_config;
use crate::config::schema::ClavierConfig;

/// Minimum spacing between accepted reload attempts.
const RELOAD_SPACING: Duration = Duration::from_millis(250);

/// Watches the configuration file and emits validated updates.
pub struct ConfigWatcher {
    path: PathBuf,
    update_tx: mpsc::UnboundedSender<ClavierConfig>,
}

impl ConfigWatcher {
    /// Create a watcher for the config at `path` and the channel its
    /// validated updates arrive on.
    pub fn new(path: &Path) -> (Self, mpsc::UnboundedReceiver<ClavierConfig>) {
        let (update_tx, update_rx) = mpsc::unbounded_channel();

        (
            Self {
                path: path.to_path_buf(),
                update_tx,
            },
            update_rx,
        )
    }

    /// Start watching. The returned handle must be kept alive; dropping it
    /// stops the notify backend.
    pub fn run(self) -> Result<RecommendedWatcher, notify::Error> {
        let Self { path, update_tx } = self;

        let file_name = path.file_name().map(OsStr::to_os_string);
        let watch_dir = match path.parent() {
            Some(dir) if !dir.as_os_str().is_empty() => dir.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let gate = ReloadGate::new(RELOAD_SPACING);
        let config_path = path.clone();

        let mut watcher = RecommendedWatcher::new(
            move |res: notify::Result<Event>| {
                let event = match res {
                    Ok(event) => event,
                    Err(e) => {
                        tracing::warn!(error = %e, "filesystem watch error");
                        return;
                    }
                };

                if !concerns_config(&event, file_name.as_deref()) {
                    return;
                }
                if !gate.try_pass() {
                    return;
                }

                match load_config(&config_path) {
                    Ok(update) => {
                        tracing::info!(
                            path = %config_path.display(),
                            cache_rules = update.cache.rules.len(),
                            proxy_rules = update.dev_server.proxy.len(),
                            "configuration change accepted"
                        );
                        let _ = update_tx.send(update);
                    }
                    Err(e) => {
                        tracing::warn!(
                            path = %config_path.display(),
                            error = %e,
                            "configuration change rejected, keeping active snapshot"
                        );
                    }
                }
            },
            Config::default().with_poll_interval(Duration::from_millis(500)),
        )?;

        watcher.watch(&watch_dir, RecursiveMode::NonRecursive)?;

        tracing::info!(
            path = %path.display(),
            dir = %watch_dir.display(),
            "watching configuration file"
        );
        Ok(watcher)
    }
}

/// True when the event is a write/create touching the config file.
///
/// Poll backends may report events without paths; those pass through and
/// the loader decides whether anything actually changed.
fn concerns_config(event: &Event, file_name: Option<&OsStr>) -> bool {
    if !(event.kind.is_modify() || event.kind.is_create()) {
        return false;
    }
    if event.paths.is_empty() {
        return true;
    }
    event
        .paths
        .iter()
        .any(|p| p.file_name() == file_name)
}

/// Leading-edge debounce: the first attempt passes, followers inside the
/// spacing window are dropped.
struct ReloadGate {
    last_pass: Mutex<Option<Instant>>,
    spacing: Duration,
}

impl ReloadGate {
    fn new(spacing: Duration) -> Self {
        Self {
            last_pass: Mutex::new(None),
            spacing,
        }
    }

    fn try_pass(&self) -> bool {
        let Ok(mut last_pass) = self.last_pass.lock() else {
            return true;
        };
        let now = Instant::now();
        match *last_pass {
            Some(last) if now.duration_since(last) < self.spacing => false,
            _ => {
                *last_pass = Some(now);
                true
            }
        }
    }
}
