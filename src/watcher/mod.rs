//! Vault watcher - turns filesystem events into create/rename templating
//!
//! The original host application delivers per-file create and rename
//! notifications; here notify supplies them. Only markdown notes are
//! considered, and pre-existing notes are never scanned: templating is
//! strictly event-triggered.

mod handler;

pub use handler::EventHandler;

use anyhow::Result;
use notify::event::{ModifyKind, RenameMode};
use notify::{Config as NotifyConfig, EventKind, RecommendedWatcher, RecursiveMode, Watcher as NotifyWatcher};
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::mpsc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::config::Config;
use crate::controller::TemplateController;
use crate::vault::{FsVault, is_note};

/// Watches a vault directory and applies templates on note create/rename
pub struct Watcher {
    watcher: RecommendedWatcher,
    controller: TemplateController<FsVault>,
    config: Config,
    rx: mpsc::Receiver<Result<notify::Event, notify::Error>>,
    event_handler: EventHandler,
    notes_templated: Arc<AtomicU64>,
}

impl Watcher {
    /// Create a new watcher over the given vault root
    pub fn new(config: Config, vault_root: &Path) -> Result<Self> {
        let (tx, rx) = mpsc::channel();

        let watcher = RecommendedWatcher::new(
            move |res| {
                if let Err(e) = tx.send(res) {
                    error!("Failed to send watch event: {}", e);
                }
            },
            NotifyConfig::default()
                .with_poll_interval(Duration::from_secs(config.general.polling_interval_secs)),
        )?;

        let event_handler = EventHandler::new(config.general.debounce_seconds);

        Ok(Self {
            watcher,
            controller: TemplateController::new(FsVault::new(vault_root)),
            config,
            rx,
            event_handler,
            notes_templated: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Start watching the vault root recursively
    pub fn watch(&mut self) -> Result<()> {
        let root = self.controller.vault().root().to_path_buf();
        self.watcher.watch(&root, RecursiveMode::Recursive)?;
        info!("Watching vault: {}", root.display());
        Ok(())
    }

    /// Stop watching the vault root
    pub fn unwatch(&mut self) -> Result<()> {
        let root = self.controller.vault().root().to_path_buf();
        self.watcher.unwatch(&root)?;
        info!("Stopped watching: {}", root.display());
        Ok(())
    }

    /// Process pending events (non-blocking)
    pub fn poll(&self) -> Vec<notify::Event> {
        let mut events = Vec::new();

        while let Ok(result) = self.rx.try_recv() {
            match result {
                Ok(event) => events.push(event),
                Err(e) => error!("Watch error: {}", e),
            }
        }

        events
    }

    /// Route already-polled events to the controller
    pub fn process_polled_events(&mut self, events: Vec<notify::Event>) -> usize {
        let mut applied = 0;

        for event in events {
            debug!("Event: {:?}", event.kind);

            match event.kind {
                EventKind::Create(_) => {
                    for path in &event.paths {
                        if !is_note(path) {
                            continue;
                        }
                        if !self.event_handler.should_process_create(path) {
                            debug!("Debounced create: {}", path.display());
                            continue;
                        }
                        info!("Note created: {}", path.display());
                        if self.controller.on_create(&self.config, path) {
                            applied += 1;
                        }
                    }
                }

                // Rename reported as a single event with [from, to]
                EventKind::Modify(ModifyKind::Name(RenameMode::Both)) => {
                    if let [from, to] = event.paths.as_slice()
                        && is_note(to)
                    {
                        applied += self.handle_rename(to, from) as usize;
                    }
                }

                // Rename reported as separate halves, paired by the handler
                EventKind::Modify(ModifyKind::Name(RenameMode::From)) => {
                    if let Some(from) = event.paths.first() {
                        self.event_handler.begin_rename(from.clone());
                    }
                }
                EventKind::Modify(ModifyKind::Name(RenameMode::To | RenameMode::Any)) => {
                    if let Some(to) = event.paths.first().cloned()
                        && is_note(&to)
                        && let Some(from) = self.event_handler.complete_rename(&to)
                    {
                        applied += self.handle_rename(&to, &from) as usize;
                    }
                }

                _ => {
                    debug!("Ignoring event kind: {:?}", event.kind);
                }
            }
        }

        // Periodically clean up old entries
        self.event_handler.cleanup();

        self.notes_templated
            .fetch_add(applied as u64, Ordering::Relaxed);
        applied
    }

    fn handle_rename(&self, to: &Path, from: &Path) -> bool {
        info!("Note renamed: {} -> {}", from.display(), to.display());
        self.controller.on_rename(&self.config, to, from)
    }

    /// Process events and apply templates (polls + processes)
    pub fn process_events(&mut self) -> usize {
        let events = self.poll();
        self.process_polled_events(events)
    }

    /// Total number of notes templated since startup
    pub fn notes_templated(&self) -> u64 {
        self.notes_templated.load(Ordering::Relaxed)
    }
}
