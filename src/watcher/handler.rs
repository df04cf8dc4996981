//! Event bookkeeping for the vault watcher
//!
//! Two jobs: debounce bursts of create events for the same note, and pair
//! the From/To halves of renames on platforms where notify reports them as
//! separate events.

use indexmap::IndexMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

/// Maximum number of entries in the debounce map before forcing a cleanup
const MAX_DEBOUNCE_ENTRIES: usize = 10_000;

/// How long an unmatched rename From-half is kept before being discarded
const RENAME_PAIR_WINDOW: Duration = Duration::from_secs(2);

pub struct EventHandler {
    /// Recently created notes by path (IndexMap preserves insertion order
    /// for fair cleanup)
    recent_creates: IndexMap<PathBuf, Instant>,

    /// A rename From-half waiting for its To-half
    pending_rename: Option<(PathBuf, Instant)>,

    /// Debounce duration for create events
    debounce: Duration,
}

impl EventHandler {
    pub fn new(debounce_seconds: u64) -> Self {
        Self {
            recent_creates: IndexMap::new(),
            pending_rename: None,
            debounce: Duration::from_secs(debounce_seconds),
        }
    }

    /// Check if a created note should be processed (true if not seen within
    /// the debounce window)
    pub fn should_process_create(&mut self, path: &Path) -> bool {
        let now = Instant::now();
        let process = self
            .recent_creates
            .get(path)
            .map(|&last| now.duration_since(last) > self.debounce)
            .unwrap_or(true);

        if process {
            self.recent_creates.insert(path.to_path_buf(), now);
        }

        // If the map has grown too large, force a cleanup
        if self.recent_creates.len() > MAX_DEBOUNCE_ENTRIES {
            self.cleanup();
        }

        process
    }

    /// Record the From-half of a split rename event
    pub fn begin_rename(&mut self, from: PathBuf) {
        self.pending_rename = Some((from, Instant::now()));
    }

    /// Complete a split rename with its To-half, returning the old path if
    /// a fresh From-half was pending
    pub fn complete_rename(&mut self, _to: &Path) -> Option<PathBuf> {
        let (from, seen) = self.pending_rename.take()?;
        if seen.elapsed() > RENAME_PAIR_WINDOW {
            // Stale half from an unrelated rename, drop it
            return None;
        }
        Some(from)
    }

    /// Clean up old entries (call periodically)
    pub fn cleanup(&mut self) {
        let now = Instant::now();
        let threshold = self.debounce * 10; // Keep entries for 10x debounce period

        self.recent_creates
            .retain(|_, &mut last| now.duration_since(last) < threshold);

        if self
            .pending_rename
            .as_ref()
            .is_some_and(|(_, seen)| seen.elapsed() > RENAME_PAIR_WINDOW)
        {
            self.pending_rename = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_debounce() {
        let mut handler = EventHandler::new(1);
        let path = PathBuf::from("/vault/TODO-x.md");

        // First event should be processed
        assert!(handler.should_process_create(&path));

        // Immediate second event should be debounced
        assert!(!handler.should_process_create(&path));

        // A different note is unaffected
        assert!(handler.should_process_create(&PathBuf::from("/vault/other.md")));
    }

    #[test]
    fn test_rename_pairing() {
        let mut handler = EventHandler::new(1);
        let to = PathBuf::from("/vault/TODO-2.md");

        // No pending half yet
        assert_eq!(handler.complete_rename(&to), None);

        handler.begin_rename(PathBuf::from("/vault/TODO-1.md"));
        assert_eq!(
            handler.complete_rename(&to),
            Some(PathBuf::from("/vault/TODO-1.md"))
        );

        // The half is consumed
        assert_eq!(handler.complete_rename(&to), None);
    }
}
