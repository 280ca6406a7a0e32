//! History manager - bounded, persisted list of saved conversions

use super::entry::HistoryEntry;
use crate::error::{CursError, Result};
use crate::storage::KeyValueStore;

/// Storage key of the history list
pub const HISTORY_KEY: &str = "conversionHistory";

/// Maximum number of entries kept
pub const MAX_HISTORY: usize = 10;

/// Prepend `entry` unless it repeats the most recent conversion.
///
/// Returns `false` when the entry was a consecutive duplicate. The list is
/// truncated to [`MAX_HISTORY`], dropping the oldest entries.
pub fn push_front_capped(history: &mut Vec<HistoryEntry>, entry: HistoryEntry) -> bool {
    if history
        .first()
        .is_some_and(|latest| latest.is_same_conversion(&entry))
    {
        return false;
    }
    history.insert(0, entry);
    history.truncate(MAX_HISTORY);
    true
}

/// Saved conversions, most recent first.
///
/// Every mutation writes the full list back to the store. A failed write is
/// logged and otherwise ignored: the in-memory list stays authoritative for
/// the rest of the session.
pub struct HistoryManager<S: KeyValueStore> {
    store: S,
    entries: Vec<HistoryEntry>,
}

impl<S: KeyValueStore> HistoryManager<S> {
    /// Manager with an empty list; call [`load`](Self::load) to read the store
    pub fn new(store: S) -> Self {
        Self {
            store,
            entries: Vec::new(),
        }
    }

    /// Manager with the persisted list already loaded
    pub fn open(store: S) -> Self {
        let mut manager = Self::new(store);
        manager.load();
        manager
    }

    /// Reload the list from the store.
    ///
    /// Never fails: a missing, unreadable or malformed value yields an empty
    /// list.
    pub fn load(&mut self) -> &[HistoryEntry] {
        self.entries = match self.store.get(HISTORY_KEY) {
            Ok(Some(raw)) => match serde_json::from_str::<Vec<HistoryEntry>>(&raw) {
                Ok(mut entries) => {
                    entries.truncate(MAX_HISTORY);
                    entries
                }
                Err(e) => {
                    log::warn!("Ignoring malformed history: {}", e);
                    Vec::new()
                }
            },
            Ok(None) => Vec::new(),
            Err(e) => {
                log::warn!("Failed to read history: {}", e);
                Vec::new()
            }
        };
        log::debug!("Loaded {} history entries", self.entries.len());
        &self.entries
    }

    /// Save a conversion; returns `false` for a consecutive duplicate
    pub fn append(&mut self, entry: HistoryEntry) -> bool {
        let added = push_front_capped(&mut self.entries, entry);
        if added {
            self.persist();
        } else {
            log::debug!("Skipping duplicate history entry");
        }
        added
    }

    /// Delete the entry at `index` (0 = most recent)
    pub fn remove(&mut self, index: usize) -> Result<HistoryEntry> {
        if index >= self.entries.len() {
            return Err(CursError::HistoryIndexOutOfRange {
                index,
                len: self.entries.len(),
            });
        }
        let removed = self.entries.remove(index);
        self.persist();
        Ok(removed)
    }

    /// Drop every entry and remove the stored key
    pub fn clear(&mut self) {
        self.entries.clear();
        if let Err(e) = self.store.remove(HISTORY_KEY) {
            log::warn!("Failed to clear stored history: {}", e);
        }
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn get(&self, index: usize) -> Option<&HistoryEntry> {
        self.entries.get(index)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn persist(&mut self) {
        let result = serde_json::to_string(&self.entries)
            .map_err(CursError::from)
            .and_then(|json| self.store.set(HISTORY_KEY, &json));
        if let Err(e) = result {
            log::warn!("Failed to persist history: {}", e);
        }
    }
}
