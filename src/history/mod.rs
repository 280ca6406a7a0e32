//! Conversion history
//!
//! A most-recent-first list of saved conversions, capped at
//! [`MAX_HISTORY`] entries and persisted through a
//! [`KeyValueStore`](crate::storage::KeyValueStore) under [`HISTORY_KEY`].

pub mod entry;
pub mod manager;

pub use entry::HistoryEntry;
pub use manager::{push_front_capped, HistoryManager, HISTORY_KEY, MAX_HISTORY};
