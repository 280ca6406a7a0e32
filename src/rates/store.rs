//! Rate store - holds the currently loaded table

use super::source::RateSource;
use super::table::RateTable;
use crate::currency::CurrencyCode;
use crate::error::{CursError, Result};

/// Where the store stands after its last load attempt
#[derive(Debug, Clone, PartialEq)]
pub enum LoadState {
    /// No load attempted yet
    NotLoaded,
    /// A table is available
    Loaded,
    /// The last load failed; no table is held
    Unavailable(String),
}

/// Owner of the single live [`RateTable`].
///
/// Every load replaces the table wholesale. A failed load drops whatever was
/// loaded before, so callers never compute against a stale table.
#[derive(Debug, Default)]
pub struct RateStore {
    table: Option<RateTable>,
    last_error: Option<String>,
}

impl RateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch and parse a table from `source`
    pub async fn load<S: RateSource>(&mut self, source: &S) -> Result<&RateTable> {
        let parsed = match source.fetch().await {
            Ok(payload) => RateTable::from_json(&payload),
            Err(e) => Err(e),
        };

        match parsed {
            Ok(table) => {
                log::info!(
                    "Loaded {} rates from {} (date: {})",
                    table.len(),
                    source.name(),
                    table.publication_date().unwrap_or("unknown")
                );
                self.last_error = None;
                let table: &RateTable = self.table.insert(table);
                Ok(table)
            }
            Err(e) => {
                log::warn!("Failed to load rates from {}: {}", source.name(), e);
                self.table = None;
                self.last_error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Install an already parsed table
    pub fn replace(&mut self, table: RateTable) {
        self.table = Some(table);
        self.last_error = None;
    }

    pub fn table(&self) -> Option<&RateTable> {
        self.table.as_ref()
    }

    /// Loaded table, or the error explaining why there is none
    pub fn require_table(&self) -> Result<&RateTable> {
        match (&self.table, &self.last_error) {
            (Some(table), _) => Ok(table),
            (None, Some(reason)) => Err(CursError::RatesUnavailable(reason.clone())),
            (None, None) => Err(CursError::NoTableLoaded),
        }
    }

    pub fn state(&self) -> LoadState {
        match (&self.table, &self.last_error) {
            (Some(_), _) => LoadState::Loaded,
            (None, Some(reason)) => LoadState::Unavailable(reason.clone()),
            (None, None) => LoadState::NotLoaded,
        }
    }

    pub fn is_loaded(&self) -> bool {
        self.table.is_some()
    }

    /// Usable currencies of the loaded table; empty when nothing is loaded
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        self.table
            .as_ref()
            .map(RateTable::currencies)
            .unwrap_or_default()
    }
}
