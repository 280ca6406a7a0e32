//! Converter session
//!
//! The one object a front end talks to. It owns the live rate table and the
//! history list, turns raw input into display strings, and records saved
//! conversions. All calls run on the caller's thread; the rate load is the
//! only await point.

use crate::converter::{self, ConversionRequest, ConversionResult};
use crate::currency::CurrencyCode;
use crate::error::{CursError, Result};
use crate::format::{self, NumberLocale};
use crate::history::{HistoryEntry, HistoryManager};
use crate::rates::{RateSource, RateStore, RateTable};
use crate::storage::KeyValueStore;

/// What the front end shows for the current input
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionDisplay {
    /// Converted value with currency code, or a placeholder
    pub result: String,
    /// `1 EUR = 1.0955 USD`, the loading notice, or nothing
    pub rate_info: Option<String>,
}

/// Rate store, history and formatting for one user session
pub struct Session<S: KeyValueStore> {
    rates: RateStore,
    history: HistoryManager<S>,
    locale: NumberLocale,
}

impl<S: KeyValueStore> Session<S> {
    /// Open a session; the stored history is read immediately
    pub fn new(store: S, locale: NumberLocale) -> Self {
        Self {
            rates: RateStore::new(),
            history: HistoryManager::open(store),
            locale,
        }
    }

    /// Load (or reload) the rate table
    pub async fn load_rates<R: RateSource>(&mut self, source: &R) -> Result<&RateTable> {
        self.rates.load(source).await
    }

    pub fn rates(&self) -> &RateStore {
        &self.rates
    }

    pub fn rates_mut(&mut self) -> &mut RateStore {
        &mut self.rates
    }

    pub fn locale(&self) -> NumberLocale {
        self.locale
    }

    /// Compute a conversion from raw input
    pub fn convert(&self, amount: &str, from: &str, to: &str) -> Result<ConversionResult> {
        let table = self.rates.require_table()?;
        let request = ConversionRequest::parse(amount, from, to)?;
        converter::convert(&request, Some(table))
    }

    /// Display strings for raw input; errors become placeholders
    pub fn display(&self, amount: &str, from: &str, to: &str) -> ConversionDisplay {
        let table = match self.rates.table() {
            Some(table) => table,
            None => {
                return ConversionDisplay {
                    result: format::ERROR_PLACEHOLDER.to_string(),
                    rate_info: Some(format::LOADING_NOTICE.to_string()),
                }
            }
        };

        let codes = CurrencyCode::new(from).and_then(|f| CurrencyCode::new(to).map(|t| (f, t)));
        let (from, to) = match codes {
            Ok(codes) => codes,
            Err(_) => return unknown_display(),
        };

        let rate_info = converter::unit_rate(table, &from, &to)
            .ok()
            .map(|rate| format::format_unit_rate(rate, &from, &to));

        let result = match converter::parse_amount(amount) {
            Ok(value) => {
                match converter::convert(&ConversionRequest::new(value, from, to.clone()), Some(table)) {
                    Ok(result) => format::format_result(result.value, &to, self.locale),
                    Err(e) => ConversionDisplay::from(e).result,
                }
            }
            Err(_) => format::ZERO_PLACEHOLDER.to_string(),
        };

        ConversionDisplay { result, rate_info }
    }

    /// Publication notice of the loaded table
    pub fn notice(&self) -> Option<String> {
        self.rates.table().and_then(format::publication_notice)
    }

    /// Convert and record the conversion in history.
    ///
    /// Returns `Ok(false)` when it repeats the most recent entry. Failed
    /// conversions are returned as errors and never recorded.
    pub fn save(&mut self, amount: &str, from: &str, to: &str) -> Result<bool> {
        let result = self.convert(amount, from, to)?;
        let from = CurrencyCode::new(from)?;
        let to = CurrencyCode::new(to)?;
        let entry = HistoryEntry::new(
            amount,
            &from,
            &to,
            format::format_amount(result.value, self.locale),
        );
        Ok(self.history.append(entry))
    }

    pub fn history(&self) -> &[HistoryEntry] {
        self.history.entries()
    }

    pub fn remove_history(&mut self, index: usize) -> Result<HistoryEntry> {
        self.history.remove(index)
    }

    pub fn clear_history(&mut self) {
        self.history.clear();
    }

    /// Re-read the stored history
    pub fn reload_history(&mut self) -> &[HistoryEntry] {
        self.history.load()
    }

    /// Usable currencies of the loaded table
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        self.rates.currencies()
    }
}

fn unknown_display() -> ConversionDisplay {
    ConversionDisplay {
        result: format::UNKNOWN_PLACEHOLDER.to_string(),
        rate_info: None,
    }
}

impl From<CursError> for ConversionDisplay {
    fn from(err: CursError) -> Self {
        let result = match err {
            CursError::InvalidAmount(_) => format::ZERO_PLACEHOLDER,
            CursError::UnknownCurrency(_) => format::UNKNOWN_PLACEHOLDER,
            _ => format::ERROR_PLACEHOLDER,
        };
        ConversionDisplay {
            result: result.to_string(),
            rate_info: None,
        }
    }
}
