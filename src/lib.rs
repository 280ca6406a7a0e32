//! # rusty-curs
//!
//! Currency converter over the official exchange rates published by the
//! National Bank of Moldova (BNM).
//!
//! A rate table quotes every currency against the base currency (MDL).
//! Conversions go through the base: `amount * rate(from) / rate(to)`. Saved
//! conversions are kept in a short, persisted history.
//!
//! ## Example
//!
//! ```rust
//! use rusty_curs::prelude::*;
//!
//! let table = RateTable::from_json(r#"{"rates":{"eur":19.50,"usd":17.80,"mdl":1}}"#).unwrap();
//! let request = ConversionRequest::parse("100", "eur", "usd").unwrap();
//! let result = convert(&request, Some(&table)).unwrap();
//!
//! assert_eq!(format_result(result.value, &request.to, NumberLocale::Plain), "109.55 USD");
//! assert_eq!(format_unit_rate(result.unit_rate, &request.from, &request.to), "1 EUR = 1.0955 USD");
//! ```

#[cfg(feature = "cli")]
pub mod config;
pub mod converter;
pub mod currency;
pub mod error;
pub mod format;
pub mod history;
pub mod rates;
pub mod session;
pub mod storage;

pub mod prelude {
    //! Commonly used types and functions
    pub use crate::converter::{convert, parse_amount, ConversionRequest, ConversionResult};
    pub use crate::currency::CurrencyCode;
    pub use crate::error::{CursError, Result};
    pub use crate::format::{format_result, format_unit_rate, NumberLocale};
    pub use crate::history::{HistoryEntry, HistoryManager};
    pub use crate::rates::{FileRateSource, RateSource, RateStore, RateTable};
    pub use crate::session::{ConversionDisplay, Session};
    pub use crate::storage::{FileStore, KeyValueStore, MemoryStore};
}
