//! Exchange rate tables
//!
//! Rates are quoted against a single base currency (MDL for the official BNM
//! table); there are no stored cross rates.
//!
//! # Components
//!
//! - **table**: the parsed, immutable [`RateTable`]
//! - **source**: the [`RateSource`] trait plus file and static sources
//! - **http**: remote source with cache busting (feature `async`)
//! - **store**: [`RateStore`], the owner of the live table
//!
//! # Example
//!
//! ```rust
//! use rusty_curs::rates::{RateStore, StaticRateSource};
//!
//! let rt = tokio::runtime::Builder::new_current_thread().build().unwrap();
//! rt.block_on(async {
//!     let mut store = RateStore::new();
//!     let source = StaticRateSource::new(r#"{"rates":{"mdl":1,"eur":19.5}}"#);
//!     store.load(&source).await.unwrap();
//!     assert_eq!(store.currencies().len(), 2);
//! });
//! ```

#[cfg(feature = "async")]
pub mod http;
pub mod source;
pub mod store;
pub mod table;

#[cfg(feature = "async")]
pub use http::HttpRateSource;
pub use source::{FileRateSource, RateSource, StaticRateSource};
pub use store::{LoadState, RateStore};
pub use table::RateTable;
