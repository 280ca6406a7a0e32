//! Rate table - rates of every currency against the base currency

use crate::currency::CurrencyCode;
use crate::error::{CursError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Snapshot of one published rate table.
///
/// Each rate is the number of base-currency units (MDL) per one unit of the
/// currency. Entries that are zero, negative or not finite are kept for
/// inspection but never used in a conversion.
///
/// # Example
/// ```
/// use rusty_curs::rates::RateTable;
///
/// let table = RateTable::from_json(r#"{"date":"02.02.2026","rates":{"EUR":19.5,"mdl":1}}"#).unwrap();
/// assert_eq!(table.rate_of("eur"), Some(19.5));
/// assert_eq!(table.publication_date(), Some("02.02.2026"));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RateTable {
    #[serde(rename = "date", skip_serializing_if = "Option::is_none")]
    publication_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    source: Option<String>,
    rates: BTreeMap<CurrencyCode, f64>,
}

/// Wire shape of `rates.json`
#[derive(Debug, Deserialize)]
struct RateFile {
    #[serde(default)]
    date: Option<String>,
    #[serde(default)]
    source: Option<String>,
    /// Sorted by raw key so case collisions resolve the same way every load
    rates: BTreeMap<String, f64>,
}

impl RateTable {
    /// Build a table from already-parsed rates
    pub fn new(publication_date: Option<String>, rates: BTreeMap<CurrencyCode, f64>) -> Self {
        Self {
            publication_date: publication_date.filter(|d| !d.trim().is_empty()),
            source: None,
            rates,
        }
    }

    /// Attach a provenance label
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Parse a `rates.json` payload.
    ///
    /// A missing or non-object `rates` field, or a non-numeric rate value, is
    /// reported as [`CursError::RatesUnavailable`]. A missing `date` is fine.
    pub fn from_json(payload: &str) -> Result<Self> {
        let file: RateFile = serde_json::from_str(payload)
            .map_err(|e| CursError::RatesUnavailable(format!("Malformed rate payload: {}", e)))?;

        let mut rates = BTreeMap::new();
        for (raw_code, rate) in file.rates {
            let code = match CurrencyCode::new(&raw_code) {
                Ok(code) => code,
                Err(_) => {
                    log::warn!("Skipping rate with invalid currency code {:?}", raw_code);
                    continue;
                }
            };
            if !is_usable(rate) {
                log::debug!("Rate for {} is not usable: {}", code, rate);
            }
            if rates.insert(code.clone(), rate).is_some() {
                log::debug!("Duplicate rate for {} after normalization", code);
            }
        }

        let mut table = Self::new(file.date, rates);
        table.source = file.source.filter(|s| !s.trim().is_empty());
        Ok(table)
    }

    /// Publication date as published (opaque)
    pub fn publication_date(&self) -> Option<&str> {
        self.publication_date.as_deref()
    }

    /// Provenance label, if the payload carried one
    pub fn source(&self) -> Option<&str> {
        self.source.as_deref()
    }

    /// Usable rate for a code
    pub fn rate(&self, code: &CurrencyCode) -> Option<f64> {
        self.rates.get(code).copied().filter(|r| is_usable(*r))
    }

    /// Usable rate for a raw, not yet normalized code
    pub fn rate_of(&self, code: &str) -> Option<f64> {
        CurrencyCode::new(code).ok().and_then(|c| self.rate(&c))
    }

    /// Usable rate or [`CursError::UnknownCurrency`]
    pub fn require_rate(&self, code: &CurrencyCode) -> Result<f64> {
        self.rate(code)
            .ok_or_else(|| CursError::UnknownCurrency(code.display_code()))
    }

    /// Codes with a usable rate, sorted
    pub fn currencies(&self) -> Vec<CurrencyCode> {
        self.rates
            .iter()
            .filter(|(_, rate)| is_usable(**rate))
            .map(|(code, _)| code.clone())
            .collect()
    }

    /// Number of entries, usable or not
    pub fn len(&self) -> usize {
        self.rates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rates.is_empty()
    }
}

fn is_usable(rate: f64) -> bool {
    rate.is_finite() && rate > 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "date": "02.02.2026",
        "source": "Banca Națională a Moldovei",
        "rates": { "mdl": 1.0, "EUR": 19.5, "usd": 17.8, "bad": 0.0, "neg": -2.0 }
    }"#;

    #[test]
    fn test_parse_full_payload() {
        let table = RateTable::from_json(SAMPLE).unwrap();
        assert_eq!(table.publication_date(), Some("02.02.2026"));
        assert_eq!(table.source(), Some("Banca Națională a Moldovei"));
        assert_eq!(table.len(), 5);
        assert_eq!(table.rate_of("eur"), Some(19.5));
        assert_eq!(table.rate_of("USD"), Some(17.8));
    }

    #[test]
    fn test_non_positive_rates_unusable() {
        let table = RateTable::from_json(SAMPLE).unwrap();
        assert_eq!(table.rate_of("bad"), None);
        assert_eq!(table.rate_of("neg"), None);
        let codes: Vec<String> = table.currencies().iter().map(|c| c.to_string()).collect();
        assert_eq!(codes, vec!["EUR", "MDL", "USD"]);
    }

    #[test]
    fn test_missing_date_tolerated() {
        let table = RateTable::from_json(r#"{"rates":{"mdl":1}}"#).unwrap();
        assert_eq!(table.publication_date(), None);
        assert_eq!(table.source(), None);
    }

    #[test]
    fn test_empty_date_treated_as_absent() {
        let table = RateTable::from_json(r#"{"date":"","rates":{"mdl":1}}"#).unwrap();
        assert_eq!(table.publication_date(), None);
    }

    #[test]
    fn test_missing_rates_is_unavailable() {
        let err = RateTable::from_json(r#"{"date":"01.01.2026"}"#).unwrap_err();
        assert!(matches!(err, CursError::RatesUnavailable(_)));
    }

    #[test]
    fn test_non_object_rates_is_unavailable() {
        assert!(RateTable::from_json(r#"{"rates":[1,2]}"#).is_err());
        assert!(RateTable::from_json(r#"{"rates":{"eur":"19.5"}}"#).is_err());
        assert!(RateTable::from_json("not json").is_err());
    }

    #[test]
    fn test_case_collision_is_deterministic() {
        // Raw keys sort as "EUR" < "Eur" < "eur"; the last one wins
        for _ in 0..16 {
            let table =
                RateTable::from_json(r#"{"rates":{"eur":19.5,"EUR":20.0,"Eur":21.0}}"#).unwrap();
            assert_eq!(table.len(), 1);
            assert_eq!(table.rate_of("eur"), Some(19.5));
        }
    }

    #[test]
    fn test_require_rate_reports_display_code() {
        let table = RateTable::from_json(SAMPLE).unwrap();
        let xyz = CurrencyCode::new("xyz").unwrap();
        match table.require_rate(&xyz) {
            Err(CursError::UnknownCurrency(code)) => assert_eq!(code, "XYZ"),
            other => panic!("unexpected: {:?}", other),
        }
    }
}
