//! Currency conversion through the base currency
//!
//! Rates are only known against the base currency, so every conversion goes
//! `amount * rate(from)` into base units and then `/ rate(to)` into target
//! units. Results are never rounded here; see [`crate::format`].

use crate::currency::CurrencyCode;
use crate::error::{CursError, Result};
use crate::rates::RateTable;

/// One conversion to perform
#[derive(Debug, Clone, PartialEq)]
pub struct ConversionRequest {
    pub amount: f64,
    pub from: CurrencyCode,
    pub to: CurrencyCode,
}

impl ConversionRequest {
    pub fn new(amount: f64, from: CurrencyCode, to: CurrencyCode) -> Self {
        Self { amount, from, to }
    }

    /// Build a request from raw input, the way the form fields arrive
    pub fn parse(amount: &str, from: &str, to: &str) -> Result<Self> {
        Ok(Self {
            amount: parse_amount(amount)?,
            from: CurrencyCode::new(from)?,
            to: CurrencyCode::new(to)?,
        })
    }

    /// Same request with the currencies exchanged
    pub fn swapped(&self) -> Self {
        let (from, to) = swap(self.from.clone(), self.to.clone());
        Self {
            amount: self.amount,
            from,
            to,
        }
    }
}

/// Outcome of a conversion
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ConversionResult {
    /// `amount * rate(from) / rate(to)`
    pub value: f64,
    /// `rate(from) / rate(to)`, the value of one unit of `from`
    pub unit_rate: f64,
}

/// Convert `request.amount` from `request.from` to `request.to`.
///
/// Checks run in a fixed order: table present, amount finite, both
/// currencies usable. A result that overflows is an invalid amount too.
///
/// # Example
/// ```
/// use rusty_curs::converter::{convert, ConversionRequest};
/// use rusty_curs::rates::RateTable;
///
/// let table = RateTable::from_json(r#"{"rates":{"eur":19.5,"usd":17.8,"mdl":1}}"#).unwrap();
/// let request = ConversionRequest::parse("100", "eur", "usd").unwrap();
/// let result = convert(&request, Some(&table)).unwrap();
/// assert_eq!(result.value, 100.0 * 19.5 / 17.8);
/// ```
pub fn convert(request: &ConversionRequest, table: Option<&RateTable>) -> Result<ConversionResult> {
    let table = table.ok_or(CursError::NoTableLoaded)?;

    if !request.amount.is_finite() {
        return Err(CursError::InvalidAmount(request.amount.to_string()));
    }

    let rate_from = table.require_rate(&request.from)?;
    let rate_to = table.require_rate(&request.to)?;

    let amount_in_base = request.amount * rate_from;
    let value = amount_in_base / rate_to;
    let unit_rate = rate_from / rate_to;
    if !value.is_finite() || !unit_rate.is_finite() {
        return Err(CursError::InvalidAmount(format!(
            "{} {} overflows in {}",
            request.amount,
            request.from.display_code(),
            request.to.display_code()
        )));
    }

    Ok(ConversionResult { value, unit_rate })
}

/// Value of one unit of `from` expressed in `to`
pub fn unit_rate(table: &RateTable, from: &CurrencyCode, to: &CurrencyCode) -> Result<f64> {
    let rate = table.require_rate(from)? / table.require_rate(to)?;
    if !rate.is_finite() {
        return Err(CursError::InvalidAmount(format!(
            "1 {} overflows in {}",
            from.display_code(),
            to.display_code()
        )));
    }
    Ok(rate)
}

/// Exchange the two sides of a pair
pub fn swap(from: CurrencyCode, to: CurrencyCode) -> (CurrencyCode, CurrencyCode) {
    (to, from)
}

/// Parse a typed amount.
///
/// Leading whitespace is skipped and the longest numeric prefix is taken, so
/// `"12abc"` reads as 12 and `"1e3"` as 1000. A decimal comma is accepted when
/// the text has no point. Anything without a numeric prefix, or a value that
/// overflows to infinity, is [`CursError::InvalidAmount`].
pub fn parse_amount(text: &str) -> Result<f64> {
    let trimmed = text.trim_start();
    let normalized = if trimmed.contains(',') && !trimmed.contains('.') {
        trimmed.replacen(',', ".", 1)
    } else {
        trimmed.to_string()
    };

    let prefix = &normalized[..numeric_prefix_len(&normalized)];
    let value: f64 = prefix
        .parse()
        .map_err(|_| CursError::InvalidAmount(text.to_string()))?;

    if value.is_finite() {
        Ok(value)
    } else {
        Err(CursError::InvalidAmount(text.to_string()))
    }
}

/// Length of the longest `[+-]?(d+(.d*)?|.d+)([eE][+-]?d+)?` prefix
fn numeric_prefix_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    let mut i = 0;

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = i - int_start;

    let mut frac_digits = 0;
    if i < bytes.len() && bytes[i] == b'.' {
        let mut j = i + 1;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = j - i - 1;
        if int_digits > 0 || frac_digits > 0 {
            i = j;
        }
    }

    if int_digits == 0 && frac_digits == 0 {
        return 0;
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_start {
            i = j;
        }
    }

    i
}
