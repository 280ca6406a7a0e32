//! Currency codes

use crate::error::{CursError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Currency code as it appears in a rate table.
///
/// Codes are case-insensitive and stored lowercase (`"eur"`), matching the
/// keys of the rates file. `Display` renders the uppercase form (`"EUR"`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Base currency of the official BNM table
    pub const BASE: &'static str = "mdl";

    /// Parse and normalize a code
    pub fn new(code: &str) -> Result<Self> {
        let trimmed = code.trim();
        if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CursError::UnknownCurrency(code.to_string()));
        }
        Ok(Self(trimmed.to_ascii_lowercase()))
    }

    /// The base currency (MDL)
    pub fn base() -> Self {
        Self(Self::BASE.to_string())
    }

    /// Lowercase key form, as stored in the rates map
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Uppercase display form
    pub fn display_code(&self) -> String {
        self.0.to_ascii_uppercase()
    }

    /// Currency symbol for the codes the BNM table commonly carries
    pub fn symbol(&self) -> Option<&'static str> {
        match self.0.as_str() {
            "mdl" => Some("L"),
            "usd" => Some("$"),
            "eur" => Some("€"),
            "gbp" => Some("£"),
            "ron" => Some("lei"),
            "uah" => Some("₴"),
            "rub" => Some("₽"),
            "try" => Some("₺"),
            "jpy" | "cny" => Some("¥"),
            "chf" => Some("CHF"),
            _ => None,
        }
    }
}

impl FromStr for CurrencyCode {
    type Err = CursError;

    fn from_str(s: &str) -> Result<Self> {
        Self::new(s)
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = CursError;

    fn try_from(value: String) -> Result<Self> {
        Self::new(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_code())
    }
}
