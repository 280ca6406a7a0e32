//! History entry type

use crate::currency::CurrencyCode;
use chrono::{DateTime, Local};
use serde::{Deserialize, Deserializer, Serialize};

/// Timestamp layout, matching `toLocaleString('ro-MD')`
pub const TIMESTAMP_FORMAT: &str = "%d.%m.%Y, %H:%M:%S";

/// One saved conversion
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    /// Amount exactly as it was typed
    #[serde(deserialize_with = "string_or_number")]
    pub amount: String,
    /// Uppercase display code
    pub from: String,
    /// Uppercase display code
    pub to: String,
    /// Rounded display value
    pub result: String,
    /// Local time of the save
    pub timestamp: String,
}

impl HistoryEntry {
    /// Entry stamped with the current local time
    pub fn new(
        amount: impl Into<String>,
        from: &CurrencyCode,
        to: &CurrencyCode,
        result: impl Into<String>,
    ) -> Self {
        Self::at(amount, from, to, result, Local::now())
    }

    /// Entry stamped with an explicit time
    pub fn at(
        amount: impl Into<String>,
        from: &CurrencyCode,
        to: &CurrencyCode,
        result: impl Into<String>,
        when: DateTime<Local>,
    ) -> Self {
        Self {
            amount: amount.into().trim().to_string(),
            from: from.display_code(),
            to: to.display_code(),
            result: result.into(),
            timestamp: when.format(TIMESTAMP_FORMAT).to_string(),
        }
    }

    /// Same amount and the same pair, regardless of result or time
    pub fn is_same_conversion(&self, other: &HistoryEntry) -> bool {
        self.amount == other.amount && self.from == other.from && self.to == other.to
    }
}

/// Older lists stored the amount as a JSON number
fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Amount::deserialize(deserializer)? {
        Amount::Text(s) => s,
        Amount::Number(n) => n.to_string(),
    })
}
