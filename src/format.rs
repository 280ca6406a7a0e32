//! Display strings for conversion results
//!
//! Rounding lives here and only here: two decimals for converted values, four
//! for the unit rate.

use crate::currency::CurrencyCode;
use crate::rates::RateTable;
use serde::{Deserialize, Serialize};

/// Result placeholder when a currency has no usable rate
pub const UNKNOWN_PLACEHOLDER: &str = "---";
/// Result placeholder when no rate table could be loaded
pub const ERROR_PLACEHOLDER: &str = "Eroare";
/// Result shown for an amount that is not a number
pub const ZERO_PLACEHOLDER: &str = "0.00";
/// Rate line shown while no table is available
pub const LOADING_NOTICE: &str = "Se încarcă cursurile...";

/// Number formatting for converted values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum NumberLocale {
    /// `1234.56`
    #[default]
    #[serde(rename = "plain")]
    Plain,
    /// `1.234,56`, as `Intl.NumberFormat('ro-MD')` prints it
    #[serde(rename = "ro-md")]
    RoMd,
}

impl NumberLocale {
    /// Parse a locale name as written in config or on the command line
    pub fn from_name(name: &str) -> Option<Self> {
        match name.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "plain" | "c" | "en" => Some(NumberLocale::Plain),
            "ro-md" | "ro" => Some(NumberLocale::RoMd),
            _ => None,
        }
    }
}

/// Round an exact decimal tie away from zero.
///
/// `{:.N}` rounds ties to even; the published figures round `0.125` to
/// `0.13`. Only products that are exact in binary count as ties, so a value
/// like `1.005` (stored just below the tie) keeps its nearest rounding.
fn round_half_away(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    let scaled = value * factor;
    let is_tie = (scaled - scaled.trunc()).abs() == 0.5;
    if is_tie && value.mul_add(factor, -scaled) == 0.0 {
        scaled.round() / factor
    } else {
        value
    }
}

/// Format a value with exactly two decimals
pub fn format_amount(value: f64, locale: NumberLocale) -> String {
    let fixed = format!("{:.2}", round_half_away(value, 2));
    match locale {
        NumberLocale::Plain => fixed,
        NumberLocale::RoMd => {
            let (sign, digits) = match fixed.strip_prefix('-') {
                Some(rest) => ("-", rest),
                None => ("", fixed.as_str()),
            };
            let (int_part, frac_part) = digits.split_once('.').unwrap_or((digits, "00"));
            format!("{}{},{}", sign, group_thousands(int_part, '.'), frac_part)
        }
    }
}

/// `"109.55 USD"`
pub fn format_result(value: f64, to: &CurrencyCode, locale: NumberLocale) -> String {
    format!("{} {}", format_amount(value, locale), to.display_code())
}

/// `"1 EUR = 1.0955 USD"`
pub fn format_unit_rate(rate: f64, from: &CurrencyCode, to: &CurrencyCode) -> String {
    format!(
        "1 {} = {:.4} {}",
        from.display_code(),
        round_half_away(rate, 4),
        to.display_code()
    )
}

/// Line announcing which official table is in use, if it carries a date
pub fn publication_notice(table: &RateTable) -> Option<String> {
    table
        .publication_date()
        .map(|date| format!("Curs oficial BNM din data: {}", date))
}

fn group_thousands(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(separator);
        }
        out.push(ch);
    }
    out
}
