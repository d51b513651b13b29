//! Type-safe price representation using decimal arithmetic.
//!
//! Shopify returns money as a `Decimal` scalar (a string such as `"19.5"`)
//! plus an ISO 4217 currency code. [`Price`] parses that pair and renders it
//! the way a US-English storefront shows currency: symbol, grouped thousands,
//! and the currency's minor-unit digits.

use core::fmt;
use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Errors that can occur when parsing a [`Price`].
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum PriceError {
    /// The amount is not a decimal number.
    #[error("invalid amount {0:?}")]
    InvalidAmount(String),
    /// The currency code is not three ASCII letters.
    #[error("invalid currency code {0:?}")]
    InvalidCurrency(String),
}

/// ISO 4217 currency codes.
///
/// The common storefront currencies get their own variant so they can carry
/// a display symbol; every other valid code is kept as [`CurrencyCode::Other`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum CurrencyCode {
    #[default]
    USD,
    CAD,
    AUD,
    EUR,
    GBP,
    JPY,
    /// Any other three-letter code, stored upper-cased.
    Other(String),
}

impl CurrencyCode {
    /// Parse a three-letter ISO 4217 code (case-insensitive).
    ///
    /// # Errors
    ///
    /// Returns [`PriceError::InvalidCurrency`] if the code is not exactly
    /// three ASCII letters.
    pub fn parse(code: &str) -> Result<Self, PriceError> {
        if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(PriceError::InvalidCurrency(code.to_owned()));
        }

        Ok(match code.to_ascii_uppercase().as_str() {
            "USD" => Self::USD,
            "CAD" => Self::CAD,
            "AUD" => Self::AUD,
            "EUR" => Self::EUR,
            "GBP" => Self::GBP,
            "JPY" => Self::JPY,
            other => Self::Other(other.to_owned()),
        })
    }

    /// The three-letter code.
    #[must_use]
    pub fn code(&self) -> &str {
        match self {
            Self::USD => "USD",
            Self::CAD => "CAD",
            Self::AUD => "AUD",
            Self::EUR => "EUR",
            Self::GBP => "GBP",
            Self::JPY => "JPY",
            Self::Other(code) => code,
        }
    }

    /// Display symbol, if this currency has one.
    #[must_use]
    pub const fn symbol(&self) -> Option<&'static str> {
        match self {
            Self::USD => Some("$"),
            Self::CAD => Some("CA$"),
            Self::AUD => Some("A$"),
            Self::EUR => Some("€"),
            Self::GBP => Some("£"),
            Self::JPY => Some("¥"),
            Self::Other(_) => None,
        }
    }

    /// Number of minor-unit digits shown for this currency.
    #[must_use]
    pub const fn minor_units(&self) -> u32 {
        match self {
            Self::JPY => 0,
            _ => 2,
        }
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl TryFrom<String> for CurrencyCode {
    type Error = PriceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<CurrencyCode> for String {
    fn from(code: CurrencyCode) -> Self {
        code.code().to_owned()
    }
}

/// A price with currency information.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Price {
    /// Amount in the currency's standard unit (e.g., dollars, not cents).
    pub amount: Decimal,
    /// ISO 4217 currency code.
    pub currency_code: CurrencyCode,
}

impl Price {
    /// Create a new price.
    #[must_use]
    pub const fn new(amount: Decimal, currency_code: CurrencyCode) -> Self {
        Self {
            amount,
            currency_code,
        }
    }

    /// Parse a price from Shopify's `MoneyV2` string pair.
    ///
    /// # Errors
    ///
    /// Returns a [`PriceError`] if either the amount or the currency code is
    /// malformed.
    pub fn parse(amount: &str, currency_code: &str) -> Result<Self, PriceError> {
        let amount = Decimal::from_str(amount.trim())
            .map_err(|_| PriceError::InvalidAmount(amount.to_owned()))?;
        let currency_code = CurrencyCode::parse(currency_code)?;
        Ok(Self::new(amount, currency_code))
    }

    /// Returns `true` if the amount has no fractional part.
    #[must_use]
    pub fn is_whole(&self) -> bool {
        self.amount.fract().is_zero()
    }

    /// Format for display with the currency's full precision (e.g., `$1,234.50`).
    #[must_use]
    pub fn display(&self) -> String {
        self.render(self.currency_code.minor_units())
    }

    /// Format for display, dropping the fraction when the amount is whole
    /// (e.g., `$12` instead of `$12.00`, but `$12.50` unchanged).
    #[must_use]
    pub fn display_without_trailing_zeros(&self) -> String {
        if self.is_whole() {
            self.render(0)
        } else {
            self.display()
        }
    }

    fn render(&self, decimals: u32) -> String {
        let rounded = self
            .amount
            .round_dp_with_strategy(decimals, RoundingStrategy::MidpointAwayFromZero);
        let digits = rounded.abs().to_string();
        let (whole, fraction) = digits.split_once('.').unwrap_or((digits.as_str(), ""));

        let mut number = group_thousands(whole);
        if decimals > 0 {
            number.push('.');
            number.push_str(fraction);
            for _ in fraction.len()..decimals as usize {
                number.push('0');
            }
        }

        let sign = if rounded.is_sign_negative() && !rounded.is_zero() {
            "-"
        } else {
            ""
        };

        match self.currency_code.symbol() {
            Some(symbol) => format!("{sign}{symbol}{number}"),
            None => format!("{sign}{number} {}", self.currency_code.code()),
        }
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.display())
    }
}

/// Insert `,` separators every three digits from the right.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}
