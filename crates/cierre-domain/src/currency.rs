//! Supported currencies and decimal-safe conversion.
//!
//! Amounts and rates are `rust_decimal::Decimal` (Postgres `NUMERIC`). The
//! legacy system did this math in binary floats on values it stored as
//! decimal strings; repeated conversions drifted at the cent level, so the
//! arithmetic here is decimal end to end.

use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Currency of a deal amount or report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Currency {
    #[serde(rename = "USD")]
    Usd,
    #[serde(rename = "ARS")]
    Ars,
}

impl Currency {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Ars => "ARS",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for unrecognized currency codes.
#[derive(Debug, thiserror::Error)]
#[error("unknown currency code: {0}")]
pub struct UnknownCurrency(pub String);

impl FromStr for Currency {
    type Err = UnknownCurrency;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "USD" => Ok(Self::Usd),
            "ARS" => Ok(Self::Ars),
            other => Err(UnknownCurrency(other.to_owned())),
        }
    }
}

/// Convert `amount` between currencies using the USD→ARS rate.
///
/// Identity conversion returns the amount untouched — no rate is consulted,
/// so callers may pass any value when `from == to`. Cross-currency results
/// are rounded to 2 decimal places.
///
/// `usd_to_ars` must be positive; rates are validated when recorded, and a
/// zero rate yields a zero result rather than a panic.
pub fn convert(amount: Decimal, from: Currency, to: Currency, usd_to_ars: Decimal) -> Decimal {
    if from == to {
        return amount;
    }
    match (from, to) {
        (Currency::Usd, Currency::Ars) => (amount * usd_to_ars).round_dp(2),
        (Currency::Ars, Currency::Usd) => amount
            .checked_div(usd_to_ars)
            .unwrap_or(Decimal::ZERO)
            .round_dp(2),
        // Covered by the identity check above.
        (Currency::Usd, Currency::Usd) | (Currency::Ars, Currency::Ars) => amount,
    }
}
