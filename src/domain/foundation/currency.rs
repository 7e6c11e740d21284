//! Currencies supported for quoting and settlement.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// ISO-4217 currencies the platform quotes in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    Cad,
    Usd,
    Eur,
    Gbp,
    Mxn,
}

impl Currency {
    /// The ISO-4217 code.
    pub fn code(&self) -> &'static str {
        match self {
            Currency::Cad => "CAD",
            Currency::Usd => "USD",
            Currency::Eur => "EUR",
            Currency::Gbp => "GBP",
            Currency::Mxn => "MXN",
        }
    }

    /// Parses an ISO-4217 code (case-insensitive).
    pub fn parse(code: &str) -> Result<Self, ValidationError> {
        match code.trim().to_uppercase().as_str() {
            "CAD" => Ok(Currency::Cad),
            "USD" => Ok(Currency::Usd),
            "EUR" => Ok(Currency::Eur),
            "GBP" => Ok(Currency::Gbp),
            "MXN" => Ok(Currency::Mxn),
            other => Err(ValidationError::invalid_format(
                "currency",
                format!("unsupported currency code '{}'", other),
            )),
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}
