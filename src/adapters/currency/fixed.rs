//! Fixed-table exchange rates for tests and offline development.

use async_trait::async_trait;
use std::collections::HashMap;

use crate::domain::foundation::Currency;
use crate::ports::{ExchangeRateError, ExchangeRateSource};

/// A static table of conversion rates.
///
/// Same-currency conversions are always 1.0. Pairs present in only one
/// direction are answered with the reciprocal.
#[derive(Debug, Clone, Default)]
pub struct FixedExchangeRates {
    rates: HashMap<(Currency, Currency), f64>,
}

impl FixedExchangeRates {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a rate for a currency pair.
    pub fn with_rate(mut self, from: Currency, to: Currency, rate: f64) -> Self {
        self.rates.insert((from, to), rate);
        self
    }
}

#[async_trait]
impl ExchangeRateSource for FixedExchangeRates {
    async fn rate(&self, from: Currency, to: Currency) -> Result<f64, ExchangeRateError> {
        if from == to {
            return Ok(1.0);
        }
        if let Some(rate) = self.rates.get(&(from, to)) {
            return Ok(*rate);
        }
        if let Some(reverse) = self.rates.get(&(to, from)) {
            if *reverse != 0.0 {
                return Ok(1.0 / reverse);
            }
        }
        Err(ExchangeRateError::UnsupportedPair { from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn same_currency_is_identity() {
        let rates = FixedExchangeRates::new();
        assert_eq!(rates.rate(Currency::Cad, Currency::Cad).await.unwrap(), 1.0);
    }

    #[tokio::test]
    async fn known_pair_resolves() {
        let rates = FixedExchangeRates::new().with_rate(Currency::Usd, Currency::Cad, 1.35);
        assert_eq!(rates.rate(Currency::Usd, Currency::Cad).await.unwrap(), 1.35);
    }

    #[tokio::test]
    async fn reverse_pair_uses_reciprocal() {
        let rates = FixedExchangeRates::new().with_rate(Currency::Usd, Currency::Cad, 1.25);
        assert_eq!(rates.rate(Currency::Cad, Currency::Usd).await.unwrap(), 0.8);
    }

    #[tokio::test]
    async fn unknown_pair_is_error() {
        let rates = FixedExchangeRates::new();
        assert!(rates.rate(Currency::Eur, Currency::Mxn).await.is_err());
    }
}
