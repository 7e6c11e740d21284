//! Money value object: integer minor units plus currency.
//!
//! All monetary amounts in the rating pipeline are held as whole cents.
//! Fractional results (percentage surcharges, per-hundredweight freight,
//! exchange conversion) are quantized with half-up rounding exactly once,
//! at the point the f64 crosses into a `Money`.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::{Currency, DomainError, ErrorCode};

/// An amount of money in a specific currency, stored as whole cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Money {
    cents: i64,
    currency: Currency,
}

/// Rounds half-up (ties away from zero) to the nearest integer.
///
/// Representation noise is shed at six decimals first, so a value that is
/// decimally x.5 but binarily x.49999... still rounds up.
fn round_half_up(value: f64) -> i64 {
    let value = (value * 1e6).round() / 1e6;
    if value.is_sign_negative() {
        -((-value + 0.5).floor() as i64)
    } else {
        (value + 0.5).floor() as i64
    }
}

impl Money {
    /// Zero in the given currency.
    pub fn zero(currency: Currency) -> Self {
        Self { cents: 0, currency }
    }

    /// Creates money from whole cents.
    pub fn from_cents(cents: i64, currency: Currency) -> Self {
        Self { cents, currency }
    }

    /// Creates money from major units (dollars), rounding half-up to cents.
    pub fn from_major(amount: f64, currency: Currency) -> Self {
        Self {
            cents: round_half_up(amount * 100.0),
            currency,
        }
    }

    /// The amount in whole cents.
    pub fn cents(&self) -> i64 {
        self.cents
    }

    /// The currency of this amount.
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// The amount in major units, exact to two decimals.
    pub fn as_major(&self) -> f64 {
        self.cents as f64 / 100.0
    }

    /// True if the amount is zero or negative.
    pub fn is_zero_or_negative(&self) -> bool {
        self.cents <= 0
    }

    /// Adds two amounts of the same currency.
    pub fn add(self, other: Money) -> Result<Money, DomainError> {
        self.require_same_currency(other)?;
        let cents = self.cents.checked_add(other.cents).ok_or_else(|| {
            DomainError::new(ErrorCode::AmountOverflow, "Money addition overflowed")
        })?;
        Ok(Money::from_cents(cents, self.currency))
    }

    /// Computes `percentage`% of this amount, quantized to cents.
    pub fn percentage(self, percentage: f64) -> Money {
        Money::from_cents(
            round_half_up(self.cents as f64 * percentage / 100.0),
            self.currency,
        )
    }

    /// Applies a markup percentage: amount * (1 + pct/100).
    pub fn with_markup(self, percentage: f64) -> Money {
        Money::from_cents(
            round_half_up(self.cents as f64 * (1.0 + percentage / 100.0)),
            self.currency,
        )
    }

    /// Converts to another currency at the given rate.
    pub fn convert(self, rate: f64, to: Currency) -> Money {
        if to == self.currency {
            return self;
        }
        Money::from_cents(round_half_up(self.cents as f64 * rate), to)
    }

    /// Clamps the amount between optional lower and upper bounds.
    pub fn clamp_cents(self, min: Option<i64>, max: Option<i64>) -> Money {
        let mut cents = self.cents;
        if let Some(min) = min {
            cents = cents.max(min);
        }
        if let Some(max) = max {
            cents = cents.min(max);
        }
        Money::from_cents(cents, self.currency)
    }

    /// The larger of two same-currency amounts.
    pub fn max(self, other: Money) -> Result<Money, DomainError> {
        self.require_same_currency(other)?;
        Ok(if other.cents > self.cents { other } else { self })
    }

    /// The smaller of two same-currency amounts.
    pub fn min(self, other: Money) -> Result<Money, DomainError> {
        self.require_same_currency(other)?;
        Ok(if other.cents < self.cents { other } else { self })
    }

    fn require_same_currency(&self, other: Money) -> Result<(), DomainError> {
        if self.currency != other.currency {
            return Err(DomainError::new(
                ErrorCode::CurrencyMismatch,
                format!(
                    "Cannot combine {} with {}",
                    self.currency, other.currency
                ),
            ));
        }
        Ok(())
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} {}", self.as_major(), self.currency)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn from_major_rounds_half_up() {
        assert_eq!(Money::from_major(10.005, Currency::Cad).cents(), 1001);
        assert_eq!(Money::from_major(10.004, Currency::Cad).cents(), 1000);
        assert_eq!(Money::from_major(-10.005, Currency::Cad).cents(), -1001);
    }

    #[test]
    fn add_same_currency_sums_cents() {
        let a = Money::from_cents(1500, Currency::Cad);
        let b = Money::from_cents(250, Currency::Cad);
        assert_eq!(a.add(b).unwrap().cents(), 1750);
    }

    #[test]
    fn add_different_currency_is_error() {
        let a = Money::from_cents(1500, Currency::Cad);
        let b = Money::from_cents(250, Currency::Usd);
        let err = a.add(b).unwrap_err();
        assert_eq!(err.code, ErrorCode::CurrencyMismatch);
    }

    #[test]
    fn percentage_quantizes_to_cents() {
        // 10.15% of $123.45 = $12.530175 -> $12.53
        let freight = Money::from_cents(12345, Currency::Cad);
        assert_eq!(freight.percentage(10.15).cents(), 1253);
    }

    #[test]
    fn markup_applies_multiplier() {
        let cost = Money::from_cents(10000, Currency::Cad);
        assert_eq!(cost.with_markup(15.0).cents(), 11500);
        assert_eq!(cost.with_markup(0.0).cents(), 10000);
    }

    #[test]
    fn convert_applies_rate_and_switches_currency() {
        let cad = Money::from_cents(10000, Currency::Cad);
        let usd = cad.convert(0.74, Currency::Usd);
        assert_eq!(usd.cents(), 7400);
        assert_eq!(usd.currency(), Currency::Usd);
    }

    #[test]
    fn convert_to_same_currency_is_identity() {
        let cad = Money::from_cents(9999, Currency::Cad);
        assert_eq!(cad.convert(1.33, Currency::Cad).cents(), 9999);
    }

    #[test]
    fn clamp_applies_bounds() {
        let m = Money::from_cents(500, Currency::Cad);
        assert_eq!(m.clamp_cents(Some(1000), None).cents(), 1000);
        assert_eq!(m.clamp_cents(None, Some(300)).cents(), 300);
        assert_eq!(m.clamp_cents(Some(100), Some(1000)).cents(), 500);
    }

    #[test]
    fn display_shows_major_units_and_code() {
        let m = Money::from_cents(123456, Currency::Usd);
        assert_eq!(format!("{}", m), "1234.56 USD");
    }

    proptest! {
        #[test]
        fn from_major_round_trips_within_half_cent(amount in -1_000_000.0f64..1_000_000.0) {
            let m = Money::from_major(amount, Currency::Cad);
            prop_assert!((m.as_major() - amount).abs() <= 0.005 + 1e-9);
        }

        #[test]
        fn percentage_of_zero_is_zero(pct in -500.0f64..500.0) {
            let zero = Money::zero(Currency::Cad);
            prop_assert_eq!(zero.percentage(pct).cents(), 0);
        }

        #[test]
        fn add_is_commutative(a in -1_000_000i64..1_000_000, b in -1_000_000i64..1_000_000) {
            let x = Money::from_cents(a, Currency::Cad);
            let y = Money::from_cents(b, Currency::Cad);
            prop_assert_eq!(x.add(y).unwrap(), y.add(x).unwrap());
        }
    }
}
