//! Per-account markup with per-carrier overrides.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Markup applied to carrier cost to produce the customer-facing price.
///
/// A subaccount has a base percentage; specific carriers may carry an
/// override (negotiated margins differ by carrier).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Markup {
    base_percentage: f64,
    carrier_overrides: HashMap<String, f64>,
}

impl Markup {
    /// Creates a markup with the given base percentage.
    pub fn new(base_percentage: f64) -> Self {
        Self {
            base_percentage,
            carrier_overrides: HashMap::new(),
        }
    }

    /// A pass-through markup (0%).
    pub fn none() -> Self {
        Self::new(0.0)
    }

    /// Adds a per-carrier override.
    pub fn with_carrier_override(mut self, carrier_code: impl Into<String>, percentage: f64) -> Self {
        self.carrier_overrides.insert(carrier_code.into(), percentage);
        self
    }

    /// The percentage applied for a carrier.
    pub fn percentage_for(&self, carrier_code: &str) -> f64 {
        self.carrier_overrides
            .get(carrier_code)
            .copied()
            .unwrap_or(self.base_percentage)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{Currency, Money};

    #[test]
    fn base_percentage_applies_without_override() {
        let markup = Markup::new(15.0);
        assert_eq!(markup.percentage_for("DAYROSS"), 15.0);
    }

    #[test]
    fn carrier_override_wins() {
        let markup = Markup::new(15.0).with_carrier_override("DAYROSS", 22.5);
        assert_eq!(markup.percentage_for("DAYROSS"), 22.5);
        assert_eq!(markup.percentage_for("MANITOULIN"), 15.0);
    }

    #[test]
    fn markup_applied_through_money() {
        let markup = Markup::new(10.0);
        let cost = Money::from_cents(20000, Currency::Cad);
        let sell = cost.with_markup(markup.percentage_for("X"));
        assert_eq!(sell.cents(), 22000);
    }
}
