//! Fitted linear pricing model for one carrier/service/lane.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Currency, Money};

/// Coefficients of a fitted lane model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegressionModel {
    pub carrier_code: String,
    pub carrier_name: String,
    pub service_code: String,
    pub service_name: String,
    pub origin_region: String,
    pub destination_region: String,
    pub currency: Currency,
    pub intercept_cents: i64,
    pub cents_per_kg: f64,
    pub minimum_charge_cents: i64,
    /// Goodness of fit from the offline training run, 0.0..=1.0.
    pub r_squared: f64,
    pub transit_days: u32,
}

impl RegressionModel {
    /// Predicts freight for a chargeable weight in kilograms.
    pub fn predict(&self, weight_kg: f64) -> Money {
        let raw = self.intercept_cents as f64 + self.cents_per_kg * weight_kg;
        let predicted = Money::from_major(raw / 100.0, self.currency);
        predicted
            .clamp_cents(Some(self.minimum_charge_cents), None)
    }

    /// True when the model's fit meets the given confidence floor.
    pub fn meets_confidence(&self, floor: f64) -> bool {
        self.r_squared >= floor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn model() -> RegressionModel {
        RegressionModel {
            carrier_code: "UBBEML".to_string(),
            carrier_name: "ubbe Estimate".to_string(),
            service_code: "EST".to_string(),
            service_name: "Estimated LTL".to_string(),
            origin_region: "AB".to_string(),
            destination_region: "ON".to_string(),
            currency: Currency::Cad,
            intercept_cents: 8000,
            cents_per_kg: 22.5,
            minimum_charge_cents: 10000,
            r_squared: 0.83,
            transit_days: 5,
        }
    }

    #[test]
    fn predict_is_linear_in_weight() {
        // 80.00 + 0.225 * 1000 = $305.00
        assert_eq!(model().predict(1000.0).cents(), 30500);
    }

    #[test]
    fn predict_floors_at_minimum_charge() {
        // 80.00 + 0.225 * 10 = $82.25, below the $100.00 minimum.
        assert_eq!(model().predict(10.0).cents(), 10000);
    }

    #[test]
    fn predict_quantizes_half_up() {
        // 80.00 + 0.225 * 33 = $87.425 -> clamps to min anyway; use a
        // heavier weight: 0.225 * 999 = 224.775 + 80 = 304.775 -> 304.78
        assert_eq!(model().predict(999.0).cents(), 30478);
    }

    #[test]
    fn confidence_floor_filters_models() {
        assert!(model().meets_confidence(0.8));
        assert!(!model().meets_confidence(0.9));
    }
}
