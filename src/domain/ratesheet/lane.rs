//! Lane and weight-break rating.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{Currency, DomainError, ErrorCode, Money};

/// One weight break on a lane: shipments at or above `min_weight_lb`
/// (up to the next break) are rated at `per_100lb_cents`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct WeightBreak {
    pub min_weight_lb: f64,
    pub per_100lb_cents: i64,
}

/// A priced lane in a carrier's rate sheet.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateSheetLane {
    pub carrier_code: String,
    pub carrier_name: String,
    pub service_code: String,
    pub service_name: String,
    pub origin_city: String,
    pub origin_region: String,
    pub destination_city: String,
    pub destination_region: String,
    pub currency: Currency,
    pub minimum_charge_cents: i64,
    pub transit_days: u32,
    breaks: Vec<WeightBreak>,
}

impl RateSheetLane {
    /// Creates a lane, sorting its breaks ascending by weight.
    ///
    /// An empty break table is rejected: a lane that can price nothing is
    /// bad reference data, not an empty quote.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        carrier_code: impl Into<String>,
        carrier_name: impl Into<String>,
        service_code: impl Into<String>,
        service_name: impl Into<String>,
        origin_city: impl Into<String>,
        origin_region: impl Into<String>,
        destination_city: impl Into<String>,
        destination_region: impl Into<String>,
        currency: Currency,
        minimum_charge_cents: i64,
        transit_days: u32,
        mut breaks: Vec<WeightBreak>,
    ) -> Result<Self, DomainError> {
        if breaks.is_empty() {
            return Err(DomainError::new(
                ErrorCode::NoWeightBreaks,
                "Rate sheet lane has no weight breaks",
            ));
        }
        breaks.sort_by(|a, b| {
            a.min_weight_lb
                .partial_cmp(&b.min_weight_lb)
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        Ok(Self {
            carrier_code: carrier_code.into(),
            carrier_name: carrier_name.into(),
            service_code: service_code.into(),
            service_name: service_name.into(),
            origin_city: origin_city.into(),
            origin_region: origin_region.into(),
            destination_city: destination_city.into(),
            destination_region: destination_region.into(),
            currency,
            minimum_charge_cents,
            transit_days,
            breaks,
        })
    }

    pub fn breaks(&self) -> &[WeightBreak] {
        &self.breaks
    }

    /// Rates a chargeable weight (lb) against this lane.
    ///
    /// Selects the highest break whose threshold is at or below the weight
    /// (the first break for anything lighter), prices per 100 lb, and floors
    /// at the minimum charge. Deficit-weight rating then prices the shipment
    /// as if it weighed the next break's threshold at that break's rate and
    /// keeps the cheaper of the two.
    pub fn freight_for(&self, weight_lb: f64) -> Result<Money, DomainError> {
        if !(weight_lb > 0.0 && weight_lb.is_finite()) {
            return Err(DomainError::new(
                ErrorCode::OutOfRange,
                format!("Chargeable weight must be positive, got {}", weight_lb),
            ));
        }

        let index = self
            .breaks
            .iter()
            .rposition(|b| b.min_weight_lb <= weight_lb)
            .unwrap_or(0);
        let applicable = &self.breaks[index];

        let rated = Money::from_major(
            weight_lb / 100.0 * (applicable.per_100lb_cents as f64 / 100.0),
            self.currency,
        );

        let rated = match self.breaks.get(index + 1) {
            Some(next) => {
                let as_next = Money::from_major(
                    next.min_weight_lb / 100.0 * (next.per_100lb_cents as f64 / 100.0),
                    self.currency,
                );
                rated.min(as_next)?
            }
            None => rated,
        };

        rated.max(Money::from_cents(self.minimum_charge_cents, self.currency))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lane() -> RateSheetLane {
        RateSheetLane::new(
            "DAYROSS",
            "Day & Ross",
            "LTL",
            "General LTL",
            "Edmonton",
            "AB",
            "Toronto",
            "ON",
            Currency::Cad,
            9500,
            4,
            vec![
                // Deliberately unsorted; the constructor sorts.
                WeightBreak { min_weight_lb: 1000.0, per_100lb_cents: 3200 },
                WeightBreak { min_weight_lb: 0.0, per_100lb_cents: 5500 },
                WeightBreak { min_weight_lb: 500.0, per_100lb_cents: 4100 },
                WeightBreak { min_weight_lb: 2000.0, per_100lb_cents: 2600 },
            ],
        )
        .unwrap()
    }

    #[test]
    fn empty_breaks_rejected() {
        let err = RateSheetLane::new(
            "X", "X", "LTL", "LTL", "A", "AB", "B", "ON", Currency::Cad, 0, 1, vec![],
        )
        .unwrap_err();
        assert_eq!(err.code, ErrorCode::NoWeightBreaks);
    }

    #[test]
    fn breaks_are_sorted_on_construction() {
        let thresholds: Vec<f64> = lane().breaks().iter().map(|b| b.min_weight_lb).collect();
        assert_eq!(thresholds, vec![0.0, 500.0, 1000.0, 2000.0]);
    }

    #[test]
    fn light_shipment_floors_at_minimum_charge() {
        // 100 lb at $55/cwt = $55.00, below the $95.00 minimum.
        let freight = lane().freight_for(100.0).unwrap();
        assert_eq!(freight.cents(), 9500);
    }

    #[test]
    fn mid_break_rates_per_hundredweight() {
        // 800 lb falls in the 500 break: 8 x $41 = $328.00.
        // Deficit check against 1000 lb at $32/cwt = $320.00 -> cheaper.
        let freight = lane().freight_for(800.0).unwrap();
        assert_eq!(freight.cents(), 32000);
    }

    #[test]
    fn deficit_rating_not_taken_when_dearer() {
        // 600 lb in the 500 break: 6 x $41 = $246.00.
        // As-1000lb alternative is $320.00, so the direct rate stands.
        let freight = lane().freight_for(600.0).unwrap();
        assert_eq!(freight.cents(), 24600);
    }

    #[test]
    fn top_break_has_no_deficit_alternative() {
        // 2500 lb in the 2000 break: 25 x $26 = $650.00.
        let freight = lane().freight_for(2500.0).unwrap();
        assert_eq!(freight.cents(), 65000);
    }

    #[test]
    fn non_positive_weight_is_error() {
        assert!(lane().freight_for(0.0).is_err());
        assert!(lane().freight_for(-10.0).is_err());
    }
}
