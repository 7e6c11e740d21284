//! Package lines: counts, weights, dimensions.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

/// How a package line is packaged. Affects handling surcharges downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Packaging {
    Box,
    #[default]
    Skid,
    Crate,
    Drum,
    Roll,
    Bundle,
}

/// One line on the shipment: `quantity` identical pieces.
///
/// Weight is per piece in kilograms; dimensions are per piece in centimetres.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Package {
    quantity: u32,
    weight_kg: f64,
    length_cm: f64,
    width_cm: f64,
    height_cm: f64,
    packaging: Packaging,
}

impl Package {
    /// Maximum per-piece weight accepted, in kilograms.
    pub const MAX_PIECE_WEIGHT_KG: f64 = 45_000.0;

    /// Creates a package line, validating counts, weight, and dimensions.
    pub fn new(
        quantity: u32,
        weight_kg: f64,
        length_cm: f64,
        width_cm: f64,
        height_cm: f64,
        packaging: Packaging,
    ) -> Result<Self, ValidationError> {
        if quantity == 0 {
            return Err(ValidationError::out_of_range(
                "quantity",
                1.0,
                f64::from(u32::MAX),
                0.0,
            ));
        }
        if !(weight_kg > 0.0 && weight_kg <= Self::MAX_PIECE_WEIGHT_KG) {
            return Err(ValidationError::out_of_range(
                "weight_kg",
                0.0,
                Self::MAX_PIECE_WEIGHT_KG,
                weight_kg,
            ));
        }
        for (field, value) in [
            ("length_cm", length_cm),
            ("width_cm", width_cm),
            ("height_cm", height_cm),
        ] {
            if !(value > 0.0 && value.is_finite()) {
                return Err(ValidationError::out_of_range(field, 0.0, f64::MAX, value));
            }
        }

        Ok(Self {
            quantity,
            weight_kg,
            length_cm,
            width_cm,
            height_cm,
            packaging,
        })
    }

    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn packaging(&self) -> Packaging {
        self.packaging
    }

    /// Total weight of the line in kilograms.
    pub fn line_weight_kg(&self) -> f64 {
        f64::from(self.quantity) * self.weight_kg
    }

    /// Total volume of the line in cubic metres.
    pub fn line_volume_m3(&self) -> f64 {
        let piece_cm3 = self.length_cm * self.width_cm * self.height_cm;
        f64::from(self.quantity) * piece_cm3 / 1_000_000.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn skid(quantity: u32, weight_kg: f64) -> Package {
        Package::new(quantity, weight_kg, 122.0, 102.0, 152.0, Packaging::Skid).unwrap()
    }

    #[test]
    fn package_rejects_zero_quantity() {
        assert!(Package::new(0, 10.0, 10.0, 10.0, 10.0, Packaging::Box).is_err());
    }

    #[test]
    fn package_rejects_non_positive_weight() {
        assert!(Package::new(1, 0.0, 10.0, 10.0, 10.0, Packaging::Box).is_err());
        assert!(Package::new(1, -5.0, 10.0, 10.0, 10.0, Packaging::Box).is_err());
    }

    #[test]
    fn package_rejects_non_positive_dimensions() {
        assert!(Package::new(1, 10.0, 0.0, 10.0, 10.0, Packaging::Box).is_err());
        assert!(Package::new(1, 10.0, 10.0, -1.0, 10.0, Packaging::Box).is_err());
    }

    #[test]
    fn line_weight_multiplies_by_quantity() {
        assert_eq!(skid(3, 100.0).line_weight_kg(), 300.0);
    }

    #[test]
    fn line_volume_converts_cm3_to_m3() {
        // 122 x 102 x 152 cm = 1.891... m3 per piece
        let volume = skid(2, 100.0).line_volume_m3();
        assert!((volume - 2.0 * 1.891_488).abs() < 1e-6);
    }
}
