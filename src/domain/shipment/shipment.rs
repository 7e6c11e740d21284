//! The shipment aggregate: what the customer wants moved, with the
//! quantized totals every pricing source rates against.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;

use super::{round2, Location, Package, LB_PER_KG};

/// A shipment to be rated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shipment {
    origin: Location,
    destination: Location,
    packages: Vec<Package>,
    /// Option codes requested by the shipper (e.g. "TAILGATE", "HEATED_TRUCK").
    requested_options: Vec<String>,
    is_dangerous_goods: bool,
}

impl Shipment {
    /// Creates a shipment, requiring at least one package line.
    pub fn new(
        origin: Location,
        destination: Location,
        packages: Vec<Package>,
        requested_options: Vec<String>,
        is_dangerous_goods: bool,
    ) -> Result<Self, ValidationError> {
        if packages.is_empty() {
            return Err(ValidationError::empty_field("packages"));
        }
        let requested_options = requested_options
            .into_iter()
            .map(|o| o.trim().to_uppercase())
            .filter(|o| !o.is_empty())
            .collect();

        Ok(Self {
            origin,
            destination,
            packages,
            requested_options,
            is_dangerous_goods,
        })
    }

    pub fn origin(&self) -> &Location {
        &self.origin
    }

    pub fn destination(&self) -> &Location {
        &self.destination
    }

    pub fn packages(&self) -> &[Package] {
        &self.packages
    }

    pub fn requested_options(&self) -> &[String] {
        &self.requested_options
    }

    pub fn is_dangerous_goods(&self) -> bool {
        self.is_dangerous_goods
    }

    /// True when origin and destination are in different countries.
    pub fn is_cross_border(&self) -> bool {
        self.origin.country_code() != self.destination.country_code()
    }

    /// Total piece count.
    pub fn total_quantity(&self) -> u32 {
        self.packages.iter().map(Package::quantity).sum()
    }

    /// Total actual weight in kilograms, quantized to two decimals.
    pub fn total_weight_kg(&self) -> f64 {
        round2(self.packages.iter().map(Package::line_weight_kg).sum())
    }

    /// Total actual weight in pounds, quantized to two decimals.
    pub fn total_weight_lb(&self) -> f64 {
        round2(self.total_weight_kg() * LB_PER_KG)
    }

    /// Total volume in cubic metres, quantized to two decimals with a
    /// floor of 0.01 so a rated shipment never cubes to nothing.
    pub fn total_volume_m3(&self) -> f64 {
        let volume = round2(self.packages.iter().map(Package::line_volume_m3).sum());
        volume.max(0.01)
    }

    /// Cubed weight in kilograms at the given cubing factor (kg per m3).
    pub fn cubed_weight_kg(&self, cubic_factor: f64) -> f64 {
        round2(self.total_volume_m3() * cubic_factor)
    }

    /// Chargeable weight: the greater of actual and cubed weight.
    pub fn chargeable_weight_kg(&self, cubic_factor: f64) -> f64 {
        let actual = self.total_weight_kg();
        let cubed = self.cubed_weight_kg(cubic_factor);
        round2(actual.max(cubed))
    }

    /// Chargeable weight in pounds, for rate sheets priced per 100 lb.
    pub fn chargeable_weight_lb(&self, cubic_factor: f64) -> f64 {
        round2(self.chargeable_weight_kg(cubic_factor) * LB_PER_KG)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::shipment::Packaging;

    fn edmonton() -> Location {
        Location::new("Edmonton", "AB", "CA", "T5J0K7").unwrap()
    }

    fn toronto() -> Location {
        Location::new("Toronto", "ON", "CA", "M5V2T6").unwrap()
    }

    fn shipment_with(packages: Vec<Package>) -> Shipment {
        Shipment::new(edmonton(), toronto(), packages, vec![], false).unwrap()
    }

    #[test]
    fn shipment_rejects_no_packages() {
        let result = Shipment::new(edmonton(), toronto(), vec![], vec![], false);
        assert!(result.is_err());
    }

    #[test]
    fn requested_options_are_normalized() {
        let packages =
            vec![Package::new(1, 50.0, 100.0, 100.0, 100.0, Packaging::Skid).unwrap()];
        let shipment = Shipment::new(
            edmonton(),
            toronto(),
            packages,
            vec![" tailgate ".to_string(), "".to_string()],
            false,
        )
        .unwrap();
        assert_eq!(shipment.requested_options(), &["TAILGATE".to_string()]);
    }

    #[test]
    fn totals_sum_across_lines() {
        let shipment = shipment_with(vec![
            Package::new(2, 100.0, 100.0, 100.0, 100.0, Packaging::Skid).unwrap(),
            Package::new(1, 50.5, 50.0, 50.0, 50.0, Packaging::Box).unwrap(),
        ]);
        assert_eq!(shipment.total_quantity(), 3);
        assert_eq!(shipment.total_weight_kg(), 250.5);
        // 2 m3 + 0.125 m3 = 2.13 (rounded)
        assert_eq!(shipment.total_volume_m3(), 2.13);
    }

    #[test]
    fn weight_lb_converts_and_quantizes() {
        let shipment =
            shipment_with(vec![Package::new(1, 100.0, 10.0, 10.0, 10.0, Packaging::Box).unwrap()]);
        assert_eq!(shipment.total_weight_lb(), 220.46);
    }

    #[test]
    fn volume_has_floor_of_one_hundredth() {
        let shipment =
            shipment_with(vec![Package::new(1, 1.0, 5.0, 5.0, 5.0, Packaging::Box).unwrap()]);
        assert_eq!(shipment.total_volume_m3(), 0.01);
    }

    #[test]
    fn chargeable_weight_takes_greater_of_actual_and_cubed() {
        // Light but bulky: 1 m3 at 10 kg actual cubes to 250 kg at factor 250.
        let bulky =
            shipment_with(vec![Package::new(1, 10.0, 100.0, 100.0, 100.0, Packaging::Skid).unwrap()]);
        assert_eq!(bulky.chargeable_weight_kg(250.0), 250.0);

        // Dense: 500 kg actual in 1 m3 stays at actual weight.
        let dense =
            shipment_with(vec![Package::new(1, 500.0, 100.0, 100.0, 100.0, Packaging::Skid).unwrap()]);
        assert_eq!(dense.chargeable_weight_kg(250.0), 500.0);
    }

    #[test]
    fn cross_border_detected_from_countries() {
        let packages =
            vec![Package::new(1, 50.0, 100.0, 100.0, 100.0, Packaging::Skid).unwrap()];
        let denver = Location::new("Denver", "CO", "US", "80014").unwrap();
        let shipment =
            Shipment::new(edmonton(), denver, packages, vec![], false).unwrap();
        assert!(shipment.is_cross_border());
    }
}
