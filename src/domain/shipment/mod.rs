//! Shipment description: locations, packages, and quantized totals.

mod location;
mod package;
#[allow(clippy::module_inception)]
mod shipment;

pub use location::Location;
pub use package::{Package, Packaging};
pub use shipment::Shipment;

/// Pounds per kilogram.
pub const LB_PER_KG: f64 = 2.20462;

/// Default cubing factor: kilograms charged per cubic metre of freight.
pub const DEFAULT_CUBIC_FACTOR_KG_PER_M3: f64 = 250.0;

/// Rounds half-up to two decimal places.
///
/// Representation noise is shed at six decimals first, matching the
/// money quantization rule.
pub(crate) fn round2(value: f64) -> f64 {
    let scaled = (value * 100.0 * 1e6).round() / 1e6;
    let rounded = if scaled.is_sign_negative() {
        -(-scaled + 0.5).floor()
    } else {
        (scaled + 0.5).floor()
    };
    rounded / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round2_rounds_half_up() {
        assert_eq!(round2(10.005), 10.01);
        assert_eq!(round2(10.004), 10.0);
        assert_eq!(round2(0.125), 0.13);
    }
}
