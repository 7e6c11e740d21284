//! Sales tax by delivery region.
//!
//! Canadian deliveries attract GST/HST based on the destination province.
//! Non-Canadian deliveries are zero-rated here; duties and foreign taxes
//! are settled outside the quote.

use once_cell::sync::Lazy;
use std::collections::HashMap;

/// A resolved sales tax: code shown on the quote plus the percentage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TaxRate {
    pub code: &'static str,
    pub percentage: f64,
}

static CANADIAN_TAX: Lazy<HashMap<&'static str, TaxRate>> = Lazy::new(|| {
    HashMap::from([
        ("AB", TaxRate { code: "GST", percentage: 5.0 }),
        ("BC", TaxRate { code: "GST", percentage: 5.0 }),
        ("MB", TaxRate { code: "GST", percentage: 5.0 }),
        ("NB", TaxRate { code: "HST", percentage: 15.0 }),
        ("NL", TaxRate { code: "HST", percentage: 15.0 }),
        ("NS", TaxRate { code: "HST", percentage: 15.0 }),
        ("NT", TaxRate { code: "GST", percentage: 5.0 }),
        ("NU", TaxRate { code: "GST", percentage: 5.0 }),
        ("ON", TaxRate { code: "HST", percentage: 13.0 }),
        ("PE", TaxRate { code: "HST", percentage: 15.0 }),
        ("QC", TaxRate { code: "GST", percentage: 5.0 }),
        ("SK", TaxRate { code: "GST", percentage: 5.0 }),
        ("YT", TaxRate { code: "GST", percentage: 5.0 }),
    ])
});

const ZERO_RATED: TaxRate = TaxRate { code: "TAX", percentage: 0.0 };
const GST_DEFAULT: TaxRate = TaxRate { code: "GST", percentage: 5.0 };

/// Resolves the sales tax for a delivery country and region.
///
/// An unrecognized Canadian region code falls back to plain GST rather
/// than silently zero-rating a domestic move.
pub fn tax_rate_for(country_code: &str, region_code: &str) -> TaxRate {
    if country_code != "CA" {
        return ZERO_RATED;
    }
    CANADIAN_TAX
        .get(region_code)
        .copied()
        .unwrap_or(GST_DEFAULT)
}
