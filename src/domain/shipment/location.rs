//! Origin/destination locations, normalized at construction.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A pickup or delivery location.
///
/// Region and country codes are uppercased two-letter codes (province/state,
/// ISO-3166 country). Postal codes are uppercased with whitespace trimmed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Location {
    city: String,
    region_code: String,
    country_code: String,
    postal_code: String,
}

impl Location {
    /// Creates a normalized location.
    pub fn new(
        city: impl Into<String>,
        region_code: impl Into<String>,
        country_code: impl Into<String>,
        postal_code: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let city = city.into().trim().to_string();
        let region_code = region_code.into().trim().to_uppercase();
        let country_code = country_code.into().trim().to_uppercase();
        let postal_code = postal_code.into().trim().to_uppercase();

        if city.is_empty() {
            return Err(ValidationError::empty_field("city"));
        }
        if region_code.len() != 2 {
            return Err(ValidationError::invalid_format(
                "region_code",
                "must be a two-letter province/state code",
            ));
        }
        if country_code.len() != 2 {
            return Err(ValidationError::invalid_format(
                "country_code",
                "must be a two-letter ISO-3166 code",
            ));
        }

        Ok(Self {
            city,
            region_code,
            country_code,
            postal_code,
        })
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub fn region_code(&self) -> &str {
        &self.region_code
    }

    pub fn country_code(&self) -> &str {
        &self.country_code
    }

    pub fn postal_code(&self) -> &str {
        &self.postal_code
    }

    /// True when this location is in Canada.
    pub fn is_canadian(&self) -> bool {
        self.country_code == "CA"
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}, {} {}", self.city, self.region_code, self.country_code)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn location_normalizes_codes() {
        let loc = Location::new("Edmonton ", "ab", "ca", " t5j 0k7").unwrap();
        assert_eq!(loc.city(), "Edmonton");
        assert_eq!(loc.region_code(), "AB");
        assert_eq!(loc.country_code(), "CA");
        assert_eq!(loc.postal_code(), "T5J 0K7");
        assert!(loc.is_canadian());
    }

    #[test]
    fn location_rejects_empty_city() {
        assert!(Location::new("", "AB", "CA", "T5J0K7").is_err());
    }

    #[test]
    fn location_rejects_bad_region_code() {
        assert!(Location::new("Edmonton", "ALB", "CA", "T5J0K7").is_err());
    }

    #[test]
    fn location_rejects_bad_country_code() {
        assert!(Location::new("Edmonton", "AB", "CAN", "T5J0K7").is_err());
    }
}
