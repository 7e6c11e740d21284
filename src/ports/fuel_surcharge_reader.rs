//! Fuel Surcharge Reader Port.
//!
//! Carriers publish fuel surcharge percentages weekly, split by domestic
//! and cross-border service.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;

/// Port for looking up the current fuel surcharge percentage.
#[async_trait]
pub trait FuelSurchargeReader: Send + Sync {
    /// The fuel percentage for the carrier, or `None` when the carrier
    /// builds fuel into its base rates.
    async fn fuel_percentage(
        &self,
        carrier_code: &str,
        cross_border: bool,
    ) -> Result<Option<f64>, DomainError>;
}
