//! Surcharge Rule Reader Port.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::rules::SurchargeRule;

/// Port for loading a carrier's accessorial rules.
#[async_trait]
pub trait SurchargeRuleReader: Send + Sync {
    /// All rules for the carrier, mandatory and optional.
    async fn rules_for(&self, carrier_code: &str) -> Result<Vec<SurchargeRule>, DomainError>;
}
