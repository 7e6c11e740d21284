//! Regression Model Reader Port - fitted model lookup.

use async_trait::async_trait;

use crate::domain::foundation::DomainError;
use crate::domain::regression::RegressionModel;

/// Port for looking up fitted pricing models by region pair.
#[async_trait]
pub trait RegressionModelReader: Send + Sync {
    /// Models fitted for the region pair, regardless of confidence.
    async fn models_for(
        &self,
        origin_region: &str,
        destination_region: &str,
    ) -> Result<Vec<RegressionModel>, DomainError>;
}
